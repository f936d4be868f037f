//! # Session 模块
//!
//! 一次游玩会话：按帧驱动解释器，直到脚本结束、返回主菜单或退出。
//!
//! ## 每帧流程
//!
//! 1. 检查退出信号（退出前在阻塞状态下自动存档到槽位 1）
//! 2. 待运行的小游戏同步运行，结束后把结果交给解释器
//! 3. 输入事件：菜单栈优先，其次 HUD 按钮，最后才是对话推进
//! 4. 推进动画，结束后通知解释器
//! 5. 提交画面，等待下一帧

use tracing::{debug, info, warn};

use carcare_runtime::{Interpreter, MiniGameKind, MiniGameOutcome, RuntimeInput, Script};

use crate::animation::Animation;
use crate::command_executor::{CommandExecutor, ExecuteResult};
use crate::error::AppError;
use crate::frontend::{FrameView, Frontend};
use crate::input::{InputEvent, Key, advance_input};
use crate::overlay::{Overlay, OverlayAction, OverlayStack};
use crate::presentation::{PresentationSnapshot, PresentationState};
use crate::state::HostState;

/// 自动存档与 HUD 存档使用的槽位
pub const QUICK_SAVE_SLOT: u32 = 1;

/// HUD 按钮文本
pub const HUD_SAVE: &str = "Save";
pub const HUD_LOAD: &str = "Load";

/// 会话结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// 脚本执行完毕
    Finished,
    /// 从暂停菜单返回主菜单
    ReturnToMenu,
    /// 关闭窗口
    Quit,
}

/// 当前阻塞的活动
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    None,
    Click,
    Animation(Animation),
    MiniGame(MiniGameKind),
}

/// 游玩会话
pub struct PlaySession<'a> {
    state: &'a mut HostState,
    /// 原始脚本（读档时重建解释器）
    script: Script,
    interpreter: Interpreter,
    presentation: PresentationState,
    executor: CommandExecutor,
    overlays: OverlayStack,
    pending: Pending,
}

impl<'a> PlaySession<'a> {
    /// 创建会话
    ///
    /// `start_index` 不为 0 时先快进回放，再从该索引继续执行到第一个阻塞点。
    pub fn new(state: &'a mut HostState, script: Script, start_index: usize) -> Result<Self, AppError> {
        let executor = CommandExecutor::new(state.config.frame_rate, state.layout.dialogue_columns());
        let interpreter = Interpreter::new(script.clone());

        let mut session = Self {
            state,
            script,
            interpreter,
            presentation: PresentationState::new(),
            executor,
            overlays: OverlayStack::new(),
            pending: Pending::None,
        };
        session.restart_at(start_index)?;
        Ok(session)
    }

    /// 从指定索引重新开始
    fn restart_at(&mut self, start_index: usize) -> Result<(), AppError> {
        let (interpreter, replay) = Interpreter::resume_at(self.script.clone(), start_index);
        info!(
            start = interpreter.position(),
            replayed = replay.len(),
            total = self.script.len(),
            "会话开始"
        );

        self.interpreter = interpreter;
        self.presentation = PresentationState::new();
        self.overlays.clear();
        self.pending = Pending::None;

        self.executor.execute_silent(
            &replay,
            &mut self.presentation,
            self.state.resolver.as_mut(),
            &mut self.state.audio,
        );
        self.advance(None)
    }

    /// 推进解释器并执行产生的指令
    fn advance(&mut self, input: Option<RuntimeInput>) -> Result<(), AppError> {
        let (commands, waiting) = self.interpreter.tick(input)?;
        let result = self.executor.execute_batch(
            &commands,
            &mut self.presentation,
            self.state.resolver.as_mut(),
            &mut self.state.audio,
        );

        self.pending = match result {
            ExecuteResult::Ok => Pending::None,
            ExecuteResult::WaitForClick => Pending::Click,
            ExecuteResult::Animate(animation) => Pending::Animation(animation),
            ExecuteResult::RunMiniGame(kind) => Pending::MiniGame(kind),
        };
        debug!(
            waiting = ?waiting,
            active = self.interpreter.active_index(),
            commands = commands.len(),
            "解释器推进"
        );
        Ok(())
    }

    /// 运行会话直到结束
    pub fn run(&mut self, frontend: &mut dyn Frontend) -> Result<SessionExit, AppError> {
        loop {
            if frontend.quit_requested() {
                return Ok(self.quit());
            }

            if let Pending::MiniGame(kind) = self.pending {
                let outcome = self.state.minigames.run(kind, frontend);
                if frontend.quit_requested() {
                    return Ok(self.quit());
                }
                self.record_outcome(kind, outcome);
                self.advance(Some(RuntimeInput::minigame_finished(outcome)))?;
                continue;
            }

            for event in frontend.poll_events() {
                if event == InputEvent::Quit {
                    return Ok(self.quit());
                }
                if let Some(exit) = self.handle_event(&event)? {
                    return Ok(exit);
                }
            }

            if self.pending == Pending::None && self.interpreter.is_finished() {
                info!(position = self.interpreter.position(), "脚本执行完毕");
                return Ok(SessionExit::Finished);
            }

            frontend.present(&self.frame());
            frontend.wait_frame();

            if let Pending::Animation(animation) = &mut self.pending {
                animation.step();
                animation.apply(&mut self.presentation);
                if animation.is_finished() {
                    self.advance(Some(RuntimeInput::AnimationFinished))?;
                }
            }
        }
    }

    /// 处理一个输入事件
    fn handle_event(&mut self, event: &InputEvent) -> Result<Option<SessionExit>, AppError> {
        let layout = self.state.layout;

        if let Some(action) = self.overlays.handle(event, &layout, &self.state.saves) {
            match action {
                OverlayAction::ReturnToMenu => {
                    info!("返回主菜单");
                    self.interpreter.terminate();
                    return Ok(Some(SessionExit::ReturnToMenu));
                }
                OverlayAction::LoadSlot(slot) => self.load_slot(slot)?,
                OverlayAction::None | OverlayAction::Dismiss => {}
            }
            return Ok(None);
        }

        // 非对话状态下（动画期间）的输入忽略
        if self.pending != Pending::Click {
            return Ok(None);
        }

        if let InputEvent::PrimaryClick { x, y } = *event {
            if layout.hud_save().contains(x, y) {
                self.save_to(QUICK_SAVE_SLOT);
                return Ok(None);
            }
            if layout.hud_load().contains(x, y) {
                self.overlays.push(Overlay::save_load(&self.state.saves));
                return Ok(None);
            }
        }

        if *event == InputEvent::Key(Key::Escape) {
            self.overlays.push(Overlay::PauseMenu);
            return Ok(None);
        }

        if let Some(input) = advance_input(event, self.interpreter.waiting()) {
            self.presentation.dialogue = None;
            self.advance(Some(input))?;
        }
        Ok(None)
    }

    /// 读档
    fn load_slot(&mut self, slot: u32) -> Result<(), AppError> {
        let Some(record) = self.state.saves.load(slot) else {
            warn!(slot = slot, "存档无法读取");
            return Ok(());
        };

        info!(slot = slot, index = record.current_command_index, "读档");
        self.state.audio.stop_all();
        self.restart_at(record.current_command_index)
    }

    /// 存档到槽位（失败只记录日志）
    fn save_to(&mut self, slot: u32) {
        let index = self.interpreter.active_index();
        if let Err(e) = self.state.saves.save(index, slot) {
            warn!(slot = slot, index = index, error = %e, "存档失败");
        }
    }

    /// 小游戏结束
    ///
    /// 正常完成或胜利时解锁同名画廊条目（未配置则忽略）。
    fn record_outcome(&mut self, kind: MiniGameKind, outcome: MiniGameOutcome) {
        if matches!(outcome, MiniGameOutcome::Completed | MiniGameOutcome::Won)
            && let Err(e) = self.state.gallery.unlock_item(kind.name())
        {
            warn!(kind = %kind, error = %e, "画廊进度保存失败");
        }
    }

    /// 退出
    ///
    /// 阻塞状态下先按当前活动指令的索引自动存档。
    fn quit(&mut self) -> SessionExit {
        if self.interpreter.waiting().is_waiting() {
            info!(index = self.interpreter.active_index(), "退出前自动存档");
            self.save_to(QUICK_SAVE_SLOT);
        }
        self.interpreter.terminate();
        SessionExit::Quit
    }

    /// 当前帧画面
    pub fn frame(&self) -> FrameView {
        let layout = &self.state.layout;
        if let Some(frame) = self.overlays.frame(layout) {
            return frame;
        }

        let frame = FrameView::from_presentation(&self.presentation, layout);
        if self.pending == Pending::Click {
            frame
                .with_hotspot(HUD_SAVE, layout.hud_save())
                .with_hotspot(HUD_LOAD, layout.hud_load())
                .interactive(true)
        } else {
            frame
        }
    }

    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    pub fn snapshot(&self) -> PresentationSnapshot {
        self.presentation.snapshot()
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// 是否有打开的菜单
    pub fn overlay_open(&self) -> bool {
        !self.overlays.is_empty()
    }
}
