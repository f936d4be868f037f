//! # Engine 模块
//!
//! 脚本解释器核心执行引擎。
//!
//! ## 执行模型
//!
//! ```text
//! tick(input) -> (Vec<Command>, WaitingReason)
//! ```
//!
//! 1. 检查当前等待状态
//! 2. 根据 input 决定是否解除等待
//! 3. 若不再等待，继续执行脚本直到下一个阻塞点
//! 4. 返回执行过程中产生的 Command 和新的等待状态
//!
//! 游标在阻塞之前就已越过阻塞指令；阻塞指令本身的索引保存在
//! `active_index` 中，退出时的自动存档记录的是这个索引。

use crate::command::Command;
use crate::error::RuntimeError;
use crate::input::RuntimeInput;
use crate::minigame::MiniGameOutcome;
use crate::runtime::executor::Executor;
use crate::script::Script;
use crate::state::{InterpreterState, Phase, WaitingReason};

/// 脚本解释器
///
/// # 使用示例
///
/// ```ignore
/// let script = Script::from_json(text)?;
/// let (mut interpreter, replay) = Interpreter::resume_at(script, saved_index);
///
/// // Host 先应用快进回放产生的 commands...
///
/// loop {
///     let (commands, waiting) = interpreter.tick(input)?;
///
///     // Host 执行 commands...
///
///     // 根据 waiting 采集输入...
/// }
/// ```
#[derive(Debug)]
pub struct Interpreter {
    /// 当前脚本
    script: Script,
    /// 解释器状态
    state: InterpreterState,
    /// 指令执行器
    executor: Executor,
}

impl Interpreter {
    /// 从脚本开头创建解释器
    pub fn new(script: Script) -> Self {
        Self {
            script,
            state: InterpreterState::default(),
            executor: Executor::new(),
        }
    }

    /// 从指定索引恢复（读档）
    ///
    /// 先以快进模式回放 `0..start_index` 的指令：只重建背景与角色，
    /// 对话不等待、小游戏不运行、音频和动画不重放。
    /// `start_index` 超出脚本长度时截断为长度。
    ///
    /// # 返回
    ///
    /// - 定位到 `start_index` 的解释器
    /// - 快进回放产生的展示类 Command（按原顺序）
    pub fn resume_at(script: Script, start_index: usize) -> (Self, Vec<Command>) {
        let start = start_index.min(script.len());
        let mut state = InterpreterState::default();
        let mut executor = Executor::new();

        let mut commands = Vec::new();
        for command in script.iter().take(start) {
            commands.extend(executor.replay(command, &mut state));
        }

        state.position = start;
        state.active_index = start;

        let interpreter = Self {
            script,
            state,
            executor,
        };
        (interpreter, commands)
    }

    /// 核心驱动函数
    ///
    /// 根据输入推进脚本执行，返回产生的 Command 和新的等待状态。
    ///
    /// # 参数
    ///
    /// - `input`: Host 传入的输入（可选）
    ///
    /// # 返回
    ///
    /// - `Vec<Command>`: 本次 tick 产生的所有指令
    /// - `WaitingReason`: 新的等待状态
    pub fn tick(
        &mut self,
        input: Option<RuntimeInput>,
    ) -> Result<(Vec<Command>, WaitingReason), RuntimeError> {
        if self.state.terminated {
            return Err(RuntimeError::ScriptEnded);
        }

        let mut commands = Vec::new();

        // 1. 处理输入，尝试解除等待
        if let Some(input) = input {
            self.handle_input(input)?;
        }

        // 2. 如果仍在等待，直接返回
        if self.state.waiting.is_waiting() {
            return Ok((commands, self.state.waiting.clone()));
        }

        // 3. 继续执行脚本直到阻塞或结束
        while let Some(command) = self.script.get(self.state.position) {
            self.state.active_index = self.state.position;
            let result = self.executor.execute(command, &mut self.state);
            commands.extend(result.commands);

            // 先前进，再等待
            self.state.advance();

            if let Some(reason) = result.waiting {
                self.state.wait(reason.clone());
                return Ok((commands, reason));
            }
        }

        Ok((commands, WaitingReason::None))
    }

    /// 处理输入，解除等待状态
    fn handle_input(&mut self, input: RuntimeInput) -> Result<(), RuntimeError> {
        match (&self.state.waiting, input) {
            (WaitingReason::WaitForClick, RuntimeInput::Click) => {
                self.state.clear_wait();
                Ok(())
            }

            (WaitingReason::WaitForAnimation, RuntimeInput::AnimationFinished) => {
                self.state.clear_wait();
                Ok(())
            }

            // 结果只记录，不影响流程
            (WaitingReason::WaitForMiniGame(_), RuntimeInput::MiniGameFinished { outcome }) => {
                self.state.last_outcome = Some(outcome);
                self.state.clear_wait();
                Ok(())
            }

            // 不等待时收到点击，忽略
            (WaitingReason::None, RuntimeInput::Click) => Ok(()),

            (waiting, input) => Err(RuntimeError::StateMismatch {
                expected: format!("{:?}", waiting),
                actual: format!("{:?}", input),
            }),
        }
    }

    /// 终止会话（退出或返回主菜单）
    pub fn terminate(&mut self) {
        self.state.clear_wait();
        self.state.terminated = true;
    }

    /// 当前阶段
    pub fn phase(&self) -> Phase {
        match self.state.waiting {
            _ if self.state.terminated => Phase::Terminated,
            WaitingReason::WaitForClick => Phase::AwaitingAdvance,
            WaitingReason::WaitForAnimation => Phase::Animating,
            WaitingReason::WaitForMiniGame(_) => Phase::InMiniGame,
            WaitingReason::None if self.state.position >= self.script.len() => Phase::Terminated,
            WaitingReason::None => Phase::Running,
        }
    }

    /// 当前活动指令的索引
    ///
    /// 阻塞时为阻塞指令本身；否则为下一条待执行指令。
    pub fn active_index(&self) -> usize {
        if self.state.waiting.is_waiting() {
            self.state.active_index
        } else {
            self.state.position
        }
    }

    /// 下一条待执行指令的索引
    pub fn position(&self) -> usize {
        self.state.position
    }

    /// 获取当前等待状态
    pub fn waiting(&self) -> &WaitingReason {
        &self.state.waiting
    }

    /// 最近一次小游戏结果
    pub fn last_outcome(&self) -> Option<MiniGameOutcome> {
        self.state.last_outcome
    }

    /// 获取当前状态
    pub fn state(&self) -> &InterpreterState {
        &self.state
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// 检查脚本是否执行完毕
    pub fn is_finished(&self) -> bool {
        self.phase() == Phase::Terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigame::MiniGameKind;
    use crate::script::ScriptCommand;

    fn dialogue(text: &str) -> ScriptCommand {
        ScriptCommand::Dialogue {
            speaker: None,
            text: text.to_string(),
        }
    }

    fn background(file: &str) -> ScriptCommand {
        ScriptCommand::Background {
            file: file.to_string(),
        }
    }

    #[test]
    fn test_interpreter_creation() {
        let interpreter = Interpreter::new(Script::new(vec![dialogue("1")]));
        assert_eq!(interpreter.position(), 0);
        assert_eq!(interpreter.phase(), Phase::Running);
        assert!(!interpreter.waiting().is_waiting());
    }

    #[test]
    fn test_tick_dialogue() {
        let script = Script::new(vec![background("a.png"), dialogue("Hello"), dialogue("World")]);
        let mut interpreter = Interpreter::new(script);

        let (commands, waiting) = interpreter.tick(None).unwrap();
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            &commands[1],
            Command::ShowText { speaker: None, text } if text == "Hello"
        ));
        assert_eq!(waiting, WaitingReason::WaitForClick);
        assert_eq!(interpreter.phase(), Phase::AwaitingAdvance);
        assert_eq!(interpreter.position(), 2);
        assert_eq!(interpreter.active_index(), 1);

        let (commands, waiting) = interpreter.tick(Some(RuntimeInput::Click)).unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(waiting, WaitingReason::WaitForClick);
        assert_eq!(interpreter.active_index(), 2);
    }

    #[test]
    fn test_tick_without_input_keeps_waiting() {
        let mut interpreter = Interpreter::new(Script::new(vec![dialogue("1"), dialogue("2")]));
        interpreter.tick(None).unwrap();

        let (commands, waiting) = interpreter.tick(None).unwrap();
        assert!(commands.is_empty());
        assert_eq!(waiting, WaitingReason::WaitForClick);
        assert_eq!(interpreter.active_index(), 0);
    }

    #[test]
    fn test_script_end() {
        let mut interpreter = Interpreter::new(Script::new(vec![background("bg.png")]));

        let (commands, waiting) = interpreter.tick(None).unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(waiting, WaitingReason::None);
        assert!(interpreter.is_finished());

        // 结束后点击被忽略
        let (commands, _) = interpreter.tick(Some(RuntimeInput::Click)).unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn test_empty_script_is_terminated() {
        let mut interpreter = Interpreter::new(Script::default());
        assert_eq!(interpreter.phase(), Phase::Terminated);
        let (commands, waiting) = interpreter.tick(None).unwrap();
        assert!(commands.is_empty());
        assert_eq!(waiting, WaitingReason::None);
    }

    #[test]
    fn test_state_mismatch() {
        let mut interpreter = Interpreter::new(Script::new(vec![dialogue("1")]));
        interpreter.tick(None).unwrap();

        let result = interpreter.tick(Some(RuntimeInput::AnimationFinished));
        assert!(matches!(result, Err(RuntimeError::StateMismatch { .. })));
        // 错误不改变状态
        assert_eq!(interpreter.phase(), Phase::AwaitingAdvance);
    }

    #[test]
    fn test_animation_blocks_until_finished() {
        let script = Script::new(vec![ScriptCommand::Wait { duration: 1.0 }, background("b.png")]);
        let mut interpreter = Interpreter::new(script);

        let (_, waiting) = interpreter.tick(None).unwrap();
        assert_eq!(waiting, WaitingReason::WaitForAnimation);
        assert_eq!(interpreter.phase(), Phase::Animating);

        // 动画期间的点击不能推进
        assert!(interpreter.tick(Some(RuntimeInput::Click)).is_err());

        let (commands, waiting) = interpreter
            .tick(Some(RuntimeInput::AnimationFinished))
            .unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(waiting, WaitingReason::None);
    }

    #[test]
    fn test_minigame_outcome_does_not_change_flow() {
        for outcome in [MiniGameOutcome::Won, MiniGameOutcome::Lost, MiniGameOutcome::Aborted] {
            let script = Script::new(vec![
                ScriptCommand::MiniGame {
                    kind: MiniGameKind::Fuse,
                },
                dialogue("after"),
            ]);
            let mut interpreter = Interpreter::new(script);

            let (_, waiting) = interpreter.tick(None).unwrap();
            assert_eq!(waiting, WaitingReason::WaitForMiniGame(MiniGameKind::Fuse));
            assert_eq!(interpreter.phase(), Phase::InMiniGame);

            let (commands, _) = interpreter
                .tick(Some(RuntimeInput::MiniGameFinished { outcome }))
                .unwrap();
            assert!(matches!(&commands[0], Command::ShowText { text, .. } if text == "after"));
            assert_eq!(interpreter.last_outcome(), Some(outcome));
        }
    }

    #[test]
    fn test_resume_at_replays_presentation_only() {
        let script = Script::new(vec![
            background("a.png"),
            ScriptCommand::Character {
                name: "Nova".to_string(),
                position: None,
            },
            dialogue("seen"),
            ScriptCommand::Quiz,
            background("b.png"),
            dialogue("resume here"),
        ]);

        let (mut interpreter, replay) = Interpreter::resume_at(script, 5);
        assert_eq!(
            replay,
            vec![
                Command::ShowBackground {
                    file: "a.png".to_string()
                },
                Command::ShowCharacter {
                    name: "Nova".to_string(),
                    position: None
                },
                Command::ShowBackground {
                    file: "b.png".to_string()
                },
            ]
        );
        assert_eq!(interpreter.position(), 5);
        assert_eq!(interpreter.state().current_background.as_deref(), Some("b.png"));

        let (commands, _) = interpreter.tick(None).unwrap();
        assert!(matches!(&commands[0], Command::ShowText { text, .. } if text == "resume here"));
    }

    #[test]
    fn test_resume_at_clamps_index() {
        let (interpreter, replay) = Interpreter::resume_at(Script::new(vec![background("a.png")]), 99);
        assert_eq!(interpreter.position(), 1);
        assert_eq!(replay.len(), 1);
        assert!(interpreter.is_finished());
    }

    #[test]
    fn test_terminate() {
        let mut interpreter = Interpreter::new(Script::new(vec![dialogue("1"), dialogue("2")]));
        interpreter.tick(None).unwrap();
        interpreter.terminate();

        assert_eq!(interpreter.phase(), Phase::Terminated);
        assert_eq!(interpreter.tick(None), Err(RuntimeError::ScriptEnded));
    }
}
