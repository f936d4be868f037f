//! # MiniGame 模块
//!
//! 小游戏调度边界。
//!
//! 每个小游戏都是不透明的子循环：不接收脚本参数，运行期间独占前端的输入与渲染，
//! 自己决定何时结束，结束时返回 [`MiniGameOutcome`]。会话把结果交给 Runtime，
//! 但结果不会改变脚本流程。

use std::collections::HashMap;
use tracing::{info, warn};

use carcare_runtime::{MiniGameKind, MiniGameOutcome};

use crate::frontend::{FrameView, Frontend};
use crate::input::{InputEvent, Key, Layout};

/// 小游戏入口
pub trait MiniGame {
    /// 运行直到小游戏自己的退出条件满足
    fn run(&mut self, frontend: &mut dyn Frontend) -> MiniGameOutcome;
}

/// 立即结束的小游戏（未注册种类的回退）
#[derive(Debug, Default)]
pub struct SkipMiniGame;

impl MiniGame for SkipMiniGame {
    fn run(&mut self, _frontend: &mut dyn Frontend) -> MiniGameOutcome {
        MiniGameOutcome::Completed
    }
}

/// 占位小游戏
///
/// 显示一个说明画面：点击 Finish 或回车结束，Escape 或关闭窗口视为中途退出。
#[derive(Debug)]
pub struct PlaceholderMiniGame {
    kind: MiniGameKind,
    layout: Layout,
}

impl PlaceholderMiniGame {
    pub fn new(kind: MiniGameKind, layout: Layout) -> Self {
        Self { kind, layout }
    }

    fn frame(&self) -> FrameView {
        FrameView::menu(format!("Mini-game: {}", self.kind))
            .with_line("Press Finish to return to the story")
            .with_hotspot("Finish", self.layout.pause_return())
    }
}

impl MiniGame for PlaceholderMiniGame {
    fn run(&mut self, frontend: &mut dyn Frontend) -> MiniGameOutcome {
        let frame = self.frame();
        let finish = self.layout.pause_return();

        loop {
            if frontend.quit_requested() {
                return MiniGameOutcome::Aborted;
            }

            for event in frontend.poll_events() {
                match event {
                    InputEvent::PrimaryClick { x, y } if finish.contains(x, y) => {
                        return MiniGameOutcome::Completed;
                    }
                    InputEvent::Key(Key::Enter) | InputEvent::Key(Key::Space) => {
                        return MiniGameOutcome::Completed;
                    }
                    InputEvent::Key(Key::Escape) | InputEvent::Quit => {
                        return MiniGameOutcome::Aborted;
                    }
                    _ => {}
                }
            }

            frontend.present(&frame);
            frontend.wait_frame();
        }
    }
}

/// 小游戏注册表
#[derive(Default)]
pub struct MiniGameRegistry {
    games: HashMap<MiniGameKind, Box<dyn MiniGame>>,
}

impl MiniGameRegistry {
    /// 空注册表，所有种类都回退为立即结束
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有种类都注册占位小游戏
    pub fn with_placeholders(layout: Layout) -> Self {
        let mut registry = Self::new();
        for kind in MiniGameKind::ALL {
            registry.register(kind, PlaceholderMiniGame::new(kind, layout));
        }
        registry
    }

    pub fn register(&mut self, kind: MiniGameKind, game: impl MiniGame + 'static) {
        self.games.insert(kind, Box::new(game));
    }

    pub fn contains(&self, kind: MiniGameKind) -> bool {
        self.games.contains_key(&kind)
    }

    /// 运行小游戏
    pub fn run(&mut self, kind: MiniGameKind, frontend: &mut dyn Frontend) -> MiniGameOutcome {
        let outcome = match self.games.get_mut(&kind) {
            Some(game) => game.run(frontend),
            None => {
                warn!(kind = %kind, "小游戏未注册，直接跳过");
                SkipMiniGame.run(frontend)
            }
        };
        info!(kind = %kind, outcome = ?outcome, "小游戏结束");
        outcome
    }
}

impl std::fmt::Debug for MiniGameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&MiniGameKind> = self.games.keys().collect();
        kinds.sort_by_key(|kind| kind.name());
        f.debug_struct("MiniGameRegistry").field("games", &kinds).finish()
    }
}
