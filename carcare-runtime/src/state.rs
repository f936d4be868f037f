//! # State 模块
//!
//! 定义解释器的运行时状态和等待模型。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**，由 [`Interpreter`](crate::Interpreter) 独占
//! - 核心只记录可识别的字符串（背景路径、角色名），资源句柄属于 Host
//! - 不允许隐式全局状态

use serde::{Deserialize, Serialize};

use crate::command::Position;
use crate::minigame::{MiniGameKind, MiniGameOutcome};

/// 等待原因
///
/// Runtime 在执行过程中可能进入等待状态，需要特定输入才能继续。
/// Host 根据此状态决定如何采集输入。
///
/// # 状态转换
///
/// ```text
/// None             -> 继续执行，不等待
/// WaitForClick     -> 等待用户点击，收到 Click 输入后继续
/// WaitForAnimation -> Host 播放动画，结束后发送 AnimationFinished
/// WaitForMiniGame  -> Host 运行小游戏子循环，结束后发送 MiniGameFinished
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WaitingReason {
    /// 不等待，继续执行
    #[default]
    None,

    /// 等待用户点击
    WaitForClick,

    /// 等待动画（淡入、等待、缩放）播放完毕
    WaitForAnimation,

    /// 等待小游戏结束
    WaitForMiniGame(MiniGameKind),
}

impl WaitingReason {
    /// 是否处于等待状态
    pub fn is_waiting(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// 创建等待点击状态
    pub fn click() -> Self {
        Self::WaitForClick
    }

    /// 创建等待动画状态
    pub fn animation() -> Self {
        Self::WaitForAnimation
    }

    /// 创建等待小游戏状态
    pub fn minigame(kind: MiniGameKind) -> Self {
        Self::WaitForMiniGame(kind)
    }
}

/// 解释器阶段
///
/// 菜单覆盖层（暂停 / 存读档）属于 Host，叠加在这些阶段之上。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// 正在执行指令
    Running,
    /// 对话显示中，等待推进
    AwaitingAdvance,
    /// 控制权已交给小游戏
    InMiniGame,
    /// 淡入 / 等待动画播放中
    Animating,
    /// 脚本执行完毕或会话被终止
    Terminated,
}

/// 当前显示的角色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRef {
    /// 角色名
    pub name: String,
    /// 显式位置（None 表示使用角色默认位置）
    pub position: Option<Position>,
}

/// 解释器状态
///
/// 这是解释器的**唯一可变状态**。
///
/// # 设计说明
///
/// - `position`：下一条待执行指令的索引，只在读档恢复时回退
/// - `active_index`：最近一条已执行指令的索引；阻塞时即阻塞指令本身
/// - `current_background` / `current_character`：用于快进回放后的状态比对
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterpreterState {
    /// 下一条待执行指令的索引
    pub position: usize,

    /// 最近一条已执行指令的索引
    pub active_index: usize,

    /// 当前等待状态
    pub waiting: WaitingReason,

    /// 当前背景路径
    pub current_background: Option<String>,

    /// 当前角色
    pub current_character: Option<CharacterRef>,

    /// 最近一次小游戏结果
    pub last_outcome: Option<MiniGameOutcome>,

    /// 会话是否已被 Host 终止
    pub terminated: bool,
}

impl InterpreterState {
    /// 前进到下一条指令
    pub fn advance(&mut self) {
        self.position += 1;
    }

    /// 进入等待状态
    pub fn wait(&mut self, reason: WaitingReason) {
        self.waiting = reason;
    }

    /// 清除等待状态
    pub fn clear_wait(&mut self) {
        self.waiting = WaitingReason::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_reason() {
        assert!(!WaitingReason::None.is_waiting());
        assert!(WaitingReason::click().is_waiting());
        assert!(WaitingReason::animation().is_waiting());
        assert!(WaitingReason::minigame(MiniGameKind::Fuse).is_waiting());
    }

    #[test]
    fn test_interpreter_state() {
        let mut state = InterpreterState::default();
        assert_eq!(state.position, 0);
        assert!(!state.waiting.is_waiting());

        state.advance();
        assert_eq!(state.position, 1);

        state.wait(WaitingReason::click());
        assert!(state.waiting.is_waiting());

        state.clear_wait();
        assert!(!state.waiting.is_waiting());
    }
}
