//! # Input 模块
//!
//! 定义 Host 向 Runtime 传递的输入事件。
//!
//! ## 设计说明
//!
//! - `RuntimeInput` 是 Host 采集用户操作后，传递给 Runtime 的抽象输入
//! - Runtime 不直接处理鼠标/键盘事件，只处理语义化的输入
//! - 动画的逐帧推进由 Host 负责，Runtime 只关心"动画已结束"这一事件

use serde::{Deserialize, Serialize};

use crate::minigame::MiniGameOutcome;

/// Host 向 Runtime 传递的输入
///
/// Runtime 通过 `tick(input)` 接收这些输入，并根据当前等待状态决定如何处理。
///
/// # 设计说明
///
/// - `Click`：解除 `WaitForClick` 等待（对话推进）
/// - `AnimationFinished`：解除 `WaitForAnimation` 等待（淡入 / 等待 / 缩放结束）
/// - `MiniGameFinished`：解除 `WaitForMiniGame` 等待，并回传小游戏结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuntimeInput {
    /// 用户点击（解除 `WaitForClick`）
    Click,

    /// Host 侧动画播放完毕（解除 `WaitForAnimation`）
    AnimationFinished,

    /// 小游戏子循环结束（解除 `WaitForMiniGame`）
    MiniGameFinished { outcome: MiniGameOutcome },
}

impl RuntimeInput {
    /// 创建点击输入
    pub fn click() -> Self {
        Self::Click
    }

    /// 创建小游戏结束输入
    pub fn minigame_finished(outcome: MiniGameOutcome) -> Self {
        Self::MiniGameFinished { outcome }
    }
}
