//! Command Executor 类型定义

use carcare_runtime::MiniGameKind;

use crate::animation::Animation;

/// Command 执行结果
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ExecuteResult {
    /// 执行成功，继续
    #[default]
    Ok,
    /// 对话已显示，等待玩家点击
    WaitForClick,
    /// 需要逐帧播放阻塞动画
    Animate(Animation),
    /// 需要运行小游戏
    RunMiniGame(MiniGameKind),
}

impl ExecuteResult {
    /// 是否需要阻塞
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Self::Ok)
    }
}
