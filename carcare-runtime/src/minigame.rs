//! # MiniGame 模块
//!
//! 小游戏种类与结果。
//!
//! 小游戏对 Runtime 来说是不透明的子循环：不接收脚本参数，
//! 结束时只回传一个 [`MiniGameOutcome`]，脚本流程不依据结果分支。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 小游戏种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiniGameKind {
    /// 汽车知识问答
    Quiz,
    /// 量筒液位平衡
    Tube,
    /// 引擎舱挑战
    UnderTheHood,
    /// 太空驾驶挑战
    CosmicChallenge,
    /// 保险丝记忆
    Fuse,
    /// 漏油清理
    OilSpill,
    /// 放油挑战
    OilDrain,
    /// 通用小游戏
    Generic,
}

impl MiniGameKind {
    /// 所有种类（用于注册表遍历）
    pub const ALL: [MiniGameKind; 8] = [
        Self::Quiz,
        Self::Tube,
        Self::UnderTheHood,
        Self::CosmicChallenge,
        Self::Fuse,
        Self::OilSpill,
        Self::OilDrain,
        Self::Generic,
    ];

    /// 通过 `minigame` 指令的 `kind` 字段解析
    pub fn from_kind_name(name: &str) -> Option<Self> {
        match name {
            "quiz" => Some(Self::Quiz),
            "tube" => Some(Self::Tube),
            "under_the_hood" => Some(Self::UnderTheHood),
            "cosmic_challenge" => Some(Self::CosmicChallenge),
            "fuse" => Some(Self::Fuse),
            "oil_spill" => Some(Self::OilSpill),
            "oil_drain" => Some(Self::OilDrain),
            "generic" => Some(Self::Generic),
            _ => None,
        }
    }

    /// 旧版脚本中直接以指令类型表示的小游戏
    pub fn from_legacy_type(command_type: &str) -> Option<Self> {
        match command_type {
            "tube_game" => Some(Self::Tube),
            "under_the_hood_game" => Some(Self::UnderTheHood),
            "cosmic_challenge" => Some(Self::CosmicChallenge),
            "fuse_game" => Some(Self::Fuse),
            "oil_spill_challenge" => Some(Self::OilSpill),
            "oil_drain_challenge" => Some(Self::OilDrain),
            "minigame2" => Some(Self::Generic),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Tube => "tube",
            Self::UnderTheHood => "under_the_hood",
            Self::CosmicChallenge => "cosmic_challenge",
            Self::Fuse => "fuse",
            Self::OilSpill => "oil_spill",
            Self::OilDrain => "oil_drain",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for MiniGameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 小游戏结束结果
///
/// 目前脚本是线性的，Runtime 只记录结果而不据此跳转。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MiniGameOutcome {
    /// 正常结束（无胜负概念）
    #[default]
    Completed,
    /// 胜利
    Won,
    /// 失败
    Lost,
    /// 玩家中途退出或窗口关闭
    Aborted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_name_roundtrip() {
        for kind in MiniGameKind::ALL {
            assert_eq!(MiniGameKind::from_kind_name(kind.name()), Some(kind));
        }
        assert_eq!(MiniGameKind::from_kind_name("chess"), None);
    }

    #[test]
    fn test_legacy_types() {
        assert_eq!(
            MiniGameKind::from_legacy_type("fuse_game"),
            Some(MiniGameKind::Fuse)
        );
        assert_eq!(
            MiniGameKind::from_legacy_type("minigame2"),
            Some(MiniGameKind::Generic)
        );
        assert_eq!(MiniGameKind::from_legacy_type("quiz"), None);
    }
}
