//! # Command 模块
//!
//! 定义 Runtime 向 Host 发出的所有指令。
//! Command 是 Runtime 与 Host 之间的**唯一通信方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"做什么"，不描述"怎么做"
//! - **已归一化**：音频通道的启停规则在 Runtime 内决定，Host 只负责播放
//! - **引擎无关**：不包含任何窗口、音频库的类型

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::minigame::MiniGameKind;

/// 角色立绘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// 左侧
    Left,
    /// 中央
    Center,
    /// 右侧
    Right,
}

impl Position {
    /// 从字符串解析位置（便捷方法）
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl FromStr for Position {
    type Err = ();

    /// 从字符串解析位置（不区分大小写）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" | "middle" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(()),
        }
    }
}

/// 淡入遮罩颜色
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FadeColor {
    #[default]
    Black,
    White,
}

impl FadeColor {
    /// 从脚本字符串解析（不区分大小写）
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("black") {
            Some(Self::Black)
        } else if name.eq_ignore_ascii_case("white") {
            Some(Self::White)
        } else {
            None
        }
    }

    /// RGB 颜色值
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Black => (0, 0, 0),
            Self::White => (255, 255, 255),
        }
    }
}

/// 音效通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundChannel {
    /// 一次性音效
    #[default]
    Sfx,
    /// 环境音（可循环）
    Ambient,
}

impl SoundChannel {
    /// 从脚本字符串解析（不区分大小写）
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("ambient") {
            Some(Self::Ambient)
        } else if name.eq_ignore_ascii_case("sfx") {
            Some(Self::Sfx)
        } else {
            None
        }
    }
}

/// Runtime 向 Host 发出的指令
///
/// Host 接收 Command 后，将其转换为实际的渲染、音频、小游戏调用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 切换背景
    ShowBackground {
        /// 背景图片路径
        file: String,
    },

    /// 显示角色立绘
    ShowCharacter {
        /// 角色名（在角色表中查找）
        name: String,
        /// 显式位置，None 表示使用角色默认位置
        position: Option<Position>,
    },

    /// 隐藏当前角色
    HideCharacter,

    /// 显示对话文本
    ShowText {
        /// 说话者名称（None 表示旁白）
        speaker: Option<String>,
        /// 对话内容
        text: String,
    },

    /// 在 sfx 通道播放一次性音效
    PlaySfx { file: String },

    /// 替换环境音通道内容并循环播放
    PlayAmbient { file: String },

    /// 停止环境音
    StopAmbient,

    /// 播放音乐
    PlayMusic { file: String, looping: bool },

    /// 停止音乐
    StopMusic,

    /// 屏幕淡入到指定颜色
    Fade {
        color: FadeColor,
        /// 时长（秒）
        duration: f64,
    },

    /// 等待（黑屏背景下由 Host 渲染为缩放动画）
    Wait {
        /// 时长（秒）
        duration: f64,
    },

    /// 启动小游戏
    LaunchMiniGame { kind: MiniGameKind },
}

impl Command {
    /// 是否为快进回放阶段需要重放的展示类指令
    pub fn is_presentation(&self) -> bool {
        matches!(
            self,
            Self::ShowBackground { .. } | Self::ShowCharacter { .. } | Self::HideCharacter
        )
    }
}
