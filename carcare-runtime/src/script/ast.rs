//! # AST 模块
//!
//! 定义脚本的结构化表示。
//!
//! ## 设计说明
//!
//! 每条指令是一个封闭的枚举变体，变体所需字段在加载时就已校验完毕。
//! 执行引擎读取 [`ScriptCommand`] 并产生 [`Command`](crate::command::Command)。

use serde::Serialize;
use serde_json::{Map, Value};

use crate::command::{FadeColor, Position, SoundChannel};
use crate::minigame::MiniGameKind;

/// 脚本指令
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptCommand {
    /// 背景切换
    Background {
        /// 背景图片路径
        file: String,
    },

    /// 显示角色
    Character {
        /// 角色名（在角色表中查找）
        name: String,
        /// 显式位置，覆盖角色默认位置
        position: Option<Position>,
    },

    /// 隐藏当前角色
    HideCharacter,

    /// 对话
    Dialogue {
        /// 说话者名称（None 表示旁白）
        speaker: Option<String>,
        /// 对话内容
        text: String,
    },

    /// 音效 / 环境音
    Sound {
        file: Option<String>,
        channel: SoundChannel,
        #[serde(rename = "loop")]
        looping: bool,
    },

    /// 音乐
    Music {
        file: Option<String>,
        #[serde(rename = "loop")]
        looping: bool,
        /// 仅在没有 `file` 时有意义：停止音乐
        stop: bool,
    },

    /// 淡入遮罩
    Fade {
        color: FadeColor,
        /// 时长（秒）
        duration: f64,
    },

    /// 等待
    Wait {
        /// 时长（秒）
        duration: f64,
    },

    /// 问答小游戏
    Quiz,

    /// 其他小游戏
    #[serde(rename = "minigame")]
    MiniGame { kind: MiniGameKind },
}

impl ScriptCommand {
    /// 指令类型名（与脚本 JSON 的 `type` 字段一致）
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Background { .. } => "background",
            Self::Character { .. } => "character",
            Self::HideCharacter => "hide_character",
            Self::Dialogue { .. } => "dialogue",
            Self::Sound { .. } => "sound",
            Self::Music { .. } => "music",
            Self::Fade { .. } => "fade",
            Self::Wait { .. } => "wait",
            Self::Quiz => "quiz",
            Self::MiniGame { .. } => "minigame",
        }
    }

    /// 是否会阻塞执行（对话、动画、小游戏）
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Self::Dialogue { .. }
                | Self::Fade { .. }
                | Self::Wait { .. }
                | Self::Quiz
                | Self::MiniGame { .. }
        )
    }
}

/// 完整脚本
///
/// 指令按插入顺序执行；播放期间脚本不可变，只有解释器的游标在移动。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    /// 指令列表
    pub commands: Vec<ScriptCommand>,
    /// `scenes` 段（除校验外不被核心使用）
    pub scenes: Map<String, Value>,
}

impl Script {
    /// 从指令列表创建脚本
    pub fn new(commands: Vec<ScriptCommand>) -> Self {
        Self {
            commands,
            scenes: Map::new(),
        }
    }

    /// 附带 `scenes` 段
    pub fn with_scenes(mut self, scenes: Map<String, Value>) -> Self {
        self.scenes = scenes;
        self
    }

    /// 获取指定索引的指令
    pub fn get(&self, index: usize) -> Option<&ScriptCommand> {
        self.commands.get(index)
    }

    /// 指令数量
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptCommand> {
        self.commands.iter()
    }
}
