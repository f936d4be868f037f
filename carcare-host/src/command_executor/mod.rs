//! # Command Executor 模块
//!
//! Command 执行器，负责将 Runtime 发出的 Command 转换为实际操作。
//!
//! ## 设计说明
//!
//! - `CommandExecutor` 接收 `Command`，更新 `PresentationState` 和控制音频
//! - 执行器不直接渲染，只更新状态，渲染由前端负责
//! - 阻塞行为（等待点击、动画、小游戏）通过 `ExecuteResult` 交给会话处理
//! - 任何指令都不会失败：资源问题在解析器和音频管理器内降级
//!
//! ## 模块结构
//!
//! - `audio`: 音频命令执行
//! - `background`: 背景与画面效果命令执行
//! - `character`: 角色命令执行
//! - `ui`: 对话框命令执行
//! - `types`: 类型定义

mod audio;
mod background;
mod character;
mod types;
mod ui;

pub use types::*;

use carcare_runtime::Command;
use tracing::debug;

use crate::audio::AudioChannels;
use crate::presentation::PresentationState;
use crate::resources::AssetResolver;

/// Command 执行器
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    /// 帧率（动画帧数计算）
    frame_rate: u32,
    /// 对话框每行字数
    dialogue_columns: usize,
}

impl CommandExecutor {
    /// 创建新的 Command 执行器
    pub fn new(frame_rate: u32, dialogue_columns: usize) -> Self {
        Self {
            frame_rate: frame_rate.max(1),
            dialogue_columns: dialogue_columns.max(1),
        }
    }

    /// 执行单个 Command
    pub fn execute(
        &mut self,
        command: &Command,
        presentation: &mut PresentationState,
        resolver: &mut dyn AssetResolver,
        audio: &mut AudioChannels,
    ) -> ExecuteResult {
        match command {
            Command::ShowBackground { file } => {
                self.execute_show_background(file, presentation, resolver)
            }
            Command::ShowCharacter { name, position } => {
                self.execute_show_character(name, *position, presentation, resolver)
            }
            Command::HideCharacter => self.execute_hide_character(presentation),
            Command::ShowText { speaker, text } => {
                self.execute_show_text(speaker.as_deref(), text, presentation)
            }
            Command::PlaySfx { file } => self.execute_play_sfx(file, audio),
            Command::PlayAmbient { file } => self.execute_play_ambient(file, audio),
            Command::StopAmbient => self.execute_stop_ambient(audio),
            Command::PlayMusic { file, looping } => self.execute_play_music(file, *looping, audio),
            Command::StopMusic => self.execute_stop_music(audio),
            Command::Fade { color, duration } => self.execute_fade(*color, *duration, presentation),
            Command::Wait { duration } => self.execute_wait(*duration, presentation),
            Command::LaunchMiniGame { kind } => {
                debug!(kind = %kind, "启动小游戏");
                ExecuteResult::RunMiniGame(*kind)
            }
        }
    }

    /// 批量执行 Commands
    ///
    /// 执行一组 Commands，返回最后一个需要等待的结果。
    pub fn execute_batch(
        &mut self,
        commands: &[Command],
        presentation: &mut PresentationState,
        resolver: &mut dyn AssetResolver,
        audio: &mut AudioChannels,
    ) -> ExecuteResult {
        let mut last_result = ExecuteResult::Ok;

        for command in commands {
            let result = self.execute(command, presentation, resolver, audio);
            if result.is_blocking() {
                last_result = result;
            }
        }

        last_result
    }

    /// 快进回放
    ///
    /// 只应用背景与角色指令，其他指令（对话、音频、动画、小游戏）忽略。
    pub fn execute_silent(
        &mut self,
        commands: &[Command],
        presentation: &mut PresentationState,
        resolver: &mut dyn AssetResolver,
        audio: &mut AudioChannels,
    ) {
        for command in commands.iter().filter(|c| c.is_presentation()) {
            self.execute(command, presentation, resolver, audio);
        }
        debug!(count = commands.len(), "快进回放完成");
    }
}
