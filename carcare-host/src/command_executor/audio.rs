//! # 音频相关命令执行
//!
//! 处理 PlaySfx、PlayAmbient、StopAmbient、PlayMusic、StopMusic 命令。
//! 通道启停规则已在 Runtime 内归一化，这里只转交给音频通道管理器。

use tracing::debug;

use super::CommandExecutor;
use super::types::ExecuteResult;
use crate::audio::AudioChannels;

impl CommandExecutor {
    pub(super) fn execute_play_sfx(&mut self, file: &str, audio: &mut AudioChannels) -> ExecuteResult {
        debug!(file = %file, "播放音效");
        audio.play_sfx(file);
        ExecuteResult::Ok
    }

    pub(super) fn execute_play_ambient(
        &mut self,
        file: &str,
        audio: &mut AudioChannels,
    ) -> ExecuteResult {
        debug!(file = %file, "播放环境音");
        audio.play_ambient(file);
        ExecuteResult::Ok
    }

    pub(super) fn execute_stop_ambient(&mut self, audio: &mut AudioChannels) -> ExecuteResult {
        debug!("停止环境音");
        audio.stop_ambient();
        ExecuteResult::Ok
    }

    pub(super) fn execute_play_music(
        &mut self,
        file: &str,
        looping: bool,
        audio: &mut AudioChannels,
    ) -> ExecuteResult {
        debug!(file = %file, looping = looping, "播放音乐");
        audio.play_music(file, looping);
        ExecuteResult::Ok
    }

    pub(super) fn execute_stop_music(&mut self, audio: &mut AudioChannels) -> ExecuteResult {
        debug!("停止音乐");
        audio.stop_music();
        ExecuteResult::Ok
    }
}
