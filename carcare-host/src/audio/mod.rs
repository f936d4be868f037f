//! # Audio 模块
//!
//! 音频通道管理：音乐、音效、环境音三个逻辑通道，各自独立播放 / 停止 / 循环。
//!
//! ## 功能特性
//!
//! - 音乐：循环或单次播放，可停止
//! - 音效：一次性播放，固定衰减音量
//! - 环境音：循环文件替换通道内容，停止时清空
//! - 静音：所有通道音量置 0，取消静音后恢复
//!
//! 实际输出由 [`AudioBackend`] 完成。没有音频设备时使用 [`NullAudioBackend`]，
//! 启用 `rodio` feature 后可使用 `RodioAudioBackend`。

#[cfg(feature = "rodio")]
mod rodio_backend;

#[cfg(feature = "rodio")]
pub use rodio_backend::RodioAudioBackend;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::config::AudioConfig;
use crate::resources::ResourceError;
use crate::resources::path::normalize_logical_path;

/// 逻辑音频通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Music,
    Sfx,
    Ambient,
}

/// 音频输出后端
pub trait AudioBackend {
    /// 在通道上播放文件（替换该通道当前内容）
    fn play(
        &mut self,
        channel: Channel,
        path: &Path,
        looping: bool,
        volume: f32,
    ) -> Result<(), ResourceError>;

    /// 停止通道
    fn stop(&mut self, channel: Channel);

    /// 调整通道音量
    fn set_volume(&mut self, channel: Channel, volume: f32);
}

/// 后端调用记录
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    Play {
        channel: Channel,
        path: PathBuf,
        looping: bool,
        volume: f32,
    },
    Stop(Channel),
    SetVolume(Channel, f32),
}

/// 共享的调用记录
pub type AudioCallLog = Rc<RefCell<Vec<AudioCall>>>;

/// 静音后端
///
/// 不输出声音，只记录调用；用于测试和没有音频设备的环境。
#[derive(Debug, Default)]
pub struct NullAudioBackend {
    calls: AudioCallLog,
}

impl NullAudioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取调用记录句柄
    pub fn calls(&self) -> AudioCallLog {
        Rc::clone(&self.calls)
    }
}

impl AudioBackend for NullAudioBackend {
    fn play(
        &mut self,
        channel: Channel,
        path: &Path,
        looping: bool,
        volume: f32,
    ) -> Result<(), ResourceError> {
        self.calls.borrow_mut().push(AudioCall::Play {
            channel,
            path: path.to_path_buf(),
            looping,
            volume,
        });
        Ok(())
    }

    fn stop(&mut self, channel: Channel) {
        self.calls.borrow_mut().push(AudioCall::Stop(channel));
    }

    fn set_volume(&mut self, channel: Channel, volume: f32) {
        self.calls
            .borrow_mut()
            .push(AudioCall::SetVolume(channel, volume));
    }
}

/// 单个通道的状态
#[derive(Debug, Clone, Default, PartialEq)]
struct ChannelState {
    /// 当前文件（逻辑路径）
    current: Option<String>,
    /// 是否循环
    looping: bool,
    /// 通道音量 (0.0 - 1.0)
    volume: f32,
}

/// 音频通道管理器
pub struct AudioChannels {
    backend: Box<dyn AudioBackend>,
    /// 资源基础路径
    base_path: PathBuf,
    music: ChannelState,
    sfx: ChannelState,
    ambient: ChannelState,
    /// 是否静音
    muted: bool,
}

impl AudioChannels {
    /// 创建音频通道管理器
    pub fn new(backend: Box<dyn AudioBackend>, base_path: impl AsRef<Path>, config: &AudioConfig) -> Self {
        Self {
            backend,
            base_path: base_path.as_ref().to_path_buf(),
            music: ChannelState {
                volume: config.music_volume.clamp(0.0, 1.0),
                ..ChannelState::default()
            },
            sfx: ChannelState {
                volume: config.sfx_volume.clamp(0.0, 1.0),
                ..ChannelState::default()
            },
            ambient: ChannelState {
                volume: config.ambient_volume.clamp(0.0, 1.0),
                ..ChannelState::default()
            },
            muted: config.muted,
        }
    }

    /// 使用静音后端创建（返回调用记录句柄）
    pub fn silent(config: &AudioConfig) -> (Self, AudioCallLog) {
        let backend = NullAudioBackend::new();
        let calls = backend.calls();
        (Self::new(Box::new(backend), ".", config), calls)
    }

    fn state(&self, channel: Channel) -> &ChannelState {
        match channel {
            Channel::Music => &self.music,
            Channel::Sfx => &self.sfx,
            Channel::Ambient => &self.ambient,
        }
    }

    fn state_mut(&mut self, channel: Channel) -> &mut ChannelState {
        match channel {
            Channel::Music => &mut self.music,
            Channel::Sfx => &mut self.sfx,
            Channel::Ambient => &mut self.ambient,
        }
    }

    /// 有效音量（考虑静音状态）
    fn effective_volume(&self, channel: Channel) -> f32 {
        if self.muted {
            0.0
        } else {
            self.state(channel).volume
        }
    }

    fn play(&mut self, channel: Channel, file: &str, looping: bool) {
        let logical = normalize_logical_path(file);
        let full_path = self.base_path.join(&logical);
        let volume = self.effective_volume(channel);

        match self.backend.play(channel, &full_path, looping, volume) {
            Ok(()) => {
                debug!(channel = ?channel, path = %logical, looping = looping, "开始播放");
                let state = self.state_mut(channel);
                state.current = Some(logical);
                state.looping = looping;
            }
            Err(e) => {
                warn!(channel = ?channel, path = %logical, error = %e, "音频加载失败，通道保持静音");
                self.stop(channel);
            }
        }
    }

    fn stop(&mut self, channel: Channel) {
        self.backend.stop(channel);
        let state = self.state_mut(channel);
        state.current = None;
        state.looping = false;
    }

    /// 播放音乐
    pub fn play_music(&mut self, file: &str, looping: bool) {
        self.play(Channel::Music, file, looping);
    }

    /// 停止音乐
    pub fn stop_music(&mut self) {
        self.stop(Channel::Music);
    }

    /// 播放一次性音效
    pub fn play_sfx(&mut self, file: &str) {
        self.play(Channel::Sfx, file, false);
    }

    /// 环境音：循环播放并替换通道内容
    pub fn play_ambient(&mut self, file: &str) {
        self.play(Channel::Ambient, file, true);
    }

    /// 停止环境音
    pub fn stop_ambient(&mut self) {
        self.stop(Channel::Ambient);
    }

    /// 停止所有通道
    pub fn stop_all(&mut self) {
        for channel in [Channel::Music, Channel::Sfx, Channel::Ambient] {
            self.stop(channel);
        }
    }

    /// 设置静音状态
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        for channel in [Channel::Music, Channel::Sfx, Channel::Ambient] {
            let volume = self.effective_volume(channel);
            self.backend.set_volume(channel, volume);
        }
        info!(muted = muted, "静音状态切换");
    }

    /// 切换静音状态
    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
    }

    /// 是否静音
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// 当前音乐
    pub fn current_music(&self) -> Option<&str> {
        self.music.current.as_deref()
    }

    /// 音乐是否循环
    pub fn music_looping(&self) -> bool {
        self.music.looping
    }

    /// 当前环境音
    pub fn current_ambient(&self) -> Option<&str> {
        self.ambient.current.as_deref()
    }
}

impl std::fmt::Debug for AudioChannels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioChannels")
            .field("base_path", &self.base_path)
            .field("music", &self.music)
            .field("sfx", &self.sfx)
            .field("ambient", &self.ambient)
            .field("muted", &self.muted)
            .finish()
    }
}
