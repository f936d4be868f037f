//! # Config 模块
//!
//! 运行时配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 配置文件 (config.json)
//! 2. 默认值（最低）
//!
//! 没有命令行参数和环境变量。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// 配置文件默认路径（工作目录下）
pub const CONFIG_FILE: &str = "config.json";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 资源根目录
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,

    /// 存档目录
    #[serde(default = "default_saves_dir")]
    pub saves_dir: PathBuf,

    /// 脚本路径（相对于工作目录）
    #[serde(default = "default_script_path")]
    pub script_path: PathBuf,

    /// 角色表路径，文件不存在时使用内置角色表
    #[serde(default = "default_characters_path")]
    pub characters_path: PathBuf,

    /// 画廊条目配置路径
    #[serde(default = "default_gallery_config_path")]
    pub gallery_config_path: PathBuf,

    /// 画廊解锁进度路径
    #[serde(default = "default_gallery_progress_path")]
    pub gallery_progress_path: PathBuf,

    /// 存档槽位数量（槽位编号 1..=max_saves）
    #[serde(default = "default_max_saves")]
    pub max_saves: u32,

    /// 帧率（动画和主循环节奏）
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,
}

/// 窗口配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_window_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_window_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_window_title")]
    pub title: String,

    /// 是否全屏
    #[serde(default = "default_fullscreen")]
    pub fullscreen: bool,
}

/// 音频配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// 音乐音量 (0.0 - 1.0)
    #[serde(default = "default_music_volume")]
    pub music_volume: f32,

    /// 音效音量 (0.0 - 1.0)，默认衰减到 0.3
    #[serde(default = "default_sfx_volume")]
    pub sfx_volume: f32,

    /// 环境音音量 (0.0 - 1.0)
    #[serde(default = "default_ambient_volume")]
    pub ambient_volume: f32,

    /// 是否静音
    #[serde(default)]
    pub muted: bool,
}

/// 调试配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// 日志级别（trace / debug / info / warn / error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// 默认值函数
fn default_assets_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_saves_dir() -> PathBuf {
    PathBuf::from("saves")
}

fn default_script_path() -> PathBuf {
    PathBuf::from("script.json")
}

fn default_characters_path() -> PathBuf {
    PathBuf::from("characters.json")
}

fn default_gallery_config_path() -> PathBuf {
    PathBuf::from("gallery_config.json")
}

fn default_gallery_progress_path() -> PathBuf {
    PathBuf::from("gallery_progress.json")
}

fn default_max_saves() -> u32 {
    3
}

fn default_frame_rate() -> u32 {
    60
}

fn default_window_width() -> u32 {
    1000
}

fn default_window_height() -> u32 {
    800
}

fn default_window_title() -> String {
    "CarCare".to_string()
}

fn default_fullscreen() -> bool {
    true
}

fn default_music_volume() -> f32 {
    1.0
}

fn default_sfx_volume() -> f32 {
    0.3
}

fn default_ambient_volume() -> f32 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            saves_dir: default_saves_dir(),
            script_path: default_script_path(),
            characters_path: default_characters_path(),
            gallery_config_path: default_gallery_config_path(),
            gallery_progress_path: default_gallery_progress_path(),
            max_saves: default_max_saves(),
            frame_rate: default_frame_rate(),
            window: WindowConfig::default(),
            audio: AudioConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_window_title(),
            fullscreen: default_fullscreen(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_volume: default_music_volume(),
            sfx_volume: default_sfx_volume(),
            ambient_volume: default_ambient_volume(),
            muted: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = ?path, "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(path = ?path, error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = ?path, error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_saves < 1 {
            return Err(ConfigError::ValidationFailed(
                "max_saves 至少为 1".to_string(),
            ));
        }

        if self.frame_rate < 1 {
            return Err(ConfigError::ValidationFailed(
                "frame_rate 至少为 1".to_string(),
            ));
        }

        let volumes = [
            ("音乐", self.audio.music_volume),
            ("音效", self.audio.sfx_volume),
            ("环境音", self.audio.ambient_volume),
        ];
        for (name, volume) in volumes {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::ValidationFailed(format!(
                    "{}音量必须在 0.0 - 1.0 之间",
                    name
                )));
            }
        }

        Ok(())
    }

    /// 帧间隔（秒）
    pub fn frame_seconds(&self) -> f64 {
        1.0 / f64::from(self.frame_rate.max(1))
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
