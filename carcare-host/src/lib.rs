//! # Host 层
//!
//! CarCare 视觉小说的宿主层实现。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 资源解析与默认角色表
//! - 音频通道
//! - 输入采集与命中测试
//! - 将 Runtime 的 Command 转换为展示状态
//! - 存档、画廊、菜单覆盖层与小游戏调度
//!
//! Host 层不包含脚本逻辑，只负责执行 Runtime 发出的 Command。
//! 窗口与绘制由 [`Frontend`] 的实现提供。

pub mod animation;
pub mod app;
pub mod audio;
pub mod characters;
pub mod command_executor;
pub mod config;
pub mod error;
pub mod frontend;
pub mod gallery;
pub mod input;
pub mod minigame;
pub mod overlay;
pub mod presentation;
pub mod resources;
pub mod save_manager;
pub mod session;
pub mod state;

pub use animation::{Animation, DelayAnimation, FadeAnimation, ZoomAnimation};
pub use app::App;
pub use audio::{AudioBackend, AudioChannels, Channel, NullAudioBackend};
pub use characters::{CharacterDef, CharacterRegistry};
pub use command_executor::{CommandExecutor, ExecuteResult};
pub use config::{AppConfig, AudioConfig, ConfigError, DebugConfig, WindowConfig};
pub use error::AppError;
pub use frontend::{FrameView, Frontend, HeadlessFrontend, TerminalFrontend};
pub use gallery::{GalleryCard, GalleryItem, GallerySystem, GalleryUnlockSet};
pub use input::{InputEvent, Key, Layout, Rect};
pub use minigame::{MiniGame, MiniGameRegistry};
pub use overlay::{Overlay, OverlayAction, OverlayStack};
pub use presentation::{PresentationSnapshot, PresentationState, ScreenPosition};
pub use resources::{AssetResolver, BackgroundHandle, CharacterHandle, FsAssetResolver, ResourceError};
pub use save_manager::{SaveManager, SlotInfo};
pub use session::{PlaySession, SessionExit};
pub use state::HostState;
