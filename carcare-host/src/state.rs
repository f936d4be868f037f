//! # State 模块
//!
//! 定义 Host 层的核心状态结构。

use crate::audio::{AudioBackend, AudioChannels};
use crate::characters::CharacterRegistry;
use crate::config::AppConfig;
use crate::gallery::GallerySystem;
use crate::input::Layout;
use crate::minigame::MiniGameRegistry;
use crate::resources::{AssetResolver, FsAssetResolver};
use crate::save_manager::SaveManager;

/// Host 层状态
///
/// 一次进程内只有一份：会话、菜单和画廊共用这些服务。
pub struct HostState {
    pub config: AppConfig,
    pub layout: Layout,
    pub resolver: Box<dyn AssetResolver>,
    pub audio: AudioChannels,
    pub saves: SaveManager,
    pub minigames: MiniGameRegistry,
    pub gallery: GallerySystem,
}

impl HostState {
    /// 按配置构建所有服务
    ///
    /// 小游戏默认注册占位实现。
    pub fn new(config: AppConfig, audio_backend: Box<dyn AudioBackend>) -> Self {
        let layout = Layout::new(config.window.width, config.window.height);
        let characters = CharacterRegistry::load(&config.characters_path);
        let resolver = FsAssetResolver::new(&config.assets_root, characters);
        let audio = AudioChannels::new(audio_backend, &config.assets_root, &config.audio);
        let saves = SaveManager::new(&config.saves_dir, config.max_saves);
        let gallery = GallerySystem::load(&config.gallery_config_path, &config.gallery_progress_path);

        Self {
            layout,
            resolver: Box::new(resolver),
            audio,
            saves,
            minigames: MiniGameRegistry::with_placeholders(layout),
            gallery,
            config,
        }
    }

    /// 替换资源解析器
    pub fn with_resolver(mut self, resolver: impl AssetResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// 替换小游戏注册表
    pub fn with_minigames(mut self, minigames: MiniGameRegistry) -> Self {
        self.minigames = minigames;
        self
    }
}

impl std::fmt::Debug for HostState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostState")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("audio", &self.audio)
            .field("saves", &self.saves)
            .field("minigames", &self.minigames)
            .field("gallery", &self.gallery)
            .finish_non_exhaustive()
    }
}
