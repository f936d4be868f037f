//! # Resources 模块
//!
//! 资源解析：把脚本里的符号名（背景路径、角色名）映射为可渲染的资源句柄。
//!
//! ## 设计说明
//!
//! - 解析永不失败：图片缺失或损坏时返回占位句柄并记录警告
//! - 背景的黑屏标记在注册（首次解析）时计算一次，`wait` 指令据此选择缩放动画
//! - 句柄按逻辑路径缓存

mod cache;
mod error;
pub mod path;

pub use cache::{AssetCache, CacheStats};
pub use error::ResourceError;

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use carcare_runtime::Position;

use crate::characters::CharacterRegistry;
use path::{has_black_screen_marker, normalize_logical_path};

/// 缺失图片的占位尺寸
pub const PLACEHOLDER_SIZE: (u32, u32) = (100, 100);

/// 背景句柄
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundHandle {
    /// 逻辑路径（也是背景的识别字符串）
    pub path: String,
    /// 原图尺寸（占位时为 [`PLACEHOLDER_SIZE`]）
    pub size: (u32, u32),
    /// 是否为黑屏背景
    pub is_black_screen: bool,
    /// 是否为占位资源
    pub placeholder: bool,
}

impl BackgroundHandle {
    /// 创建背景句柄，黑屏标记在此计算
    pub fn new(path: impl Into<String>, size: (u32, u32), placeholder: bool) -> Self {
        let path = path.into();
        Self {
            is_black_screen: has_black_screen_marker(&path),
            path,
            size,
            placeholder,
        }
    }
}

/// 角色立绘句柄
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterHandle {
    /// 角色名
    pub name: String,
    /// 立绘逻辑路径
    pub path: String,
    /// 显示尺寸（来自角色表）
    pub size: (u32, u32),
    /// 默认位置
    pub default_position: Option<Position>,
}

/// 资源解析器
///
/// Host 的其他部分只通过这个 trait 访问资源，便于替换为打包资源或测试替身。
pub trait AssetResolver {
    /// 解析背景（永远返回句柄，失败时为占位）
    fn resolve_background(&mut self, file: &str) -> BackgroundHandle;

    /// 解析角色
    ///
    /// 未知角色、没有立绘或立绘缺失的角色返回 `None`。
    fn resolve_character(&mut self, name: &str) -> Option<CharacterHandle>;
}

/// 文件系统资源解析器
#[derive(Debug)]
pub struct FsAssetResolver {
    /// 资源根目录
    root: PathBuf,
    /// 角色表
    characters: CharacterRegistry,
    /// 背景缓存
    backgrounds: AssetCache<BackgroundHandle>,
    /// 立绘缓存（按角色名）
    sprites: AssetCache<Option<CharacterHandle>>,
}

impl FsAssetResolver {
    /// 创建新的解析器
    ///
    /// # 参数
    ///
    /// - `root`: 资源根目录
    /// - `characters`: 角色表
    pub fn new(root: impl AsRef<Path>, characters: CharacterRegistry) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            characters,
            backgrounds: AssetCache::new(),
            sprites: AssetCache::new(),
        }
    }

    /// 逻辑路径转实际路径
    pub fn full_path(&self, logical: &str) -> PathBuf {
        self.root.join(logical)
    }

    /// 背景缓存统计
    pub fn background_stats(&self) -> CacheStats {
        self.backgrounds.stats()
    }

    /// 探测图片尺寸（只读文件头）
    fn probe(path: &Path) -> Result<(u32, u32), ResourceError> {
        if !path.exists() {
            return Err(ResourceError::NotFound {
                path: path.display().to_string(),
            });
        }

        image::image_dimensions(path).map_err(|e| ResourceError::LoadFailed {
            path: path.display().to_string(),
            kind: "image".to_string(),
            message: e.to_string(),
        })
    }
}

impl AssetResolver for FsAssetResolver {
    fn resolve_background(&mut self, file: &str) -> BackgroundHandle {
        let logical = normalize_logical_path(file);
        let full_path = self.full_path(&logical);

        self.backgrounds.get_or_insert_with(&logical, || match Self::probe(&full_path) {
            Ok(size) => {
                debug!(path = %logical, width = size.0, height = size.1, "背景注册");
                BackgroundHandle::new(logical.clone(), size, false)
            }
            Err(e) => {
                warn!(path = %logical, error = %e, "背景加载失败，使用占位图");
                BackgroundHandle::new(logical.clone(), PLACEHOLDER_SIZE, true)
            }
        })
    }

    fn resolve_character(&mut self, name: &str) -> Option<CharacterHandle> {
        let def = self.characters.get(name).cloned();
        let root = self.root.clone();

        self.sprites.get_or_insert_with(name, || {
            let Some(def) = def else {
                warn!(name = %name, "未知角色");
                return None;
            };
            let Some(file) = def.file else {
                debug!(name = %name, "角色没有立绘");
                return None;
            };

            let logical = normalize_logical_path(&file);
            if let Err(e) = Self::probe(&root.join(&logical)) {
                warn!(name = %name, path = %logical, error = %e, "立绘加载失败，角色不显示");
                return None;
            }

            Some(CharacterHandle {
                name: name.to_string(),
                path: logical,
                size: def.size,
                default_position: def.default_position,
            })
        })
    }
}
