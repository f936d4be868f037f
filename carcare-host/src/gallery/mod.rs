//! # Gallery 模块
//!
//! 画廊：条目定义与持久化的解锁集合，与剧情进度分开保存。
//!
//! ## 文件
//!
//! - 条目配置：`{"id": {"title", "description", "unlock_requirement"}, ...}`
//! - 解锁进度：`["id", ...]`；也接受旧格式 `[{"id": ..., "unlocked": true}, ...]`
//!
//! 文件不存在时以空内容创建。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use carcare_runtime::SaveError;

/// 每页条目数
pub const ITEMS_PER_PAGE: usize = 6;

/// 画廊条目定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unlock_requirement: String,
}

/// 已解锁条目集合
pub type GalleryUnlockSet = BTreeSet<String>;

/// 进度文件中的一项
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProgressEntry {
    Id(String),
    Legacy {
        id: String,
        #[serde(default)]
        unlocked: bool,
    },
}

/// 画廊条目的显示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCard {
    pub id: String,
    pub unlocked: bool,
    /// 标题（未解锁为 "???"）
    pub title: String,
    /// 描述（未解锁为解锁条件）
    pub caption: String,
}

/// 画廊系统
#[derive(Debug, Clone)]
pub struct GallerySystem {
    /// 条目按 id 排序
    items: BTreeMap<String, GalleryItem>,
    unlocked: GalleryUnlockSet,
    current_page: usize,
    progress_path: PathBuf,
}

impl GallerySystem {
    /// 加载画廊配置与进度
    pub fn load(config_path: impl AsRef<Path>, progress_path: impl AsRef<Path>) -> Self {
        let config_path = config_path.as_ref();
        let progress_path = progress_path.as_ref();

        ensure_file(config_path, "{}");
        ensure_file(progress_path, "[]");

        let items = load_items(config_path);
        let unlocked = load_progress(progress_path);
        info!(items = items.len(), unlocked = unlocked.len(), "画廊加载完成");

        Self {
            items,
            unlocked,
            current_page: 0,
            progress_path: progress_path.to_path_buf(),
        }
    }

    /// 解锁条目
    ///
    /// 只解锁已配置的条目，解锁后立即保存。返回是否发生了变化。
    pub fn unlock_item(&mut self, id: &str) -> Result<bool, SaveError> {
        if !self.items.contains_key(id) {
            warn!(id = %id, "解锁未配置的画廊条目，忽略");
            return Ok(false);
        }

        let changed = self.unlocked.insert(id.to_string());
        self.save_progress()?;
        if changed {
            info!(id = %id, "画廊条目解锁");
        }
        Ok(changed)
    }

    /// 保存解锁进度
    pub fn save_progress(&self) -> Result<(), SaveError> {
        let ids: Vec<&String> = self.unlocked.iter().collect();
        let json = serde_json::to_string(&ids)
            .map_err(|e| SaveError::SerializationFailed(e.to_string()))?;
        fs::write(&self.progress_path, json)
            .map_err(|e| SaveError::IoError(format!("无法写入画廊进度: {}", e)))
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    pub fn unlocked(&self) -> &GalleryUnlockSet {
        &self.unlocked
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 总页数（没有条目时为 1）
    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(ITEMS_PER_PAGE).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next_page(&self) -> bool {
        (self.current_page + 1) * ITEMS_PER_PAGE < self.items.len()
    }

    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.has_prev_page() {
            self.current_page -= 1;
        }
    }

    /// 当前页的条目
    pub fn page_items(&self) -> Vec<GalleryCard> {
        self.items
            .iter()
            .skip(self.current_page * ITEMS_PER_PAGE)
            .take(ITEMS_PER_PAGE)
            .map(|(id, item)| {
                let unlocked = self.is_unlocked(id);
                if unlocked {
                    GalleryCard {
                        id: id.clone(),
                        unlocked,
                        title: item.title.clone(),
                        caption: item.description.clone(),
                    }
                } else {
                    GalleryCard {
                        id: id.clone(),
                        unlocked,
                        title: "???".to_string(),
                        caption: format!("Locked: {}", item.unlock_requirement),
                    }
                }
            })
            .collect()
    }
}

fn ensure_file(path: &Path, default: &str) {
    if path.exists() {
        return;
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!(path = ?parent, error = %e, "无法创建目录");
            return;
        }
    }
    if let Err(e) = fs::write(path, default) {
        warn!(path = ?path, error = %e, "无法创建画廊文件");
    }
}

/// 去掉 UTF-8 BOM
fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

fn load_items(path: &Path) -> BTreeMap<String, GalleryItem> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = ?path, error = %e, "画廊配置读取失败");
            return BTreeMap::new();
        }
    };

    serde_json::from_str(strip_bom(&content)).unwrap_or_else(|e| {
        warn!(path = ?path, error = %e, "画廊配置解析失败");
        BTreeMap::new()
    })
}

fn load_progress(path: &Path) -> GalleryUnlockSet {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = ?path, error = %e, "画廊进度读取失败，重新开始");
            return GalleryUnlockSet::new();
        }
    };

    let content = strip_bom(&content).trim();
    if content.is_empty() {
        return GalleryUnlockSet::new();
    }

    match serde_json::from_str::<Vec<ProgressEntry>>(content) {
        Ok(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                ProgressEntry::Id(id) => Some(id),
                ProgressEntry::Legacy { id, unlocked } => unlocked.then_some(id),
            })
            .collect(),
        Err(e) => {
            warn!(path = ?path, error = %e, "画廊进度解析失败，重新开始");
            GalleryUnlockSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "oil_change": {"title": "Oil Change", "description": "Fresh oil", "unlock_requirement": "Finish the drain"},
        "fuse_box": {"title": "Fuse Box", "description": "All fuses", "unlock_requirement": "Win the fuse game"}
    }"#;

    fn gallery_with(config: &str, progress: &str) -> (tempfile::TempDir, GallerySystem) {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("gallery_config.json");
        let progress_path = dir.path().join("gallery_progress.json");
        fs::write(&config_path, config).unwrap();
        fs::write(&progress_path, progress).unwrap();
        let gallery = GallerySystem::load(&config_path, &progress_path);
        (dir, gallery)
    }

    #[test]
    fn test_missing_files_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("gallery_config.json");
        let progress_path = dir.path().join("gallery_progress.json");

        let gallery = GallerySystem::load(&config_path, &progress_path);
        assert!(gallery.is_empty());
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "{}");
        assert_eq!(fs::read_to_string(&progress_path).unwrap(), "[]");
        assert_eq!(gallery.page_count(), 1);
    }

    #[test]
    fn test_unlock_persists() {
        let (dir, mut gallery) = gallery_with(CONFIG, "[]");

        assert!(gallery.unlock_item("fuse_box").unwrap());
        assert!(!gallery.unlock_item("fuse_box").unwrap());
        assert!(!gallery.unlock_item("unknown").unwrap());

        let progress_path = dir.path().join("gallery_progress.json");
        assert_eq!(fs::read_to_string(&progress_path).unwrap(), r#"["fuse_box"]"#);

        let reloaded = GallerySystem::load(dir.path().join("gallery_config.json"), &progress_path);
        assert!(reloaded.is_unlocked("fuse_box"));
        assert!(!reloaded.is_unlocked("oil_change"));
    }

    #[test]
    fn test_legacy_progress_format() {
        let (_dir, gallery) = gallery_with(
            CONFIG,
            r#"[{"id": "oil_change", "unlocked": true}, {"id": "fuse_box", "unlocked": false}]"#,
        );
        assert!(gallery.is_unlocked("oil_change"));
        assert!(!gallery.is_unlocked("fuse_box"));
    }

    #[test]
    fn test_broken_progress_starts_fresh() {
        let (_dir, gallery) = gallery_with(CONFIG, "{ broken");
        assert!(gallery.unlocked().is_empty());

        let (_dir, gallery) = gallery_with(CONFIG, "   ");
        assert!(gallery.unlocked().is_empty());
    }

    #[test]
    fn test_locked_card() {
        let (_dir, gallery) = gallery_with(CONFIG, r#"["oil_change"]"#);
        let cards = gallery.page_items();

        // 按 id 排序
        assert_eq!(cards[0].id, "fuse_box");
        assert_eq!(cards[0].title, "???");
        assert_eq!(cards[0].caption, "Locked: Win the fuse game");
        assert_eq!(cards[1].title, "Oil Change");
        assert_eq!(cards[1].caption, "Fresh oil");
    }

    #[test]
    fn test_paging() {
        let config: BTreeMap<String, GalleryItem> = (0..8)
            .map(|i| {
                (
                    format!("item_{}", i),
                    GalleryItem {
                        title: format!("Item {}", i),
                        description: String::new(),
                        unlock_requirement: String::new(),
                    },
                )
            })
            .collect();
        let (_dir, mut gallery) = gallery_with(&serde_json::to_string(&config).unwrap(), "[]");

        assert_eq!(gallery.page_count(), 2);
        assert_eq!(gallery.page_items().len(), 6);
        assert!(!gallery.has_prev_page());

        gallery.next_page();
        assert_eq!(gallery.current_page(), 1);
        assert_eq!(gallery.page_items().len(), 2);
        assert!(!gallery.has_next_page());

        gallery.next_page();
        assert_eq!(gallery.current_page(), 1);

        gallery.prev_page();
        gallery.prev_page();
        assert_eq!(gallery.current_page(), 0);
    }
}
