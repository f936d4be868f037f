//! # SaveManager 模块
//!
//! 存档文件管理，负责存档的读写和 slot 管理。
//!
//! ## 文件布局
//!
//! ```text
//! saves/
//! ├── save_1.json
//! ├── save_2.json
//! └── ...
//! ```
//!
//! 槽位范围固定为 `1..=max_saves`，不支持动态创建。

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use carcare_runtime::{SaveError, SaveRecord};

/// 时间戳格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 存档管理器
#[derive(Debug, Clone)]
pub struct SaveManager {
    /// 存档目录
    saves_dir: PathBuf,
    /// 槽位数量
    max_saves: u32,
}

impl SaveManager {
    /// 创建存档管理器
    ///
    /// # 参数
    ///
    /// - `saves_dir`: 存档目录路径（首次写入时创建）
    /// - `max_saves`: 槽位数量
    pub fn new(saves_dir: impl AsRef<Path>, max_saves: u32) -> Self {
        Self {
            saves_dir: saves_dir.as_ref().to_path_buf(),
            max_saves: max_saves.max(1),
        }
    }

    pub fn max_saves(&self) -> u32 {
        self.max_saves
    }

    /// 槽位是否在范围内
    pub fn is_valid_slot(&self, slot: u32) -> bool {
        (1..=self.max_saves).contains(&slot)
    }

    /// 确保存档目录存在
    pub fn ensure_dir(&self) -> Result<(), SaveError> {
        if !self.saves_dir.exists() {
            fs::create_dir_all(&self.saves_dir)
                .map_err(|e| SaveError::IoError(format!("无法创建存档目录: {}", e)))?;
        }
        Ok(())
    }

    /// 获取存档文件路径
    pub fn slot_path(&self, slot: u32) -> PathBuf {
        self.saves_dir.join(format!("save_{}.json", slot))
    }

    /// 保存存档（覆盖已有记录）
    pub fn save(&self, index: usize, slot: u32) -> Result<SaveRecord, SaveError> {
        if !self.is_valid_slot(slot) {
            return Err(SaveError::InvalidSlot {
                slot,
                max: self.max_saves,
            });
        }
        self.ensure_dir()?;

        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        let record = SaveRecord::new(index, timestamp);
        let path = self.slot_path(slot);

        fs::write(&path, record.to_json()?)
            .map_err(|e| SaveError::IoError(format!("无法写入存档文件: {}", e)))?;

        info!(slot = slot, index = index, path = ?path, "存档保存成功");
        Ok(record)
    }

    /// 读取存档
    ///
    /// 槽位越界、文件不存在、内容损坏或缺少 `current_command_index` 都返回 `None`。
    pub fn load(&self, slot: u32) -> Option<SaveRecord> {
        if !self.is_valid_slot(slot) {
            warn!(slot = slot, max = self.max_saves, "读取越界槽位");
            return None;
        }

        let path = self.slot_path(slot);
        if !path.exists() {
            debug!(slot = slot, "存档不存在");
            return None;
        }

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                warn!(slot = slot, path = ?path, error = %e, "无法读取存档文件");
                return None;
            }
        };

        match SaveRecord::from_json(&json) {
            Ok(record) => {
                info!(slot = slot, index = record.current_command_index, "存档读取成功");
                Some(record)
            }
            Err(e) => {
                warn!(slot = slot, path = ?path, error = %e, "存档无效，视为空槽位");
                None
            }
        }
    }

    /// 删除存档
    ///
    /// 删除不存在的存档或越界槽位为空操作。
    pub fn delete(&self, slot: u32) {
        if !self.is_valid_slot(slot) {
            warn!(slot = slot, "删除越界槽位，忽略");
            return;
        }

        let path = self.slot_path(slot);
        if !path.exists() {
            debug!(slot = slot, "存档不存在，无需删除");
            return;
        }

        match fs::remove_file(&path) {
            Ok(()) => info!(slot = slot, "存档删除成功"),
            Err(e) => warn!(slot = slot, error = %e, "无法删除存档文件"),
        }
    }

    /// 检查存档是否存在（且有效）
    pub fn exists(&self, slot: u32) -> bool {
        self.load(slot).is_some()
    }

    /// 列出所有槽位
    pub fn list_slots(&self) -> Vec<SlotInfo> {
        (1..=self.max_saves)
            .map(|slot| match self.load(slot) {
                Some(record) => SlotInfo {
                    slot,
                    exists: true,
                    timestamp: Some(record.timestamp).filter(|t| !t.is_empty()),
                },
                None => SlotInfo {
                    slot,
                    exists: false,
                    timestamp: None,
                },
            })
            .collect()
    }
}

/// 槽位信息（用于菜单显示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    pub slot: u32,
    pub exists: bool,
    /// 存档时间；旧存档可能没有
    pub timestamp: Option<String>,
}

impl SlotInfo {
    /// 菜单文本
    pub fn label(&self) -> String {
        if self.exists {
            let timestamp = self.timestamp.as_deref().unwrap_or("Unknown");
            format!("Slot {}: {}", self.slot, timestamp)
        } else {
            format!("Slot {}: Empty", self.slot)
        }
    }
}
