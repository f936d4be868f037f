//! # Save 模块
//!
//! 存档/读档系统的数据模型。
//!
//! ## 设计原则
//!
//! - 存档只记录恢复所需的最小信息：下一次从哪条指令开始
//! - 画面状态不入档，读档时由快进回放重建
//! - 缺少 `current_command_index` 的记录视为无效

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 存档记录
///
/// 文件格式：`{"current_command_index": 7, "timestamp": "2025-01-01 12:00:00"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// 恢复时开始执行的指令索引
    pub current_command_index: usize,
    /// 保存时间（`%Y-%m-%d %H:%M:%S`）
    #[serde(default)]
    pub timestamp: String,
}

impl SaveRecord {
    /// 创建新的存档记录
    pub fn new(current_command_index: usize, timestamp: impl Into<String>) -> Self {
        Self {
            current_command_index,
            timestamp: timestamp.into(),
        }
    }

    /// 序列化为 JSON 字符串
    pub fn to_json(&self) -> Result<String, SaveError> {
        serde_json::to_string_pretty(self).map_err(|e| SaveError::SerializationFailed(e.to_string()))
    }

    /// 从 JSON 字符串反序列化
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        serde_json::from_str(json).map_err(|e| SaveError::DeserializationFailed(e.to_string()))
    }
}

/// 存档错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SaveError {
    /// 序列化失败
    #[error("序列化失败: {0}")]
    SerializationFailed(String),

    /// 反序列化失败（包括缺少 `current_command_index`）
    #[error("反序列化失败: {0}")]
    DeserializationFailed(String),

    /// 槽位超出范围
    #[error("无效的存档槽位 {slot}（有效范围 1..={max}）")]
    InvalidSlot { slot: u32, max: u32 },

    /// 文件操作失败
    #[error("文件操作失败: {0}")]
    IoError(String),
}
