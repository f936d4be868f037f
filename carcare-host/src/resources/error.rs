//! # Resource Error 模块
//!
//! 定义资源管理相关的错误类型。
//!
//! 资源错误从不向上传播到会话：调用方记录日志后使用占位资源或保持静音。

use thiserror::Error;

/// 资源管理错误
#[derive(Error, Debug)]
pub enum ResourceError {
    /// 资源加载失败
    #[error("加载 {kind} 资源失败: {path} - {message}")]
    LoadFailed {
        /// 资源路径
        path: String,
        /// 资源类型（image, sound 等）
        kind: String,
        /// 错误消息
        message: String,
    },

    /// 资源未找到
    #[error("资源未找到: {path}")]
    NotFound {
        /// 资源路径
        path: String,
    },

    /// 音频设备不可用
    #[error("音频设备不可用: {message}")]
    DeviceUnavailable { message: String },
}
