//! # Error 模块
//!
//! Host 层统一错误类型。
//!
//! 资源缺失、存档损坏等可恢复的问题在各模块内部降级处理，不会出现在这里；
//! 到达这里的错误意味着会话无法继续。

use carcare_runtime::{RuntimeError, SaveError, ScriptError};
use thiserror::Error;

use crate::config::ConfigError;

/// Host 层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// 脚本加载失败
    #[error("脚本错误: {0}")]
    Script(#[from] ScriptError),

    /// 解释器状态错误
    #[error("运行时错误: {0}")]
    Runtime(#[from] RuntimeError),

    /// 存档错误
    #[error("存档错误: {0}")]
    Save(#[from] SaveError),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}
