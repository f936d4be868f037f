//! # Error 模块
//!
//! 定义 carcare-runtime 中使用的错误类型。

use thiserror::Error;

/// 脚本加载错误
///
/// 所有字段校验都在加载时完成，执行阶段不会再出现缺字段问题。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// JSON 语法错误
    #[error("脚本 JSON 格式错误: {message}")]
    InvalidJson { message: String },

    /// 根节点不是对象
    #[error("脚本根节点必须是对象")]
    RootNotObject,

    /// 缺少顶层段落（`scenes` / `script`）
    #[error("脚本缺少 '{section}' 段")]
    MissingSection { section: String },

    /// 顶层段落类型错误
    #[error("脚本 '{section}' 段类型错误，期望 {expected}")]
    InvalidSection { section: String, expected: String },

    /// 未知指令类型
    #[error("第 {index} 条指令：未知类型 '{command}'")]
    UnknownCommand { index: usize, command: String },

    /// 指令字段缺失或取值非法
    #[error("第 {index} 条指令：{message}")]
    InvalidCommand { index: usize, message: String },
}

/// 运行时错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// 输入与当前等待状态不匹配
    #[error("当前状态不允许此操作：期望 {expected}，实际 {actual}")]
    StateMismatch { expected: String, actual: String },

    /// 会话已终止
    #[error("脚本已执行完毕")]
    ScriptEnded,
}
