//! # Runtime 模块
//!
//! 脚本解释器核心，负责指令执行和状态管理。
//!
//! ## 模块结构
//!
//! - [`engine`]：解释器状态机
//! - [`executor`]：ScriptCommand 到 Command 的转换

pub mod engine;
pub mod executor;

pub use engine::Interpreter;
pub use executor::{ExecuteResult, Executor};
