//! # Script 模块
//!
//! 脚本数据模型与 JSON 加载。
//!
//! ## 模块结构
//!
//! - [`ast`]：指令与脚本定义
//! - [`parser`]：脚本 JSON 解析与加载期校验

pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::Parser;
