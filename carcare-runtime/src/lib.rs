//! # CarCare Runtime
//!
//! CarCare 视觉小说引擎的核心运行时库。
//!
//! ## 架构概述
//!
//! `carcare-runtime` 是纯逻辑核心，不依赖任何 IO、音频或渲染引擎。
//! 它通过 **命令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                          Runtime
//!   │                              │
//!   │──── RuntimeInput ──────────►│
//!   │                              │ tick()
//!   │◄─── (Vec<Command>, WaitingReason) ──│
//!   │                              │
//! ```
//!
//! ## 核心类型
//!
//! - [`Script`]：加载时已校验的指令序列
//! - [`Command`]：Runtime 向 Host 发出的指令
//! - [`RuntimeInput`]：Host 向 Runtime 传递的输入
//! - [`WaitingReason`]：Runtime 的等待状态
//! - [`Interpreter`]：解释器状态机（含读档快进）
//! - [`SaveRecord`]：存档记录
//!
//! ## 使用示例
//!
//! ```ignore
//! use carcare_runtime::{Interpreter, RuntimeInput, Script, WaitingReason};
//!
//! let script = Script::from_json(text)?;
//! let mut interpreter = Interpreter::new(script);
//! let mut input = None;
//!
//! loop {
//!     let (commands, waiting) = interpreter.tick(input.take())?;
//!
//!     for cmd in commands {
//!         host.execute(cmd);
//!     }
//!
//!     input = match waiting {
//!         WaitingReason::None => break,
//!         WaitingReason::WaitForClick => wait_for_click(),
//!         WaitingReason::WaitForAnimation => play_animation(),
//!         WaitingReason::WaitForMiniGame(kind) => run_minigame(kind),
//!     };
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`command`]：Command 定义
//! - [`input`]：RuntimeInput 定义
//! - [`state`]：InterpreterState 和 WaitingReason 定义
//! - [`minigame`]：小游戏种类与结果
//! - [`save`]：存档记录
//! - [`error`]：错误类型定义
//! - [`script`]：脚本模型（AST 和 Parser）
//! - [`runtime`]：执行引擎

pub mod command;
pub mod error;
pub mod input;
pub mod minigame;
pub mod runtime;
pub mod save;
pub mod script;
pub mod state;

// 重导出核心类型
pub use command::{Command, FadeColor, Position, SoundChannel};
pub use error::{RuntimeError, ScriptError};
pub use input::RuntimeInput;
pub use minigame::{MiniGameKind, MiniGameOutcome};
pub use runtime::{ExecuteResult, Executor, Interpreter};
pub use save::{SaveError, SaveRecord};
pub use script::{Parser, Script, ScriptCommand};
pub use state::{CharacterRef, InterpreterState, Phase, WaitingReason};
