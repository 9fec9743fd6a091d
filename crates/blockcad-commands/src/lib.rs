//! BlockCAD 命令层
//!
//! 命令通过 `CommandInput` 抽象与用户交互（对象选择、取点、
//! 字符串与布尔确认），对显式传入的 `&mut Document` 做出修改，
//! 并以 `CommandStatus` 汇报结果。
//!
//! 前端（控制台、脚本）只需实现 `CommandInput`。

pub mod command;
pub mod commands;
pub mod input;
pub mod registry;
pub mod scripted;

pub use command::{Command, CommandKind, CommandStatus};
pub use commands::create_command;
pub use input::{CommandInput, OptionToggle, Response};
pub use registry::CommandRegistry;
pub use scripted::ScriptedInput;
