//! Shell command templates and execution.

pub mod command;
pub mod template;

pub use command::{execute, CommandOptions, CommandResult};
pub use template::{ShellTemplate, PLACEHOLDER};
