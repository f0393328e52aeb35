//! Command-line interface for usercmd.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//! - [`workspace`] - Settings and command file loading per invocation
//! - [`plugins`] - Plugins and built-ins shipped with the binary

pub mod args;
pub mod commands;
pub mod plugins;
pub mod workspace;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, ListArgs, RunArgs, SchemaArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use workspace::{Workspace, WorkspaceOptions};
