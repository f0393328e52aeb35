//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that need user commands
//! build a [`Workspace`](crate::cli::workspace::Workspace) from the same
//! global flags.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod run;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
