//! usercmd - User-defined commands for interactive CLI tools.
//!
//! Command files declare named commands in YAML. Each command is a shell
//! template, a reference to a plugin function the host registered, or an
//! override that wraps whatever command had the name before it.
//!
//! # Modules
//!
//! - [`cli`] - The `usercmd` binary's argument parsing and subcommands
//! - [`config`] - Command file parsing, settings and file discovery
//! - [`dispatch`] - Running a command by name
//! - [`error`] - Error types and result aliases
//! - [`plugin`] - Plugin functions and their lookup table
//! - [`registry`] - Resolved commands keyed by name and source
//! - [`shell`] - Shell templates and subprocess execution
//! - [`ui`] - Output surface handed to commands
//!
//! # Example
//!
//! ```
//! use usercmd::dispatch::{CommandOutput, Dispatcher};
//! use usercmd::plugin::PluginTable;
//! use usercmd::registry::{CommandRegistry, Source};
//! use usercmd::ui::MockUI;
//!
//! let mut plugins = PluginTable::new();
//! plugins
//!     .override_with("demo#twice", |ctx, previous, args| {
//!         previous.call(ctx, args)?;
//!         Ok(previous.call(ctx, args)?)
//!     })
//!     .unwrap();
//!
//! let mut registry = CommandRegistry::new(plugins);
//! registry
//!     .add_source(Source::document(
//!         "inline",
//!         "commands:\n  hello: echo hello {args}\n",
//!     ))
//!     .unwrap();
//! registry
//!     .add_source(Source::document(
//!         "wrappers",
//!         "commands:\n  hello:\n    type: override\n    definition: demo#twice\n",
//!     ))
//!     .unwrap();
//!
//! let mut ui = MockUI::new();
//! Dispatcher::new(&registry).invoke(&mut ui, "hello", "world").unwrap();
//! assert_eq!(ui.stdout(), "hello world\nhello world\n");
//! ```

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod shell;
pub mod ui;

pub use error::{Result, UsercmdError};
