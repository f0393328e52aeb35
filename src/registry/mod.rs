//! The command registry.
//!
//! Definitions from command files are resolved once, when their source is
//! added, and kept as [`ResolvedCommand`]s keyed by name:
//!
//! - a later registration of a name replaces the earlier one
//! - every command remembers the source it came from, so whole sources can
//!   be dropped again
//! - an override keeps the command it replaced and can call it
//! - host built-ins answer names no user command claims
//!
//! # Example
//!
//! ```
//! use usercmd::plugin::PluginTable;
//! use usercmd::registry::{CommandRegistry, Source};
//!
//! let mut registry = CommandRegistry::new(PluginTable::new());
//! let report = registry
//!     .add_source(Source::document("inline", "commands:\n  test: cargo test\n"))
//!     .unwrap();
//!
//! assert_eq!(report.commands, ["test"]);
//! assert!(registry.lookup("test").is_some());
//!
//! registry.unregister_by_source("inline");
//! assert!(registry.is_empty());
//! ```

pub mod command;
pub mod resolver;
pub mod shared;
pub mod source;
pub mod store;

pub use command::{CommandSummary, Handler, ResolvedCommand, BUILTIN_SOURCE};
pub use resolver::{resolve, Binding};
pub use shared::SharedRegistry;
pub use source::{LoadReport, Source};
pub use store::CommandRegistry;
