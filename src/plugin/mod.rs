//! Plugin functions and their lookup table.
//!
//! Plugins are plain Rust functions the host registers at startup in a
//! [`PluginTable`]. Command files refer to them with the same strings they
//! were registered under:
//!
//! ```
//! use usercmd::dispatch::CommandOutput;
//! use usercmd::plugin::PluginTable;
//!
//! let mut plugins = PluginTable::new();
//! plugins
//!     .command("tools.greet.hello", |ctx, args| {
//!         ctx.ui().message(&format!("hello {}", args));
//!         Ok(CommandOutput::none())
//!     })
//!     .unwrap();
//!
//! assert!(plugins.contains("tools.greet.hello"));
//! ```

pub mod reference;
pub mod table;

pub use reference::Reference;
pub use table::{PluginTable, ENTRY_POINT_NAMESPACE};

use std::fmt;
use std::sync::Arc;

use crate::dispatch::{CommandContext, CommandOutput, Previous};

/// Function backing a `plugin` command or a host built-in.
///
/// Receives the execution context and the raw argument string.
pub type CommandFn =
    Arc<dyn Fn(&mut CommandContext<'_>, &str) -> anyhow::Result<CommandOutput> + Send + Sync>;

/// Function backing an `override` command.
///
/// Receives the execution context, the command it supersedes, and the raw
/// argument string. Calling the previous command is up to the function.
pub type OverrideFn = Arc<
    dyn Fn(&mut CommandContext<'_>, &Previous<'_>, &str) -> anyhow::Result<CommandOutput>
        + Send
        + Sync,
>;

/// A registered plugin function.
#[derive(Clone)]
pub enum Plugin {
    /// Usable by `plugin` commands.
    Command(CommandFn),
    /// Usable by `override` commands.
    Override(OverrideFn),
}

impl Plugin {
    /// Kind name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Plugin::Command(_) => "command function",
            Plugin::Override(_) => "override function",
        }
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plugin::{}", self.kind())
    }
}
