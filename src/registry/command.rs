//! Resolved command entries.

use std::fmt;

use crate::config::{CommandDefinition, CommandType};
use crate::plugin::{CommandFn, OverrideFn};
use crate::shell::ShellTemplate;

/// Source identifier of host built-ins.
pub const BUILTIN_SOURCE: &str = "<builtin>";

/// How a command runs once dispatched.
#[derive(Clone)]
pub enum Handler {
    /// Subprocess from a validated template.
    Shell(ShellTemplate),
    /// Plugin command function.
    Plugin(CommandFn),
    /// Override function wrapping the previous command.
    Override(OverrideFn),
    /// Host built-in.
    Builtin(CommandFn),
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Shell(template) => f.debug_tuple("Shell").field(&template.text()).finish(),
            Handler::Plugin(_) => f.write_str("Plugin(..)"),
            Handler::Override(_) => f.write_str("Override(..)"),
            Handler::Builtin(_) => f.write_str("Builtin(..)"),
        }
    }
}

/// A definition bound to its handler.
///
/// Override entries own a copy of the command that was active under the
/// same name when they were registered.
#[derive(Debug, Clone)]
pub struct ResolvedCommand {
    definition: CommandDefinition,
    handler: Handler,
    previous: Option<Box<ResolvedCommand>>,
    sequence: u64,
    generation: u64,
}

impl ResolvedCommand {
    pub(crate) fn new(
        definition: CommandDefinition,
        handler: Handler,
        previous: Option<Box<ResolvedCommand>>,
        sequence: u64,
    ) -> Self {
        Self {
            definition,
            handler,
            previous,
            sequence,
            generation: 0,
        }
    }

    /// Stamp the load generation of the source this entry belongs to.
    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn command_type(&self) -> CommandType {
        self.definition.command_type
    }

    /// Source identifier the command was loaded from.
    pub fn source(&self) -> &str {
        &self.definition.source
    }

    pub fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// The command this override wraps, if any.
    pub fn previous(&self) -> Option<&ResolvedCommand> {
        self.previous.as_deref()
    }

    /// Registration order; later registrations have larger numbers.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Load generation of its source at registration time.
    ///
    /// Reloading or dropping a source starts a new generation, so a
    /// snapshot with an older one no longer describes what is loaded.
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.handler, Handler::Builtin(_))
    }

    /// Listing view of this command.
    pub fn summary(&self) -> CommandSummary {
        CommandSummary {
            name: self.definition.name.clone(),
            command_type: self.definition.command_type,
            help: self.definition.summary(),
            source: self.definition.source.clone(),
        }
    }
}

/// One row of a command listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub name: String,
    pub command_type: CommandType,
    pub help: String,
    pub source: String,
}
