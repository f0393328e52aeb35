//! Command dispatch.
//!
//! The [`Dispatcher`] looks a name up in a [`CommandRegistry`] and runs the
//! handler bound to it:
//!
//! - shell commands render their template and run as one subprocess,
//!   whose captured output is forwarded to the UI and returned
//! - plugin and built-in functions are called with the argument string
//! - override functions also receive a [`Previous`] handle to the command
//!   they wrap
//!
//! ```
//! use usercmd::config::{CommandDefinition, CommandType};
//! use usercmd::dispatch::{CommandOutput, Dispatcher};
//! use usercmd::plugin::PluginTable;
//! use usercmd::registry::CommandRegistry;
//! use usercmd::ui::MockUI;
//!
//! let mut plugins = PluginTable::new();
//! plugins
//!     .command("demo.greet.hello", |_, args| Ok(CommandOutput::value(format!("hello {}", args))))
//!     .unwrap();
//!
//! let mut registry = CommandRegistry::new(plugins);
//! registry
//!     .register(CommandDefinition::new("hello", CommandType::Plugin, "demo.greet.hello", "inline"))
//!     .unwrap();
//!
//! let mut ui = MockUI::new();
//! let output = Dispatcher::new(&registry).invoke(&mut ui, "hello", "world").unwrap();
//! assert_eq!(output.as_value().unwrap(), "hello world");
//! ```

pub mod context;
pub mod output;

pub use context::{CommandContext, Previous};
pub use output::CommandOutput;

use crate::error::{Result, UsercmdError};
use crate::registry::{CommandRegistry, Handler, ResolvedCommand};
use crate::shell::{self, CommandOptions};
use crate::ui::UserInterface;

/// Runs commands from a registry.
#[derive(Debug)]
pub struct Dispatcher<'r> {
    registry: &'r CommandRegistry,
    options: CommandOptions,
}

impl<'r> Dispatcher<'r> {
    /// Create a dispatcher that captures shell output.
    pub fn new(registry: &'r CommandRegistry) -> Self {
        Self {
            registry,
            options: CommandOptions::captured(),
        }
    }

    /// Use these options for shell commands.
    pub fn with_options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &'r CommandRegistry {
        self.registry
    }

    pub fn options(&self) -> &CommandOptions {
        &self.options
    }

    /// Invoke a command by name with a raw argument string.
    ///
    /// User commands are found first, then built-ins.
    ///
    /// # Errors
    ///
    /// `CommandNotFound` for an unknown name, `Spawn` when a shell cannot
    /// start, and whatever the handler itself raised.
    pub fn invoke(&self, ui: &mut dyn UserInterface, name: &str, args: &str) -> Result<CommandOutput> {
        let command = self
            .registry
            .resolve_target(name)
            .ok_or_else(|| UsercmdError::CommandNotFound {
                name: name.to_string(),
            })?;

        self.execute(ui, &command, args)
    }

    /// Run a specific resolved command.
    pub fn execute(
        &self,
        ui: &mut dyn UserInterface,
        command: &ResolvedCommand,
        args: &str,
    ) -> Result<CommandOutput> {
        tracing::debug!(
            "Dispatching {} command '{}' with args {:?}",
            command.command_type(),
            command.name(),
            args
        );

        match command.handler() {
            Handler::Shell(template) => {
                let text = template.render(args);
                let result = shell::execute(&text, &self.options)?;
                tracing::debug!(
                    "'{}' exited with {:?} after {:?}",
                    command.name(),
                    result.exit_code,
                    result.duration
                );
                ui.command_output(&result.stdout, &result.stderr);
                Ok(CommandOutput::Process(result))
            }
            Handler::Plugin(f) | Handler::Builtin(f) => {
                let mut ctx = CommandContext::new(ui, self);
                f(&mut ctx, args).map_err(UsercmdError::from_handler)
            }
            Handler::Override(f) => {
                let previous = command.previous().ok_or_else(|| UsercmdError::UnknownTarget {
                    name: command.name().to_string(),
                })?;
                let previous = Previous::new(previous);
                let mut ctx = CommandContext::new(ui, self);
                f(&mut ctx, &previous, args).map_err(UsercmdError::from_handler)
            }
        }
    }
}
