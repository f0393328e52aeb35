//! What plugin and override functions receive.

use crate::error::Result;
use crate::registry::{CommandRegistry, ResolvedCommand};
use crate::ui::UserInterface;

use super::{CommandOutput, Dispatcher};

/// Execution context passed to plugin, override and built-in functions.
pub struct CommandContext<'a> {
    ui: &'a mut dyn UserInterface,
    dispatcher: &'a Dispatcher<'a>,
}

impl<'a> CommandContext<'a> {
    pub fn new(ui: &'a mut dyn UserInterface, dispatcher: &'a Dispatcher<'a>) -> Self {
        Self { ui, dispatcher }
    }

    /// The output surface of the invoking host.
    pub fn ui(&mut self) -> &mut dyn UserInterface {
        &mut *self.ui
    }

    /// The dispatcher running this command.
    pub fn dispatcher(&self) -> &'a Dispatcher<'a> {
        self.dispatcher
    }

    /// The registry the command was found in.
    pub fn registry(&self) -> &CommandRegistry {
        self.dispatcher.registry()
    }

    /// Dispatch another command by name through the same dispatcher.
    pub fn invoke(&mut self, name: &str, args: &str) -> Result<CommandOutput> {
        let dispatcher = self.dispatcher;
        dispatcher.invoke(&mut *self.ui, name, args)
    }
}

/// The command an override replaced.
///
/// The override decides whether, when and with which arguments to call it.
#[derive(Debug, Clone, Copy)]
pub struct Previous<'a> {
    command: &'a ResolvedCommand,
}

impl<'a> Previous<'a> {
    pub fn new(command: &'a ResolvedCommand) -> Self {
        Self { command }
    }

    /// The wrapped command.
    pub fn command(&self) -> &'a ResolvedCommand {
        self.command
    }

    /// Run the wrapped command with `args`.
    pub fn call(&self, ctx: &mut CommandContext<'_>, args: &str) -> Result<CommandOutput> {
        let dispatcher = ctx.dispatcher;
        dispatcher.execute(&mut *ctx.ui, self.command, args)
    }
}
