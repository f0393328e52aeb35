//! Schema command implementation.
//!
//! The `usercmd schema` command prints the JSON Schema of command files
//! (or settings files with `--settings`) for editor integration.

use crate::cli::args::SchemaArgs;
use crate::config::SchemaGenerator;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand {
    args: SchemaArgs,
}

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new(args: SchemaArgs) -> Self {
        Self { args }
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let generator = SchemaGenerator::new();
        let schema = if self.args.settings {
            generator.settings()
        } else {
            generator.commands()
        };

        let text = serde_json::to_string_pretty(&schema).map_err(anyhow::Error::from)?;
        ui.command_output(&format!("{}\n", text), "");
        Ok(CommandResult::success())
    }
}
