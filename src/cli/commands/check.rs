//! Check command implementation.
//!
//! The `usercmd check` command loads every command file on its own and
//! reports what each one defines, every warning, and every error.

use crate::cli::args::CheckArgs;
use crate::cli::workspace::{Workspace, WorkspaceOptions};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    options: WorkspaceOptions,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(options: WorkspaceOptions, args: CheckArgs) -> Self {
        Self { options, args }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut workspace = Workspace::open(&self.options)?;
        workspace.apply_output_mode(ui);
        let files = workspace.command_files().to_vec();

        if files.is_empty() {
            ui.message("No command files found.");
            ui.show_hint("Create .usercmd/commands.yml or pass --file");
            return Ok(CommandResult::success());
        }

        let mut errors = 0;
        let mut warnings = 0;

        // Later files may override commands from earlier ones, so they load
        // into the same registry in order.
        for path in &files {
            match workspace.load_file(path) {
                Ok(report) => {
                    ui.success(&format!(
                        "{}: {} command(s)",
                        report.source,
                        report.commands.len()
                    ));
                    for warning in &report.warnings {
                        ui.warning(&warning.to_string());
                        warnings += 1;
                    }
                }
                Err(e) => {
                    ui.error(&e.to_string());
                    errors += 1;
                }
            }
        }

        if errors > 0 || (self.args.strict && warnings > 0) {
            ui.error(&format!(
                "Found {} error(s) and {} warning(s)",
                errors, warnings
            ));
            return Ok(CommandResult::failure(1));
        }

        ui.success(&format!(
            "{} command(s) from {} file(s)",
            workspace.registry.len(),
            files.len()
        ));
        Ok(CommandResult::success())
    }
}
