//! List command implementation.
//!
//! The `usercmd list` command shows loaded commands, grouped by the file
//! they came from.

use serde_json::json;

use crate::cli::args::ListArgs;
use crate::cli::workspace::{Workspace, WorkspaceOptions};
use crate::config::CommandType;
use crate::error::Result;
use crate::registry::CommandSummary;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    options: WorkspaceOptions,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(options: WorkspaceOptions, args: ListArgs) -> Self {
        Self { options, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    fn show_json(&self, ui: &mut dyn UserInterface, summaries: &[CommandSummary]) -> Result<()> {
        let entries: Vec<_> = summaries
            .iter()
            .map(|s| {
                json!({
                    "name": s.name,
                    "type": s.command_type,
                    "help": s.help,
                    "source": s.source,
                })
            })
            .collect();
        let text = serde_json::to_string_pretty(&entries).map_err(anyhow::Error::from)?;
        ui.command_output(&format!("{}\n", text), "");
        Ok(())
    }
}

/// One aligned listing line.
fn format_line(summary: &CommandSummary, width: usize) -> String {
    let kind = match summary.command_type {
        CommandType::Shell => String::new(),
        other => format!(" [{}]", other),
    };
    format!("  {:<width$}  {}{}", summary.name, summary.help, kind, width = width)
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (workspace, _) = Workspace::load(&self.options)?;
        workspace.apply_output_mode(ui);
        let registry = &workspace.registry;

        let summaries = if self.args.sorted {
            registry.list_sorted()
        } else {
            registry.list()
        };

        if self.args.json {
            self.show_json(ui, &summaries)?;
            return Ok(CommandResult::success());
        }

        if summaries.is_empty() {
            ui.message("No user commands loaded.");
            ui.show_hint("Add commands to .usercmd/commands.yml");
        } else {
            let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);

            if self.args.sorted {
                ui.show_header("Commands");
                for summary in &summaries {
                    ui.message(&format_line(summary, width));
                }
            } else {
                for source in registry.sources() {
                    let group: Vec<&CommandSummary> =
                        summaries.iter().filter(|s| s.source == source).collect();
                    if group.is_empty() {
                        continue;
                    }
                    ui.show_header(source);
                    for summary in group {
                        ui.message(&format_line(summary, width));
                    }
                }
            }
        }

        let builtins = registry.builtin_names();
        if !builtins.is_empty() {
            ui.show_hint(&format!("Built-in: {}", builtins.join(", ")));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_DIR;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn setup_project(commands: &str, local: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("commands.yml"), commands).unwrap();
        if let Some(local) = local {
            fs::write(dir.join("commands.local.yml"), local).unwrap();
        }
        temp
    }

    fn list(root: &Path, args: ListArgs) -> MockUI {
        let options = WorkspaceOptions {
            project_root: root.to_path_buf(),
            user_dir: Some(root.join("no-user-dir")),
            discover: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let result = ListCommand::new(options, args).execute(&mut ui).unwrap();
        assert!(result.success);
        ui
    }

    #[test]
    fn groups_commands_by_source() {
        let temp = setup_project(
            "commands:\n  test:\n    definition: pytest\n    help: Run tests\n",
            Some("commands:\n  lint: ruff check\n"),
        );

        let ui = list(temp.path(), ListArgs::default());

        assert_eq!(ui.headers().len(), 2);
        assert!(ui.headers()[0].ends_with("commands.yml"));
        assert!(ui.headers()[1].ends_with("commands.local.yml"));
        assert!(ui.has_message("Run tests"));
        assert!(ui.has_message("Run: ruff check"));
    }

    #[test]
    fn sorted_listing_is_flat() {
        let temp = setup_project("commands:\n  zeta: 'true'\n  alpha: 'true'\n", None);

        let ui = list(
            temp.path(),
            ListArgs {
                sorted: true,
                ..Default::default()
            },
        );

        assert_eq!(ui.headers(), ["Commands"]);
        assert!(ui.messages()[0].contains("alpha"));
        assert!(ui.messages()[1].contains("zeta"));
    }

    #[test]
    fn non_shell_commands_show_type() {
        let temp = setup_project(
            "commands:\n  say:\n    type: plugin\n    definition: usercmd.std.echo\n",
            None,
        );
        let ui = list(temp.path(), ListArgs::default());
        assert!(ui.has_message("[plugin]"));
    }

    #[test]
    fn empty_project_shows_hint() {
        let temp = TempDir::new().unwrap();
        let ui = list(temp.path(), ListArgs::default());

        assert!(ui.has_message("No user commands loaded."));
        assert!(ui.hints().iter().any(|h| h.contains("Built-in: echo, version")));
    }

    #[test]
    fn json_output_lists_every_command() {
        let temp = setup_project("commands:\n  test: pytest\n", None);
        let ui = list(
            temp.path(),
            ListArgs {
                json: true,
                ..Default::default()
            },
        );

        let parsed: serde_json::Value = serde_json::from_str(ui.stdout()).unwrap();
        assert_eq!(parsed[0]["name"], "test");
        assert_eq!(parsed[0]["type"], "shell");
    }

    #[test]
    fn format_line_aligns_names() {
        let summary = CommandSummary {
            name: "ab".to_string(),
            command_type: CommandType::Override,
            help: "Wrapped".to_string(),
            source: "x".to_string(),
        };
        assert_eq!(format_line(&summary, 4), "  ab    Wrapped [override]");
    }
}
