//! Run command implementation.
//!
//! The `usercmd run` command invokes one user command or built-in.

use serde_json::Value;

use crate::cli::args::RunArgs;
use crate::cli::workspace::{Workspace, WorkspaceOptions};
use crate::dispatch::{CommandOutput, Dispatcher};
use crate::error::{Result, UsercmdError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    options: WorkspaceOptions,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(options: WorkspaceOptions, args: RunArgs) -> Self {
        Self { options, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Print a plugin's return value.
    fn show_value(&self, ui: &mut dyn UserInterface, value: &Value) -> Result<()> {
        let text = match value {
            Value::Null => return Ok(()),
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).map_err(anyhow::Error::from)?,
        };
        ui.command_output(&format!("{}\n", text), "");
        Ok(())
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (workspace, _) = Workspace::load(&self.options)?;
        workspace.apply_output_mode(ui);
        let dispatcher =
            Dispatcher::new(&workspace.registry).with_options(workspace.shell_options());

        let output = match dispatcher.invoke(ui, &self.args.name, &self.args.joined()) {
            Ok(output) => output,
            Err(UsercmdError::CommandNotFound { name }) => {
                ui.error(&format!("Unknown command: {}", name));
                ui.show_hint("Run `usercmd list` to see available commands");
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        match &output {
            CommandOutput::Process(result) if ui.output_mode().shows_details() => {
                ui.message(&format!(
                    "{} exited with {} in {:.2}s",
                    self.args.name,
                    output.exit_code(),
                    result.duration.as_secs_f64()
                ));
            }
            CommandOutput::Value(value) => self.show_value(ui, value)?,
            _ => {}
        }

        if output.success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(output.exit_code()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_DIR;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn setup_project(commands: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("commands.yml"), commands).unwrap();
        temp
    }

    fn options(root: &Path) -> WorkspaceOptions {
        WorkspaceOptions {
            project_root: root.to_path_buf(),
            user_dir: Some(root.join("no-user-dir")),
            discover: true,
            ..Default::default()
        }
    }

    fn run(root: &Path, name: &str, args: &[&str], ui: &mut MockUI) -> CommandResult {
        let args = RunArgs {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        };
        RunCommand::new(options(root), args).execute(ui).unwrap()
    }

    #[test]
    fn runs_shell_command_with_args() {
        let temp = setup_project("commands:\n  say: echo {args}\n");
        let mut ui = MockUI::new();

        let result = run(temp.path(), "say", &["hello", "world"], &mut ui);

        assert!(result.success);
        assert_eq!(ui.stdout().trim(), "hello world");
    }

    #[test]
    fn exit_code_is_passed_through() {
        let temp = setup_project("commands:\n  fail: exit 3\n");
        let mut ui = MockUI::new();

        let result = run(temp.path(), "fail", &[], &mut ui);

        assert!(!result.success);
        assert_eq!(result.exit_code, 3);
    }

    #[test]
    fn shell_commands_run_in_project_root() {
        let temp = setup_project("commands:\n  here: ls .usercmd\n");
        let mut ui = MockUI::new();

        run(temp.path(), "here", &[], &mut ui);
        assert!(ui.stdout().contains("commands.yml"));
    }

    #[test]
    fn unknown_command_fails_with_hint() {
        let temp = setup_project("commands:\n  say: echo {args}\n");
        let mut ui = MockUI::new();

        let result = run(temp.path(), "nope", &[], &mut ui);

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("Unknown command: nope"));
        assert!(!ui.hints().is_empty());
    }

    #[test]
    fn plugin_value_is_printed() {
        std::env::set_var("USERCMD_RUN_TEST", "42");
        let temp = setup_project(
            "commands:\n  env:\n    type: plugin\n    definition: usercmd.std.env\n",
        );
        let mut ui = MockUI::new();

        run(temp.path(), "env", &["USERCMD_RUN_TEST"], &mut ui);
        assert!(ui.stdout().contains("\"USERCMD_RUN_TEST\": \"42\""));
    }

    #[test]
    fn builtins_run_without_command_files() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = run(temp.path(), "echo", &["plain"], &mut ui);

        assert!(result.success);
        assert_eq!(ui.stdout(), "plain\n");
    }

    #[test]
    fn verbose_mode_reports_exit_status() {
        let temp = setup_project("commands:\n  ok: 'true'\n");
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        run(temp.path(), "ok", &[], &mut ui);
        assert!(ui.has_message("ok exited with 0"));
    }
}
