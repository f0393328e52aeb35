//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::cli::workspace::WorkspaceOptions;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    options: WorkspaceOptions,
}

impl CommandDispatcher {
    /// Create a new dispatcher loading files as described by `options`.
    pub fn new(options: WorkspaceOptions) -> Self {
        Self { options }
    }

    /// Build workspace options from global flags.
    pub fn from_cli(cli: &Cli, project_root: std::path::PathBuf) -> Self {
        Self::new(WorkspaceOptions {
            project_root,
            user_dir: cli.user_dir.clone(),
            files: cli.files.clone(),
            config: cli.config.clone(),
            discover: !cli.no_discover,
        })
    }

    /// Get the workspace options.
    pub fn options(&self) -> &WorkspaceOptions {
        &self.options
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Run(args) => {
                super::run::RunCommand::new(self.options.clone(), args.clone()).execute(ui)
            }
            Commands::List(args) => {
                super::list::ListCommand::new(self.options.clone(), args.clone()).execute(ui)
            }
            Commands::Check(args) => {
                super::check::CheckCommand::new(self.options.clone(), args.clone()).execute(ui)
            }
            Commands::Schema(args) => super::schema::SchemaCommand::new(args.clone()).execute(ui),
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}
