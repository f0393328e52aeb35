//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait through which commands report to the user
//! - [`TerminalUI`] for terminal usage
//! - [`MockUI`] capturing everything for tests
//!
//! # Example
//!
//! ```
//! use usercmd::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Silent, false);
//! ui.success("Commands loaded");
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, Theme};

/// Trait for user interface interactions.
///
/// Plugins and overrides receive the active implementation through their
/// command context. This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a section header.
    fn show_header(&mut self, title: &str);

    /// Show a contextual hint.
    fn show_hint(&mut self, hint: &str);

    /// Forward output captured from a command.
    fn command_output(&mut self, stdout: &str, stderr: &str);
}
