//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{OutputMode, Theme, UserInterface};

/// Terminal UI writing status to stdout and errors to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: Theme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_theme(mode, Theme::detect())
    }

    /// Create a terminal UI with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: Theme) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if !matches!(self.mode, OutputMode::Silent) {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_hint(hint)).ok();
        }
    }

    fn command_output(&mut self, stdout: &str, stderr: &str) {
        if !self.mode.shows_command_output() {
            return;
        }
        if !stdout.is_empty() {
            write!(self.out, "{}", stdout).ok();
            self.out.flush().ok();
        }
        if !stderr.is_empty() {
            write!(self.err, "{}", stderr).ok();
            self.err.flush().ok();
        }
    }
}

/// Create the UI used by the binary.
pub fn create_ui(mode: OutputMode, color: bool) -> Box<dyn UserInterface> {
    let theme = if color { Theme::detect() } else { Theme::plain() };
    Box::new(TerminalUI::with_theme(mode, theme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(OutputMode::Verbose, false);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn silent_ui_accepts_all_calls() {
        let mut ui = TerminalUI::with_theme(OutputMode::Silent, Theme::plain());
        ui.message("hidden");
        ui.success("hidden");
        ui.warning("hidden");
        ui.show_header("hidden");
        ui.command_output("hidden", "");
    }
}
