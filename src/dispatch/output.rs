//! What an invoked command hands back.

use serde_json::Value;

use crate::shell::CommandResult;

/// Result of invoking a command.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// A shell command's exit status and captured output.
    Process(CommandResult),
    /// Whatever a plugin, override or built-in returned.
    Value(Value),
}

impl CommandOutput {
    /// A handler result carrying nothing.
    pub fn none() -> Self {
        CommandOutput::Value(Value::Null)
    }

    /// Wrap a plugin return value.
    pub fn value(value: impl Into<Value>) -> Self {
        CommandOutput::Value(value.into())
    }

    /// Whether the command succeeded. Plugin values always count as success.
    pub fn success(&self) -> bool {
        match self {
            CommandOutput::Process(result) => result.success,
            CommandOutput::Value(_) => true,
        }
    }

    /// Exit code to report for this output.
    ///
    /// A process killed by a signal reports 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandOutput::Process(result) => result.exit_code.unwrap_or(1),
            CommandOutput::Value(_) => 0,
        }
    }

    pub fn as_process(&self) -> Option<&CommandResult> {
        match self {
            CommandOutput::Process(result) => Some(result),
            CommandOutput::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            CommandOutput::Process(_) => None,
            CommandOutput::Value(value) => Some(value),
        }
    }
}
