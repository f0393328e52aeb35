//! Configuration schema definitions for usercmd.
//!
//! Two kinds of YAML files are read:
//! - settings files (`config.yml`), deserialized into [`UsercmdConfig`]
//! - command files (`commands.yml`), whose entries deserialize into
//!   [`RawCommand`] once the parser has checked the document shape

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub use crate::ui::OutputMode;

/// Root structure of a settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsercmdConfig {
    /// Global settings
    pub settings: Settings,
}

/// Settings that apply to loading and running user commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// What to do when a source defines the same command twice
    pub duplicates: DuplicatePolicy,

    /// Shell executable used for shell commands (platform default if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Extra environment variables for shell commands
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,

    /// Default output mode: normal, verbose, quiet, silent
    pub output: OutputMode,
}

/// Policy for duplicate command names inside a single source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The later entry replaces the earlier one and a warning is reported.
    #[default]
    LastWins,
    /// The source is rejected with a `DuplicateName` error.
    Error,
}

/// One entry of a command file's `commands` mapping, as written.
///
/// Every field is optional here so the parser can report which one is
/// missing or empty, naming the command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCommand {
    /// Command type: shell, plugin, override (shell when absent)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub command_type: Option<String>,

    /// Shell template, dotted path, or `package#entry` reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    /// Help text shown by `list`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Longer description (used as help when `help` is absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// How a command is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    /// Runs a subprocess from a template string.
    Shell,
    /// Calls a registered plugin function.
    Plugin,
    /// Wraps the command previously registered under the same name.
    Override,
    /// Host built-in registered in code.
    Builtin,
}

impl CommandType {
    /// Name as written in command files.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Shell => "shell",
            CommandType::Plugin => "plugin",
            CommandType::Override => "override",
            CommandType::Builtin => "builtin",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandType {
    type Err = String;

    /// Parse the `type` field of a command file entry.
    ///
    /// Built-ins cannot be declared in a file, so `builtin` is rejected
    /// like any other unknown type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "shell" => Ok(Self::Shell),
            "plugin" => Ok(Self::Plugin),
            "override" => Ok(Self::Override),
            other => Err(other.to_string()),
        }
    }
}
