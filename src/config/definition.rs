//! Parsed command definitions.

use crate::config::schema::{CommandType, RawCommand};
use crate::error::{Result, UsercmdError};

/// A user command as declared in a source, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    /// Invocation keyword.
    pub name: String,

    /// Implementation strategy.
    pub command_type: CommandType,

    /// Shell template, dotted path, or `package#entry` reference.
    pub definition: String,

    /// Short help text.
    pub help: Option<String>,

    /// Longer description.
    pub description: Option<String>,

    /// Identifier of the source this definition was loaded from.
    pub source: String,
}

impl CommandDefinition {
    /// Create a definition directly, without going through a document.
    pub fn new(
        name: impl Into<String>,
        command_type: CommandType,
        definition: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command_type,
            definition: definition.into(),
            help: None,
            description: None,
            source: source.into(),
        }
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Validate a raw entry and turn it into a definition.
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` for an unrecognized `type` and
    /// `MalformedSource` for a bad name or a missing/empty definition.
    pub fn from_raw(name: &str, raw: RawCommand, source: &str) -> Result<Self> {
        if name.trim().is_empty() || name.chars().any(char::is_whitespace) {
            return Err(UsercmdError::MalformedSource {
                source_id: source.to_string(),
                message: format!("invalid command name '{}'", name),
            });
        }

        let command_type = raw
            .command_type
            .as_deref()
            .unwrap_or("")
            .parse::<CommandType>()
            .map_err(|command_type| UsercmdError::UnknownType {
                name: name.to_string(),
                command_type,
            })?;

        let definition = raw
            .definition
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| UsercmdError::MalformedSource {
                source_id: source.to_string(),
                message: format!("command '{}' is missing a definition", name),
            })?;

        Ok(Self {
            name: name.to_string(),
            command_type,
            definition,
            help: raw.help.filter(|h| !h.trim().is_empty()),
            description: raw.description.filter(|d| !d.trim().is_empty()),
            source: source.to_string(),
        })
    }

    /// Text shown next to the command in listings.
    pub fn summary(&self) -> String {
        self.help
            .clone()
            .or_else(|| self.description.clone())
            .unwrap_or_else(|| format!("Run: {}", self.definition))
    }
}
