//! Command file parsing.
//!
//! A command file is a YAML mapping with a `commands` key:
//!
//! ```yaml
//! commands:
//!   test: pytest -x {args}          # shorthand for a shell command
//!   status:
//!     type: plugin
//!     definition: tools.git.status
//!     help: Show repository status
//! ```
//!
//! Entries keep their document order. Duplicate names inside one source are
//! handled according to [`DuplicatePolicy`].

use crate::config::definition::CommandDefinition;
use crate::config::loader::source_id;
use crate::config::schema::{DuplicatePolicy, RawCommand};
use crate::error::{Result, UsercmdError};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;
use std::fs;
use std::path::Path;

/// Non-fatal problem found while parsing a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A later entry replaced an earlier one with the same name.
    DuplicateName { name: String, source_id: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::DuplicateName { name, source_id } => write!(
                f,
                "command '{}' is defined more than once in {}; the last definition wins",
                name, source_id
            ),
        }
    }
}

/// Result of parsing one source.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    /// Source identifier every definition is tagged with.
    pub source: String,

    /// Definitions in document order.
    pub definitions: Vec<CommandDefinition>,

    /// Non-fatal problems.
    pub warnings: Vec<ParseWarning>,
}

/// `commands:` entries in document order, duplicates included.
struct CommandEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for CommandEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = CommandEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of command names to definitions")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    entries.push((name, value));
                }
                Ok(CommandEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Deserialize)]
struct CommandDocument {
    commands: Option<CommandEntries>,
}

/// Parse YAML command file content.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source` - Identifier used for error reporting and bulk removal
/// * `policy` - How to treat duplicate names
///
/// # Errors
///
/// `MalformedSource` when the document is not a mapping, `commands` is
/// missing or not a mapping, or an entry is invalid; `UnknownType` for an
/// unrecognized command type; `DuplicateName` under the strict policy.
pub fn parse_source(content: &str, source: &str, policy: DuplicatePolicy) -> Result<ParsedSource> {
    let malformed = |message: String| UsercmdError::MalformedSource {
        source_id: source.to_string(),
        message,
    };

    let document: CommandDocument =
        serde_yaml::from_str(content).map_err(|e| malformed(e.to_string()))?;

    let entries = document
        .commands
        .ok_or_else(|| malformed("missing `commands` mapping".to_string()))?;

    build_definitions(source, entries.0, policy)
}

/// Parse a command file from disk.
///
/// The source identifier is the path with `~` expanded.
///
/// # Errors
///
/// Returns `SourceNotFound` if the file doesn't exist, plus every error
/// [`parse_source`] can return.
pub fn parse_file(path: &Path, policy: DuplicatePolicy) -> Result<ParsedSource> {
    let id = source_id(path);
    let content = fs::read_to_string(crate::config::loader::expand_home(path)).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            UsercmdError::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            UsercmdError::Io(e)
        }
    })?;

    parse_source(&content, &id, policy)
}

fn build_definitions(
    source: &str,
    entries: Vec<(String, Value)>,
    policy: DuplicatePolicy,
) -> Result<ParsedSource> {
    let mut definitions: Vec<CommandDefinition> = Vec::with_capacity(entries.len());
    let mut warnings = Vec::new();

    for (name, value) in entries {
        let raw = raw_command(source, &name, value)?;
        let definition = CommandDefinition::from_raw(&name, raw, source)?;

        if let Some(pos) = definitions.iter().position(|d| d.name == name) {
            if policy == DuplicatePolicy::Error {
                return Err(UsercmdError::DuplicateName {
                    name,
                    source_id: source.to_string(),
                });
            }
            tracing::warn!("Duplicate command '{}' in {}, last definition wins", name, source);
            definitions.remove(pos);
            warnings.push(ParseWarning::DuplicateName {
                name,
                source_id: source.to_string(),
            });
        }

        definitions.push(definition);
    }

    tracing::debug!("Parsed {} command(s) from {}", definitions.len(), source);

    Ok(ParsedSource {
        source: source.to_string(),
        definitions,
        warnings,
    })
}

fn raw_command(source: &str, name: &str, value: Value) -> Result<RawCommand> {
    let malformed = |message: String| UsercmdError::MalformedSource {
        source_id: source.to_string(),
        message,
    };

    match value {
        Value::String(definition) => Ok(RawCommand {
            definition: Some(definition),
            ..Default::default()
        }),
        Value::Mapping(_) => serde_yaml::from_value(value)
            .map_err(|e| malformed(format!("command '{}': {}", name, e))),
        Value::Null => Err(malformed(format!("command '{}' is missing a definition", name))),
        _ => Err(malformed(format!(
            "command '{}' must be a string or a mapping",
            name
        ))),
    }
}
