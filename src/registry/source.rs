//! Command sources and load reports.

use std::path::PathBuf;

use crate::config::ParseWarning;

/// Where a batch of command definitions comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A YAML command file on disk.
    File(PathBuf),
    /// An in-memory YAML document with its own identifier.
    Document { id: String, content: String },
}

impl Source {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File(path.into())
    }

    pub fn document(id: impl Into<String>, content: impl Into<String>) -> Self {
        Source::Document {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Outcome of a successful `add_source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Source identifier the commands were indexed under.
    pub source: String,
    /// Names registered from the source, in document order.
    pub commands: Vec<String>,
    /// Non-fatal problems found while parsing.
    pub warnings: Vec<ParseWarning>,
}
