//! Error types for usercmd operations.
//!
//! This module defines [`UsercmdError`], the error type returned by the
//! parser, resolver, registry and dispatcher, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Load-time problems (bad documents, unknown types, unresolvable
//!   references) are raised while a source is added, never on first use
//! - Errors raised inside a plugin or override body come back unchanged
//!   through [`UsercmdError::Handler`]
//! - The crate never formats user-facing text beyond these messages; the
//!   host decides how to present them

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for usercmd operations.
#[derive(Debug, Error)]
pub enum UsercmdError {
    /// A command file passed to `add_source` does not exist.
    #[error("Command source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// The document does not have the expected `commands` shape.
    #[error("Malformed command source {source_id}: {message}")]
    MalformedSource { source_id: String, message: String },

    /// The same command name appears twice in one source under the strict
    /// duplicate policy.
    #[error("Duplicate command '{name}' in {source_id}")]
    DuplicateName { name: String, source_id: String },

    /// The `type` field names no known command type.
    #[error("Unknown command type '{command_type}' for command '{name}'")]
    UnknownType { name: String, command_type: String },

    /// A plugin reference or shell template could not be resolved.
    #[error("Cannot resolve '{reference}' for command '{name}': {message}")]
    Resolution {
        name: String,
        reference: String,
        message: String,
    },

    /// An override names a command that does not exist yet.
    #[error("Cannot override '{name}': no command with that name exists")]
    UnknownTarget { name: String },

    /// Dispatch to a name that is not registered.
    #[error("Unknown command: {name}")]
    CommandNotFound { name: String },

    /// A plugin was registered under a reference that cannot address it.
    #[error("Invalid plugin reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    /// The shell for a shell command could not be started.
    #[error("Failed to start command: {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Error raised by a plugin or override body.
    #[error(transparent)]
    Handler(anyhow::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UsercmdError {
    /// Recover the typed error from a handler's `anyhow::Error`.
    ///
    /// Handlers that call back into the dispatcher bubble `UsercmdError`s
    /// through `anyhow`; those are returned as they were raised. An error
    /// the handler wrapped with extra context stays wrapped.
    pub fn from_handler(err: anyhow::Error) -> Self {
        let outermost = err.chain().next().is_some_and(|e| e.is::<UsercmdError>());
        if !outermost {
            return UsercmdError::Handler(err);
        }
        match err.downcast::<UsercmdError>() {
            Ok(inner) => inner,
            Err(err) => UsercmdError::Handler(err),
        }
    }
}

/// Result type alias for usercmd operations.
pub type Result<T> = std::result::Result<T, UsercmdError>;
