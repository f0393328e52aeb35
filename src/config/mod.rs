//! Command files and settings.
//!
//! - Schema definitions in [`schema`]
//! - Parsed command definitions in [`definition`]
//! - Command file parsing in [`parser`]
//! - File discovery and settings loading in [`loader`]
//! - Settings layering in [`merger`]
//! - JSON Schemas for editors in [`json_schema`]
//!
//! # Example
//!
//! ```
//! use usercmd::config::{parse_source, CommandType, DuplicatePolicy};
//!
//! let parsed = parse_source(
//!     "commands:\n  greet: echo hello {args}\n",
//!     "inline",
//!     DuplicatePolicy::LastWins,
//! )
//! .unwrap();
//! assert_eq!(parsed.definitions[0].command_type, CommandType::Shell);
//! ```
//!
//! # File Locations
//!
//! Command files are loaded in this order, later ones overriding earlier:
//! 1. User global (`~/.usercmd/commands.yml`)
//! 2. Project (`.usercmd/commands.yml`)
//! 3. Local overrides (`.usercmd/commands.local.yml`)

pub mod definition;
pub mod json_schema;
pub mod loader;
pub mod merger;
pub mod parser;
pub mod schema;

pub use definition::CommandDefinition;
pub use json_schema::SchemaGenerator;
pub use loader::{
    expand_home, find_project_root, load_config_value, load_settings, source_id, SourcePaths,
    CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use parser::{parse_file, parse_source, ParseWarning, ParsedSource};
pub use schema::{CommandType, DuplicatePolicy, OutputMode, RawCommand, Settings, UsercmdConfig};
