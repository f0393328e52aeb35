//! JSON Schema generation for command and settings files.
//!
//! The schemas (Draft-07) let editors autocomplete and validate
//! `.usercmd/commands.yml` and `.usercmd/config.yml`.

use serde_json::{json, Value};

/// Generates JSON Schemas for usercmd files.
#[derive(Debug, Default)]
pub struct SchemaGenerator;

impl SchemaGenerator {
    /// Create a new schema generator.
    pub fn new() -> Self {
        Self
    }

    /// Schema for command files.
    pub fn commands(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "usercmd command file",
            "description": "User-defined commands",
            "type": "object",
            "required": ["commands"],
            "properties": {
                "commands": {
                    "type": "object",
                    "description": "Commands keyed by name",
                    "propertyNames": { "pattern": "^\\S+$" },
                    "additionalProperties": self.command_schema()
                }
            }
        })
    }

    /// Schema for settings files.
    pub fn settings(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "usercmd settings",
            "type": "object",
            "properties": {
                "settings": {
                    "type": "object",
                    "properties": {
                        "duplicates": {
                            "type": "string",
                            "enum": ["last-wins", "error"],
                            "default": "last-wins",
                            "description": "What to do when a file defines a command twice"
                        },
                        "shell": {
                            "type": "string",
                            "description": "Shell executable for shell commands"
                        },
                        "env": {
                            "type": "object",
                            "additionalProperties": { "type": "string" },
                            "description": "Extra environment variables for shell commands"
                        },
                        "output": {
                            "type": "string",
                            "enum": ["verbose", "normal", "quiet", "silent"],
                            "default": "normal",
                            "description": "Default output verbosity"
                        }
                    }
                }
            }
        })
    }

    /// Schema of one command entry: a shell string or a full mapping.
    fn command_schema(&self) -> Value {
        json!({
            "oneOf": [
                {
                    "type": "string",
                    "minLength": 1,
                    "description": "Shell command; {args} is replaced with the arguments"
                },
                {
                    "type": "object",
                    "required": ["definition"],
                    "properties": {
                        "type": {
                            "type": "string",
                            "enum": ["shell", "plugin", "override"],
                            "default": "shell"
                        },
                        "definition": {
                            "type": "string",
                            "minLength": 1,
                            "description": "Shell template, module.path.function, or package#entry"
                        },
                        "help": {
                            "type": "string",
                            "description": "One-line help shown by `usercmd list`"
                        },
                        "description": {
                            "type": "string",
                            "description": "Longer description, used when help is absent"
                        }
                    }
                }
            ]
        })
    }
}
