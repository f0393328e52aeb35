//! Binding definitions to handlers.
//!
//! Resolution happens once, when a command is registered. Shell templates
//! are validated, plugin references are looked up in the plugin table, and
//! overrides capture the command they replace.

use crate::config::{CommandDefinition, CommandType};
use crate::error::{Result, UsercmdError};
use crate::plugin::{Plugin, PluginTable};
use crate::shell::ShellTemplate;

use super::command::{Handler, ResolvedCommand};

/// A resolved handler plus, for overrides, the captured previous command.
#[derive(Debug)]
pub struct Binding {
    pub handler: Handler,
    pub previous: Option<Box<ResolvedCommand>>,
}

/// Resolve a definition against the plugin table.
///
/// `current` is the command active under the definition's name, used as
/// the override target.
///
/// # Errors
///
/// `Resolution` for a malformed template or an unresolvable or mistyped
/// plugin reference; `UnknownTarget` for an override with nothing to wrap.
pub fn resolve(
    definition: &CommandDefinition,
    plugins: &PluginTable,
    current: Option<&ResolvedCommand>,
) -> Result<Binding> {
    let failed = |message: String| UsercmdError::Resolution {
        name: definition.name.clone(),
        reference: definition.definition.clone(),
        message,
    };

    match definition.command_type {
        CommandType::Shell => {
            let template = ShellTemplate::parse(&definition.definition).map_err(failed)?;
            Ok(Binding {
                handler: Handler::Shell(template),
                previous: None,
            })
        }
        CommandType::Plugin => match plugins.lookup(&definition.definition).map_err(failed)? {
            Plugin::Command(f) => {
                tracing::debug!(
                    "Resolved plugin '{}' for command '{}'",
                    definition.definition,
                    definition.name
                );
                Ok(Binding {
                    handler: Handler::Plugin(f.clone()),
                    previous: None,
                })
            }
            other => Err(failed(format!(
                "found an {}, plugin commands need a command function",
                other.kind()
            ))),
        },
        CommandType::Override => {
            let f = match plugins.lookup(&definition.definition).map_err(failed)? {
                Plugin::Override(f) => f.clone(),
                other => {
                    return Err(failed(format!(
                        "found a {}, overrides need an override function",
                        other.kind()
                    )))
                }
            };
            let target = current.ok_or_else(|| UsercmdError::UnknownTarget {
                name: definition.name.clone(),
            })?;
            tracing::debug!(
                "Override '{}' wraps the {} command from {}",
                definition.name,
                target.command_type(),
                target.source()
            );
            Ok(Binding {
                handler: Handler::Override(f),
                previous: Some(Box::new(target.clone())),
            })
        }
        CommandType::Builtin => Err(failed(
            "built-in commands are registered by the host, not resolved".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::CommandOutput;

    fn plugins() -> PluginTable {
        let mut table = PluginTable::new();
        table
            .command("tools.git.status", |_, _| Ok(CommandOutput::none()))
            .unwrap()
            .override_with("acme#wrap", |_, _, _| Ok(CommandOutput::none()))
            .unwrap();
        table
    }

    fn def(name: &str, command_type: CommandType, text: &str) -> CommandDefinition {
        CommandDefinition::new(name, command_type, text, "test.yml")
    }

    fn existing(name: &str) -> ResolvedCommand {
        let binding = resolve(&def(name, CommandType::Shell, "make"), &plugins(), None).unwrap();
        ResolvedCommand::new(def(name, CommandType::Shell, "make"), binding.handler, None, 0)
    }

    #[test]
    fn shell_resolves_to_template() {
        let binding = resolve(&def("t", CommandType::Shell, "echo {args}"), &plugins(), None).unwrap();
        assert!(matches!(binding.handler, Handler::Shell(ref t) if t.has_placeholder()));
        assert!(binding.previous.is_none());
    }

    #[test]
    fn malformed_template_is_resolution_error() {
        let err = resolve(&def("t", CommandType::Shell, "echo {args"), &plugins(), None).unwrap_err();
        assert!(matches!(err, UsercmdError::Resolution { ref name, .. } if name == "t"));
    }

    #[test]
    fn plugin_resolves_command_function() {
        let binding = resolve(
            &def("st", CommandType::Plugin, "tools.git.status"),
            &plugins(),
            None,
        )
        .unwrap();
        assert!(matches!(binding.handler, Handler::Plugin(_)));
    }

    #[test]
    fn plugin_missing_module_is_resolution_error() {
        let err = resolve(&def("st", CommandType::Plugin, "tools.svn.status"), &plugins(), None)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("tools.svn.status"));
        assert!(msg.contains("could not load module"));
    }

    #[test]
    fn plugin_rejects_override_function() {
        let err = resolve(&def("w", CommandType::Plugin, "acme#wrap"), &plugins(), None).unwrap_err();
        assert!(err.to_string().contains("override function"));
    }

    #[test]
    fn override_captures_target() {
        let target = existing("build");
        let binding = resolve(
            &def("build", CommandType::Override, "acme#wrap"),
            &plugins(),
            Some(&target),
        )
        .unwrap();
        assert!(matches!(binding.handler, Handler::Override(_)));
        assert_eq!(binding.previous.unwrap().definition().definition, "make");
    }

    #[test]
    fn override_without_target_is_unknown_target() {
        let err = resolve(&def("build", CommandType::Override, "acme#wrap"), &plugins(), None)
            .unwrap_err();
        assert!(matches!(err, UsercmdError::UnknownTarget { ref name } if name == "build"));
    }

    #[test]
    fn override_checks_reference_before_target() {
        let err = resolve(&def("build", CommandType::Override, "acme#nope"), &plugins(), None)
            .unwrap_err();
        assert!(matches!(err, UsercmdError::Resolution { .. }));
    }

    #[test]
    fn override_rejects_command_function() {
        let target = existing("build");
        let err = resolve(
            &def("build", CommandType::Override, "tools.git.status"),
            &plugins(),
            Some(&target),
        )
        .unwrap_err();
        assert!(err.to_string().contains("command function"));
    }
}
