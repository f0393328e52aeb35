//! Plugins and built-ins shipped with the `usercmd` binary.
//!
//! Command files can refer to these like any host plugin:
//!
//! ```yaml
//! commands:
//!   say:
//!     type: plugin
//!     definition: usercmd.std.echo
//!   test:
//!     type: override
//!     definition: usercmd#announce
//! ```

use serde_json::{Map, Value};
use std::time::Instant;

use crate::dispatch::{CommandContext, CommandOutput, Previous};
use crate::error::Result;
use crate::plugin::PluginTable;
use crate::registry::CommandRegistry;

/// Plugin table with the standard plugins registered.
pub fn standard_plugins() -> Result<PluginTable> {
    let mut plugins = PluginTable::new();
    plugins
        .command("usercmd.std.echo", echo)?
        .command("usercmd.std.env", env)?
        .override_with("usercmd#announce", announce)?;
    Ok(plugins)
}

/// Register the `echo` and `version` built-ins.
pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register_builtin("echo", "Print the arguments", echo);
    registry.register_builtin("version", "Show the usercmd version", |ctx, _| {
        let version = format!("usercmd {}", env!("CARGO_PKG_VERSION"));
        ctx.ui().command_output(&format!("{}\n", version), "");
        Ok(CommandOutput::none())
    });
}

/// Print the argument string.
fn echo(ctx: &mut CommandContext<'_>, args: &str) -> anyhow::Result<CommandOutput> {
    ctx.ui().command_output(&format!("{}\n", args), "");
    Ok(CommandOutput::none())
}

/// Report environment variables named in the arguments.
///
/// Unset variables map to null and produce a warning.
fn env(ctx: &mut CommandContext<'_>, args: &str) -> anyhow::Result<CommandOutput> {
    let names: Vec<&str> = args.split_whitespace().collect();
    if names.is_empty() {
        anyhow::bail!("usage: <command> NAME [NAME...]");
    }

    let mut values = Map::new();
    for name in names {
        let value = match std::env::var(name) {
            Ok(value) => Value::String(value),
            Err(_) => {
                ctx.ui().warning(&format!("{} is not set", name));
                Value::Null
            }
        };
        values.insert(name.to_string(), value);
    }

    Ok(CommandOutput::value(values))
}

/// Report the wrapped command around its run.
fn announce(
    ctx: &mut CommandContext<'_>,
    previous: &Previous<'_>,
    args: &str,
) -> anyhow::Result<CommandOutput> {
    let command = previous.command();
    let label = if args.is_empty() {
        command.name().to_string()
    } else {
        format!("{} {}", command.name(), args)
    };

    ctx.ui().message(&format!("Running {}", label));
    let start = Instant::now();
    let output = previous.call(ctx, args)?;
    let elapsed = start.elapsed();

    if output.success() {
        ctx.ui()
            .success(&format!("{} finished in {:.1}s", label, elapsed.as_secs_f64()));
    } else {
        ctx.ui().error(&format!(
            "{} failed with exit code {}",
            label,
            output.exit_code()
        ));
    }
    Ok(output)
}
