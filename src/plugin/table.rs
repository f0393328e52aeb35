//! Typed plugin lookup table.
//!
//! Hosts register plugin functions at startup under the same reference
//! strings command files use. Resolution is then a table lookup keyed by
//! those strings.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::{CommandContext, CommandOutput, Previous};
use crate::error::{Result, UsercmdError};

use super::reference::Reference;
use super::{CommandFn, OverrideFn, Plugin};

/// Namespace entry points are registered in.
pub const ENTRY_POINT_NAMESPACE: &str = "usercmd.commands";

/// Registered plugin functions, addressable by dotted path or entry point.
#[derive(Clone, Default)]
pub struct PluginTable {
    /// module path -> attribute -> plugin
    modules: HashMap<String, HashMap<String, Plugin>>,
    /// package -> entry name -> plugin, all within [`ENTRY_POINT_NAMESPACE`]
    entry_points: HashMap<String, HashMap<String, Plugin>>,
}

impl PluginTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under a reference string.
    ///
    /// Registering the same reference twice replaces the earlier plugin.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` if the string fits neither addressing scheme.
    pub fn register(&mut self, reference: &str, plugin: Plugin) -> Result<&mut Self> {
        let parsed =
            Reference::parse(reference).map_err(|message| UsercmdError::InvalidReference {
                reference: reference.to_string(),
                message,
            })?;

        let (scope, key) = match parsed {
            Reference::EntryPoint { package, entry } => {
                (self.entry_points.entry(package).or_default(), entry)
            }
            Reference::Path { module, attribute } => {
                (self.modules.entry(module).or_default(), attribute)
            }
        };

        if scope.insert(key, plugin).is_some() {
            tracing::warn!("Plugin '{}' registered twice, keeping the latest", reference);
        }

        Ok(self)
    }

    /// Register a command function.
    pub fn command<F>(&mut self, reference: &str, f: F) -> Result<&mut Self>
    where
        F: Fn(&mut CommandContext<'_>, &str) -> anyhow::Result<CommandOutput>
            + Send
            + Sync
            + 'static,
    {
        let f: CommandFn = Arc::new(f);
        self.register(reference, Plugin::Command(f))
    }

    /// Register an override function.
    pub fn override_with<F>(&mut self, reference: &str, f: F) -> Result<&mut Self>
    where
        F: Fn(&mut CommandContext<'_>, &Previous<'_>, &str) -> anyhow::Result<CommandOutput>
            + Send
            + Sync
            + 'static,
    {
        let f: OverrideFn = Arc::new(f);
        self.register(reference, Plugin::Override(f))
    }

    /// Look up a plugin by reference string.
    ///
    /// The error is a human-readable reason suitable for a resolution error.
    pub fn lookup(&self, reference: &str) -> std::result::Result<&Plugin, String> {
        match Reference::parse(reference)? {
            Reference::EntryPoint { package, entry } => {
                let entries = self.entry_points.get(&package).ok_or_else(|| {
                    format!(
                        "no entry points registered for `{}` in namespace `{}`",
                        package, ENTRY_POINT_NAMESPACE
                    )
                })?;
                entries.get(&entry).ok_or_else(|| {
                    format!(
                        "entry point `{}` not found for `{}` in namespace `{}`",
                        entry, package, ENTRY_POINT_NAMESPACE
                    )
                })
            }
            Reference::Path { module, attribute } => {
                let attributes = self
                    .modules
                    .get(&module)
                    .ok_or_else(|| format!("could not load module `{}`", module))?;
                attributes
                    .get(&attribute)
                    .ok_or_else(|| format!("module `{}` does not define `{}`", module, attribute))
            }
        }
    }

    /// Check whether a reference resolves.
    pub fn contains(&self, reference: &str) -> bool {
        self.lookup(reference).is_ok()
    }

    /// All registered references, sorted.
    pub fn references(&self) -> Vec<String> {
        let mut refs: Vec<String> = self
            .modules
            .iter()
            .flat_map(|(module, attrs)| attrs.keys().map(move |a| format!("{}.{}", module, a)))
            .chain(self.entry_points.iter().flat_map(|(package, entries)| {
                entries.keys().map(move |e| format!("{}#{}", package, e))
            }))
            .collect();
        refs.sort();
        refs
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.modules.values().map(HashMap::len).sum::<usize>()
            + self.entry_points.values().map(HashMap::len).sum::<usize>()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for PluginTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginTable")
            .field("references", &self.references())
            .finish()
    }
}
