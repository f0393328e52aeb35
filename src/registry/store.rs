//! The command registry.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::config::{
    parse_file, parse_source, source_id, CommandDefinition, CommandType, DuplicatePolicy,
    ParsedSource,
};
use crate::dispatch::{CommandContext, CommandOutput};
use crate::error::Result;
use crate::plugin::{CommandFn, PluginTable};

use super::command::{CommandSummary, Handler, ResolvedCommand, BUILTIN_SOURCE};
use super::resolver::resolve;
use super::source::{LoadReport, Source};

#[derive(Debug, Clone)]
struct SourceEntry {
    id: String,
    names: Vec<String>,
    generation: u64,
}

/// Resolved commands keyed by name, indexed by the source they came from.
///
/// The most recent registration of a name wins. Every name in the source
/// index refers to a live entry whose source is that bucket.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    plugins: Arc<PluginTable>,
    commands: HashMap<String, Arc<ResolvedCommand>>,
    sources: Vec<SourceEntry>,
    builtins: HashMap<String, Arc<ResolvedCommand>>,
    duplicates: DuplicatePolicy,
    next_sequence: u64,
    next_generation: u64,
}

impl CommandRegistry {
    /// Create an empty registry resolving plugins from `plugins`.
    pub fn new(plugins: PluginTable) -> Self {
        Self::with_plugins(Arc::new(plugins))
    }

    /// Create an empty registry sharing an existing plugin table.
    pub fn with_plugins(plugins: Arc<PluginTable>) -> Self {
        Self {
            plugins,
            commands: HashMap::new(),
            sources: Vec::new(),
            builtins: HashMap::new(),
            duplicates: DuplicatePolicy::default(),
            next_sequence: 0,
            next_generation: 0,
        }
    }

    /// Set how duplicate names inside one source are treated.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn plugins(&self) -> &PluginTable {
        &self.plugins
    }

    /// Resolve and register one definition.
    ///
    /// Replaces any command of the same name and moves the name to the
    /// definition's source. On error the registry is unchanged.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors (`Resolution`, `UnknownTarget`).
    pub fn register(&mut self, definition: CommandDefinition) -> Result<Arc<ResolvedCommand>> {
        let current = self.resolve_target(&definition.name);
        let binding = resolve(&definition, &self.plugins, current.as_deref())?;

        let generation = self.bucket_mut(&definition.source).generation;
        let entry = Arc::new(
            ResolvedCommand::new(
                definition,
                binding.handler,
                binding.previous,
                self.take_sequence(),
            )
            .with_generation(generation),
        );
        let name = entry.name().to_string();

        if let Some(old) = self.commands.insert(name.clone(), Arc::clone(&entry)) {
            if old.source() != entry.source() {
                if entry.command_type() == CommandType::Override {
                    tracing::debug!("'{}' from {} wraps {}", name, entry.source(), old.source());
                } else {
                    tracing::warn!(
                        "Command '{}' from {} supersedes the one from {}",
                        name,
                        entry.source(),
                        old.source()
                    );
                }
                self.remove_from_bucket(old.source(), &name);
            }
        }

        let bucket = self.bucket_mut(entry.source());
        if !bucket.names.contains(&name) {
            bucket.names.push(name.clone());
        }

        tracing::debug!(
            "Registered {} command '{}' from {}",
            entry.command_type(),
            name,
            entry.source()
        );
        Ok(entry)
    }

    /// Register a host built-in.
    ///
    /// Built-ins are not listed and never removed by drops. They answer
    /// dispatch when no user command has the name and can be overridden.
    pub fn register_builtin<F>(&mut self, name: &str, help: &str, f: F) -> Arc<ResolvedCommand>
    where
        F: Fn(&mut CommandContext<'_>, &str) -> anyhow::Result<CommandOutput>
            + Send
            + Sync
            + 'static,
    {
        let f: CommandFn = Arc::new(f);
        let definition = CommandDefinition::new(name, CommandType::Builtin, name, BUILTIN_SOURCE)
            .with_help(help);
        let entry = Arc::new(ResolvedCommand::new(
            definition,
            Handler::Builtin(f),
            None,
            self.take_sequence(),
        ));
        self.builtins.insert(name.to_string(), Arc::clone(&entry));
        entry
    }

    /// Remove a command by name.
    ///
    /// Returns the removed entry, or `None` if no user command has the
    /// name. When the removed entry is an override whose wrapped command
    /// still belongs to the same load of its source, that command comes
    /// back.
    pub fn unregister_by_name(&mut self, name: &str) -> Option<Arc<ResolvedCommand>> {
        let removed = self.commands.remove(name)?;
        self.remove_from_bucket(removed.source(), name);

        if let Some(previous) = removed.previous().filter(|p| self.is_current(p)) {
            tracing::debug!("Restoring '{}' from {}", name, previous.source());
            self.commands.insert(name.to_string(), Arc::new(previous.clone()));
            let bucket = self.bucket_mut(previous.source());
            if !bucket.names.iter().any(|n| n == name) {
                bucket.names.push(name.to_string());
            }
        }
        self.prune_bucket(removed.source());

        tracing::debug!("Unregistered '{}' from {}", name, removed.source());
        Some(removed)
    }

    /// Remove every command loaded from `source`.
    ///
    /// Returns the removed names. Commands wrapped by overrides from this
    /// source are not restored when they came from the source itself.
    pub fn unregister_by_source(&mut self, source: &str) -> Vec<String> {
        let Some(position) = self.sources.iter().position(|s| s.id == source) else {
            return Vec::new();
        };
        let entry = self.sources.remove(position);

        for name in &entry.names {
            let owned = self
                .commands
                .get(name)
                .is_some_and(|cmd| cmd.source() == source);
            if owned {
                self.unregister_by_name(name);
            }
        }

        tracing::debug!("Dropped {} command(s) from {}", entry.names.len(), source);
        entry.names
    }

    /// Remove a source if `target` names one, otherwise a command.
    ///
    /// Returns `false` when nothing matched.
    pub fn drop_target(&mut self, target: &str) -> bool {
        if self.has_source(target) {
            self.unregister_by_source(target);
            return true;
        }

        let id = source_id(Path::new(target));
        if self.has_source(&id) {
            self.unregister_by_source(&id);
            return true;
        }

        self.unregister_by_name(target).is_some()
    }

    /// Look up a user command.
    pub fn lookup(&self, name: &str) -> Option<Arc<ResolvedCommand>> {
        self.commands.get(name).cloned()
    }

    /// Look up a user command, falling back to built-ins.
    pub fn resolve_target(&self, name: &str) -> Option<Arc<ResolvedCommand>> {
        self.lookup(name).or_else(|| self.builtins.get(name).cloned())
    }

    /// Check whether a user command or built-in has this name.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name) || self.builtins.contains_key(name)
    }

    /// User commands in registration order.
    pub fn list(&self) -> Vec<CommandSummary> {
        let mut entries: Vec<&Arc<ResolvedCommand>> = self.commands.values().collect();
        entries.sort_by_key(|cmd| cmd.sequence());
        entries.into_iter().map(|cmd| cmd.summary()).collect()
    }

    /// User commands sorted by name.
    pub fn list_sorted(&self) -> Vec<CommandSummary> {
        let mut summaries = self.list();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    /// Built-in names, sorted.
    pub fn builtin_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builtins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Loaded source identifiers in load order.
    pub fn sources(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.sources.iter().any(|s| s.id == source)
    }

    /// Names currently indexed under a source.
    pub fn names_in(&self, source: &str) -> Option<&[String]> {
        self.sources
            .iter()
            .find(|s| s.id == source)
            .map(|s| s.names.as_slice())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Load a file or document as one batch.
    ///
    /// Adding a source that is already loaded replaces its commands.
    ///
    /// # Errors
    ///
    /// Any parse or resolution error; nothing is registered in that case.
    pub fn add_source(&mut self, source: Source) -> Result<LoadReport> {
        let parsed = match &source {
            Source::File(path) => parse_file(path, self.duplicates)?,
            Source::Document { id, content } => parse_source(content, id, self.duplicates)?,
        };
        self.add_parsed(parsed)
    }

    /// Register an already parsed batch atomically.
    ///
    /// Definitions are registered in order against a staged copy, so an
    /// override may wrap a command defined earlier in the same batch.
    pub fn add_parsed(&mut self, parsed: ParsedSource) -> Result<LoadReport> {
        let mut staged = self.clone();
        if staged.has_source(&parsed.source) {
            tracing::debug!("Reloading {}", parsed.source);
            staged.unregister_by_source(&parsed.source);
        }
        staged.bucket_mut(&parsed.source);

        let mut commands = Vec::with_capacity(parsed.definitions.len());
        for definition in parsed.definitions {
            commands.push(definition.name.clone());
            staged.register(definition)?;
        }

        *self = staged;
        tracing::debug!("Loaded {} command(s) from {}", commands.len(), parsed.source);

        Ok(LoadReport {
            source: parsed.source,
            commands,
            warnings: parsed.warnings,
        })
    }

    /// Whether a captured command still describes its source as loaded.
    fn is_current(&self, command: &ResolvedCommand) -> bool {
        !command.is_builtin()
            && self
                .sources
                .iter()
                .any(|s| s.id == command.source() && s.generation == command.generation())
    }

    fn take_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    fn bucket_mut(&mut self, source: &str) -> &mut SourceEntry {
        let position = match self.sources.iter().position(|s| s.id == source) {
            Some(position) => position,
            None => {
                let generation = self.next_generation;
                self.next_generation += 1;
                self.sources.push(SourceEntry {
                    id: source.to_string(),
                    names: Vec::new(),
                    generation,
                });
                self.sources.len() - 1
            }
        };
        &mut self.sources[position]
    }

    fn remove_from_bucket(&mut self, source: &str, name: &str) {
        if let Some(bucket) = self.sources.iter_mut().find(|s| s.id == source) {
            bucket.names.retain(|n| n != name);
        }
    }

    /// Forget a source once its last command is unregistered.
    fn prune_bucket(&mut self, source: &str) {
        self.sources.retain(|s| s.id != source || !s.names.is_empty());
    }
}
