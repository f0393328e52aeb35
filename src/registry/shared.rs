//! Registry shared between threads.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::CommandDefinition;
use crate::dispatch::{CommandOutput, Dispatcher};
use crate::error::Result;
use crate::shell::CommandOptions;
use crate::ui::UserInterface;

use super::command::{CommandSummary, ResolvedCommand};
use super::source::{LoadReport, Source};
use super::store::CommandRegistry;

/// A [`CommandRegistry`] behind a read/write lock.
///
/// Mutations take the write lock; lookups, listings and invocations take
/// the read lock. Entries are swapped whole, so readers never observe a
/// half-applied batch. A handler must not mutate the registry it was
/// invoked through; the read lock is held while it runs.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<CommandRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Read access to the registry.
    pub fn read(&self) -> RwLockReadGuard<'_, CommandRegistry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the registry.
    pub fn write(&self) -> RwLockWriteGuard<'_, CommandRegistry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, definition: CommandDefinition) -> Result<Arc<ResolvedCommand>> {
        self.write().register(definition)
    }

    pub fn add_source(&self, source: Source) -> Result<LoadReport> {
        self.write().add_source(source)
    }

    pub fn unregister_by_name(&self, name: &str) -> Option<Arc<ResolvedCommand>> {
        self.write().unregister_by_name(name)
    }

    pub fn unregister_by_source(&self, source: &str) -> Vec<String> {
        self.write().unregister_by_source(source)
    }

    pub fn drop_target(&self, target: &str) -> bool {
        self.write().drop_target(target)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<ResolvedCommand>> {
        self.read().lookup(name)
    }

    pub fn list(&self) -> Vec<CommandSummary> {
        self.read().list()
    }

    pub fn sources(&self) -> Vec<String> {
        self.read().sources().into_iter().map(String::from).collect()
    }

    /// Invoke a command while holding the read lock.
    pub fn invoke(
        &self,
        ui: &mut dyn UserInterface,
        name: &str,
        args: &str,
        options: &CommandOptions,
    ) -> Result<CommandOutput> {
        let registry = self.read();
        Dispatcher::new(&registry)
            .with_options(options.clone())
            .invoke(ui, name, args)
    }
}
