//! Module loaders
//!
//! The registry calls a loader whenever a resolve needs a module that has not
//! been published yet. A loader builds the module against the same registry,
//! so the module's own imports are resolved (and loaded) recursively.

use super::SymbolRegistry;
use crate::error::{RegistryError, RegistryResult};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Produces modules on demand
pub trait ModuleLoader: Send + Sync {
    /// Build and publish `name` into `registry`
    ///
    /// Returns [`RegistryError::ModuleNotFound`] when the loader has no
    /// definition for `name`.
    fn load(&self, name: &str, registry: &mut SymbolRegistry) -> RegistryResult<()>;

    /// Whether this loader has a definition for `name`
    fn provides(&self, name: &str) -> bool;
}

/// A module definition: builds and publishes one module
pub type ModuleDefinition = Arc<dyn Fn(&mut SymbolRegistry) -> RegistryResult<()> + Send + Sync>;

/// Loader backed by an in-memory table of module definitions
#[derive(Clone, Default)]
pub struct StaticLoader {
    definitions: FxHashMap<String, ModuleDefinition>,
}

impl StaticLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one for `name`
    pub fn register<F>(&mut self, name: impl Into<String>, definition: F)
    where
        F: Fn(&mut SymbolRegistry) -> RegistryResult<()> + Send + Sync + 'static,
    {
        self.definitions.insert(name.into(), Arc::new(definition));
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<F>(mut self, name: impl Into<String>, definition: F) -> Self
    where
        F: Fn(&mut SymbolRegistry) -> RegistryResult<()> + Send + Sync + 'static,
    {
        self.register(name, definition);
        self
    }

    /// Names this loader can produce, sorted
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the loader has no definitions
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ModuleLoader for StaticLoader {
    fn load(&self, name: &str, registry: &mut SymbolRegistry) -> RegistryResult<()> {
        let definition = self
            .definitions
            .get(name)
            .ok_or_else(|| RegistryError::ModuleNotFound(name.to_string()))?;
        definition(registry)
    }

    fn provides(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }
}

impl fmt::Debug for StaticLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticLoader")
            .field("modules", &self.module_names())
            .finish()
    }
}

/// Tries loaders in order; the first that provides a module loads it
#[derive(Clone, Default)]
pub struct ChainLoader {
    loaders: Vec<Arc<dyn ModuleLoader>>,
}

impl ChainLoader {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a loader with lower priority than those already present
    pub fn push(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loaders.push(Arc::new(loader));
        self
    }
}

impl ModuleLoader for ChainLoader {
    fn load(&self, name: &str, registry: &mut SymbolRegistry) -> RegistryResult<()> {
        match self.loaders.iter().find(|loader| loader.provides(name)) {
            Some(loader) => loader.load(name, registry),
            None => Err(RegistryError::ModuleNotFound(name.to_string())),
        }
    }

    fn provides(&self, name: &str) -> bool {
        self.loaders.iter().any(|loader| loader.provides(name))
    }
}

impl fmt::Debug for ChainLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainLoader")
            .field("loaders", &self.loaders.len())
            .finish()
    }
}
