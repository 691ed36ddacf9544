//! Thread-safe registry handle

use super::{LoadState, SymbolRegistry};
use crate::error::RegistryResult;
use crate::module::{ExportTable, ImportRequest, MibModule, Symbol};
use parking_lot::Mutex;
use std::sync::Arc;

/// Registry shared between threads
///
/// One lock guards the whole registry and is held for the full duration of
/// each operation, including every nested load a resolve triggers. A module
/// is therefore never visible half-built, and cycle detection sees a single
/// consistent load stack.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<SymbolRegistry>>,
}

impl SharedRegistry {
    /// Wrap a registry
    pub fn new(registry: SymbolRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// [`SymbolRegistry::resolve`] under the lock
    pub fn resolve(&self, requests: &[ImportRequest]) -> RegistryResult<Vec<Symbol>> {
        self.inner.lock().resolve(requests)
    }

    /// [`SymbolRegistry::publish`] under the lock
    pub fn publish(&self, name: impl Into<String>, exports: ExportTable) -> Arc<MibModule> {
        self.inner.lock().publish(name, exports)
    }

    /// [`SymbolRegistry::load`] under the lock
    pub fn load(&self, name: &str) -> RegistryResult<Arc<MibModule>> {
        self.inner.lock().load(name)
    }

    /// [`SymbolRegistry::is_loaded`] under the lock
    pub fn is_loaded(&self, name: &str) -> bool {
        self.inner.lock().is_loaded(name)
    }

    /// [`SymbolRegistry::state`] under the lock
    pub fn state(&self, name: &str) -> LoadState {
        self.inner.lock().state(name)
    }

    /// Run `f` with exclusive access, e.g. to build a module with
    /// [`ModuleBuilder`](crate::ModuleBuilder) as one load-then-publish step
    pub fn with<R>(&self, f: impl FnOnce(&mut SymbolRegistry) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

impl From<SymbolRegistry> for SharedRegistry {
    fn from(registry: SymbolRegistry) -> Self {
        Self::new(registry)
    }
}
