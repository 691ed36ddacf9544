//! Symbol registry
//!
//! The registry owns every published module. Resolving an import loads the
//! target module on demand through the configured [`ModuleLoader`], which may
//! in turn resolve the module's own imports through the same registry.
//!
//! Per module name the state moves `Unloaded -> Loading -> Loaded`. A load
//! that fails is remembered as `Failed`; any later request for that module
//! within the same top-level resolve replays the original error instead of
//! loading again.

mod deps;
mod loader;
mod shared;

pub use deps::DependencyGraph;
pub use loader::{ChainLoader, ModuleDefinition, ModuleLoader, StaticLoader};
pub use shared::SharedRegistry;

use crate::config::RegistryOptions;
use crate::error::{RegistryError, RegistryResult};
use crate::module::{ExportTable, ImportRequest, MibModule, Symbol};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Load state of one module name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Never requested
    Unloaded,
    /// On the current load stack
    Loading,
    /// Published
    Loaded,
    /// The last load attempt failed
    Failed,
}

/// A failed load and the resolve call it belongs to
#[derive(Debug, Clone)]
struct FailedLoad {
    generation: u64,
    error: RegistryError,
}

/// Process-lifetime table of published modules
pub struct SymbolRegistry {
    /// Published modules by name
    modules: FxHashMap<String, Arc<MibModule>>,
    /// Modules currently being loaded or built, outermost first
    loading: Vec<String>,
    /// Most recent load failure per module
    failed: FxHashMap<String, FailedLoad>,
    /// Nesting of resolve calls; 0 when idle
    depth: usize,
    /// Loader calls currently running
    active_loads: usize,
    /// Incremented at every top-level resolve
    generation: u64,
    /// Import edges of published modules
    graph: DependencyGraph,
    loader: Option<Arc<dyn ModuleLoader>>,
    options: RegistryOptions,
}

impl SymbolRegistry {
    /// Create a registry with no loader; only published modules resolve
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    /// Create a registry with explicit options
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            modules: FxHashMap::default(),
            loading: Vec::new(),
            failed: FxHashMap::default(),
            depth: 0,
            active_loads: 0,
            generation: 0,
            graph: DependencyGraph::new(),
            loader: None,
            options,
        }
    }

    /// Set the loader used for on-demand loads
    pub fn with_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Replace the loader
    pub fn set_loader(&mut self, loader: Arc<dyn ModuleLoader>) {
        self.loader = Some(loader);
    }

    /// Active options
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Resolve `requests` in order, loading modules as needed
    ///
    /// Fails with the first error encountered; no partial result is returned.
    /// Modules loaded for earlier requests stay loaded.
    ///
    /// # Example
    /// ```
    /// # use mibreg_core::{ExportTable, ImportRequest, NodeKind, Symbol, SymbolRegistry};
    /// let mut registry = SymbolRegistry::new();
    /// let mut exports = ExportTable::default();
    /// exports.insert("MibScalar".into(), Symbol::Factory(NodeKind::Typed));
    /// registry.publish("SMI", exports);
    ///
    /// let symbols = registry.resolve(&[ImportRequest::new("SMI", "MibScalar")]).unwrap();
    /// assert_eq!(symbols[0].as_factory(), Some(NodeKind::Typed));
    /// ```
    pub fn resolve(&mut self, requests: &[ImportRequest]) -> RegistryResult<Vec<Symbol>> {
        self.in_frame(|registry| registry.resolve_all(requests))
    }

    /// Resolve on behalf of `requester`, a module under construction
    ///
    /// The requester counts as loading for the duration of the call, so an
    /// import chain leading back to it is reported as a cycle. It does not
    /// count toward [`RegistryOptions::max_load_depth`]; only loader calls do.
    pub fn resolve_from(
        &mut self,
        requester: &str,
        requests: &[ImportRequest],
    ) -> RegistryResult<Vec<Symbol>> {
        let pushed = !self.loading.iter().any(|m| m == requester);
        if pushed {
            self.loading.push(requester.to_string());
        }

        let result = self.in_frame(|registry| registry.resolve_all(requests));

        if pushed {
            self.loading.pop();
        }
        result
    }

    /// Publish `exports` under `name`, replacing any earlier publication
    ///
    /// Symbols handed out by earlier resolves stay valid for their holders.
    pub fn publish(&mut self, name: impl Into<String>, exports: ExportTable) -> Arc<MibModule> {
        self.publish_module(MibModule::new(name, Vec::new(), exports))
    }

    /// Publish a complete module, replacing any earlier publication
    ///
    /// The module's imports replace its edges in the dependency graph.
    pub fn publish_module(&mut self, module: MibModule) -> Arc<MibModule> {
        let module = Arc::new(module);
        let name = module.name().to_string();

        if self.modules.contains_key(&name) && self.options.warn_on_republish {
            warn!(module = %name, "module published again; replacing earlier exports");
        } else {
            debug!(module = %name, exports = module.exports().len(), "publishing module");
        }

        self.failed.remove(&name);
        self.graph
            .set_dependencies(&name, module.imports().iter().map(|req| req.module.as_str()));
        self.modules.insert(name, Arc::clone(&module));
        module
    }

    /// Load `name` if needed and return the published module
    pub fn load(&mut self, name: &str) -> RegistryResult<Arc<MibModule>> {
        self.in_frame(|registry| registry.ensure_loaded(name))
    }

    /// Load every module named in [`RegistryOptions::preload`]
    pub fn preload(&mut self) -> RegistryResult<()> {
        let names = self.options.preload.clone();
        for name in &names {
            self.load(name)?;
        }
        Ok(())
    }

    /// Whether `name` has been published
    pub fn is_loaded(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Current load state of `name`
    pub fn state(&self, name: &str) -> LoadState {
        if self.modules.contains_key(name) {
            LoadState::Loaded
        } else if self.loading.iter().any(|m| m == name) {
            LoadState::Loading
        } else if self.failed.contains_key(name) {
            LoadState::Failed
        } else {
            LoadState::Unloaded
        }
    }

    /// Error of the last failed load of `name`, if it has not since loaded
    pub fn last_failure(&self, name: &str) -> Option<&RegistryError> {
        self.failed.get(name).map(|f| &f.error)
    }

    /// A published module
    pub fn module(&self, name: &str) -> Option<&Arc<MibModule>> {
        self.modules.get(name)
    }

    /// Names of all published modules, sorted
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up one export without loading anything
    pub fn lookup(&self, module: &str, symbol: &str) -> Option<&Symbol> {
        self.modules.get(module)?.export(symbol)
    }

    /// Import edges of published modules
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Modules in dependency order (dependencies first)
    pub fn load_order(&self) -> RegistryResult<Vec<String>> {
        self.graph.topological_sort()
    }

    /// Run `f` as one resolve frame; failures are replayed only within the
    /// outermost frame they occurred in
    fn in_frame<T>(&mut self, f: impl FnOnce(&mut Self) -> RegistryResult<T>) -> RegistryResult<T> {
        if self.depth == 0 {
            self.generation += 1;
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn resolve_all(&mut self, requests: &[ImportRequest]) -> RegistryResult<Vec<Symbol>> {
        requests.iter().map(|req| self.resolve_one(req)).collect()
    }

    fn resolve_one(&mut self, req: &ImportRequest) -> RegistryResult<Symbol> {
        let module = self.ensure_loaded(&req.module)?;
        let symbol = module
            .export(&req.symbol)
            .cloned()
            .ok_or_else(|| RegistryError::UnresolvedSymbol {
                module: req.module.clone(),
                symbol: req.symbol.clone(),
            })?;
        trace!(module = %req.module, symbol = %req.symbol, kind = symbol.kind_name(), "resolved");
        Ok(symbol)
    }

    fn ensure_loaded(&mut self, name: &str) -> RegistryResult<Arc<MibModule>> {
        if let Some(module) = self.modules.get(name) {
            return Ok(Arc::clone(module));
        }

        if let Some(failed) = self.failed.get(name) {
            if failed.generation == self.generation {
                return Err(failed.error.clone());
            }
        }

        if let Some(pos) = self.loading.iter().position(|m| m == name) {
            let mut cycle = self.loading[pos..].to_vec();
            cycle.push(name.to_string());
            return Err(RegistryError::CircularDependency(cycle));
        }

        if self.active_loads >= self.options.max_load_depth {
            return Err(RegistryError::LoadDepthExceeded {
                module: name.to_string(),
                depth: self.options.max_load_depth,
            });
        }

        let result = self.run_loader(name);
        if let Err(error) = &result {
            warn!(module = %name, %error, "module load failed");
            self.failed.insert(
                name.to_string(),
                FailedLoad {
                    generation: self.generation,
                    error: error.clone(),
                },
            );
        }
        result
    }

    fn run_loader(&mut self, name: &str) -> RegistryResult<Arc<MibModule>> {
        let loader = self
            .loader
            .clone()
            .ok_or_else(|| RegistryError::ModuleNotFound(name.to_string()))?;

        debug!(module = %name, depth = self.active_loads, "loading module");
        self.loading.push(name.to_string());
        self.active_loads += 1;
        let loaded = loader.load(name, self);
        self.active_loads -= 1;
        self.loading.pop();

        if let Err(error) = loaded {
            self.discard(name);
            return Err(error);
        }

        let module = self
            .modules
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotPublished(name.to_string()))?;
        debug!(module = %name, "module loaded");
        Ok(module)
    }

    /// Drop whatever a failed load published under `name`
    ///
    /// Only called for names that were unpublished when the load started.
    fn discard(&mut self, name: &str) {
        if self.modules.remove(name).is_some() {
            debug!(module = %name, "discarding exports of failed load");
            self.graph.remove_module(name);
        }
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolRegistry")
            .field("modules", &self.module_names())
            .field("loading", &self.loading)
            .field("has_loader", &self.loader.is_some())
            .field("options", &self.options)
            .finish()
    }
}
