//! Module construction: resolve imports, run the body, publish

use super::{ExportTable, ImportRequest, MibModule, Symbol};
use crate::error::{RegistryError, RegistryResult};
use crate::node::{MibNode, NodeKind, Syntax, TypedNode};
use crate::registry::SymbolRegistry;
use std::sync::Arc;

/// Builds and publishes one module
///
/// Publication is all-or-nothing: if any import fails to resolve or the body
/// returns an error, nothing is published under the module's name.
///
/// # Example
/// ```
/// # use mibreg_core::{ExportTable, ModuleBuilder, NodeAttrs, NodeKind, Symbol, SymbolRegistry};
/// let mut registry = SymbolRegistry::new();
/// ModuleBuilder::new("ROOTS")
///     .build(&mut registry, |_| {
///         let mut exports = ExportTable::default();
///         exports.insert(
///             "iso".into(),
///             Symbol::node(NodeKind::Node.build(NodeAttrs::new("iso").path([1]))),
///         );
///         Ok(exports)
///     })
///     .unwrap();
/// assert!(registry.is_loaded("ROOTS"));
/// ```
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    name: String,
    imports: Vec<ImportRequest>,
}

impl ModuleBuilder {
    /// Start a module with no imports
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
        }
    }

    /// Request one symbol from another module
    pub fn import(mut self, module: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.imports.push(ImportRequest::new(module, symbol));
        self
    }

    /// Request several symbols from one module
    pub fn import_from<I, S>(mut self, module: &str, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports
            .extend(symbols.into_iter().map(|s| ImportRequest::new(module, s)));
        self
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Imports requested so far
    pub fn requests(&self) -> &[ImportRequest] {
        &self.imports
    }

    /// Resolve imports, run `body`, and publish the export table it returns
    pub fn build<F>(self, registry: &mut SymbolRegistry, body: F) -> RegistryResult<Arc<MibModule>>
    where
        F: FnOnce(&ResolvedImports) -> RegistryResult<ExportTable>,
    {
        let symbols = registry.resolve_from(&self.name, &self.imports)?;
        let resolved = ResolvedImports {
            module: self.name,
            requests: self.imports,
            symbols,
        };

        let exports = body(&resolved)?;

        let ResolvedImports {
            module, requests, ..
        } = resolved;
        Ok(registry.publish_module(MibModule::new(module, requests, exports)))
    }
}

/// Imports of a module under construction, in request order
#[derive(Debug, Clone)]
pub struct ResolvedImports {
    module: String,
    requests: Vec<ImportRequest>,
    symbols: Vec<Symbol>,
}

impl ResolvedImports {
    /// Name of the module being built
    pub fn module_name(&self) -> &str {
        &self.module
    }

    /// Resolved symbols, in request order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Requests paired with their resolved symbols
    pub fn iter(&self) -> impl Iterator<Item = (&ImportRequest, &Symbol)> {
        self.requests.iter().zip(self.symbols.iter())
    }

    /// Number of imports
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the module imported nothing
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at request position `index`
    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    /// Look up an imported symbol by origin
    pub fn symbol(&self, module: &str, symbol: &str) -> RegistryResult<&Symbol> {
        self.find(module, symbol).map(|(_, sym)| sym)
    }

    /// Imported node
    pub fn node(&self, module: &str, symbol: &str) -> RegistryResult<&Arc<MibNode>> {
        let (req, sym) = self.find(module, symbol)?;
        sym.expect_node(req)
    }

    /// Imported OBJECT-TYPE definition
    pub fn typed(&self, module: &str, symbol: &str) -> RegistryResult<&TypedNode> {
        let (req, sym) = self.find(module, symbol)?;
        sym.expect_typed(req)
    }

    /// Imported syntax
    pub fn syntax(&self, module: &str, symbol: &str) -> RegistryResult<&Arc<Syntax>> {
        let (req, sym) = self.find(module, symbol)?;
        sym.expect_syntax(req)
    }

    /// Imported node factory
    pub fn factory(&self, module: &str, symbol: &str) -> RegistryResult<NodeKind> {
        let (req, sym) = self.find(module, symbol)?;
        sym.expect_factory(req)
    }

    /// Error for a definition the module body rejects
    pub fn reject(&self, message: impl Into<String>) -> RegistryError {
        RegistryError::Definition {
            module: self.module.clone(),
            message: message.into(),
        }
    }

    fn find(&self, module: &str, symbol: &str) -> RegistryResult<(&ImportRequest, &Symbol)> {
        self.iter()
            .find(|(req, _)| req.module == module && req.symbol == symbol)
            .ok_or_else(|| self.reject(format!("'{}' was not imported from '{}'", symbol, module)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Access, NodeAttrs, Status};

    fn publish_core(registry: &mut SymbolRegistry) {
        ModuleBuilder::new("CORE")
            .build(registry, |_| {
                let mut exports = ExportTable::default();
                exports.insert(
                    "Var".into(),
                    Symbol::node(TypedNode::from_attrs(
                        NodeAttrs::new("sysUpTime")
                            .path([1, 3, 6, 1, 2, 1, 1, 3])
                            .syntax(Arc::new(Syntax::new("TimeTicks")))
                            .access(Access::ReadOnly)
                            .status(Status::Current),
                    )),
                );
                exports.insert("TimeTicks".into(), Symbol::syntax(Syntax::new("TimeTicks")));
                Ok(exports)
            })
            .unwrap();
    }

    #[test]
    fn test_build_publishes_exports() {
        let mut registry = SymbolRegistry::new();
        publish_core(&mut registry);

        let module = registry.module("CORE").unwrap();
        assert_eq!(module.export_names(), vec!["TimeTicks", "Var"]);
        assert!(module.imports().is_empty());
    }

    #[test]
    fn test_typed_accessors() {
        let mut registry = SymbolRegistry::new();
        publish_core(&mut registry);

        ModuleBuilder::new("USER")
            .import("CORE", "Var")
            .import("CORE", "TimeTicks")
            .build(&mut registry, |imports| {
                assert_eq!(imports.len(), 2);
                assert_eq!(imports.typed("CORE", "Var")?.label(), "sysUpTime");
                assert_eq!(imports.syntax("CORE", "TimeTicks")?.name(), "TimeTicks");
                assert!(matches!(
                    imports.syntax("CORE", "Var"),
                    Err(RegistryError::SymbolKind { .. })
                ));
                assert!(matches!(
                    imports.node("CORE", "missing"),
                    Err(RegistryError::Definition { .. })
                ));
                Ok(ExportTable::default())
            })
            .unwrap();

        let user = registry.module("USER").unwrap();
        assert_eq!(user.imports().len(), 2);
    }

    #[test]
    fn test_unresolved_import_publishes_nothing() {
        let mut registry = SymbolRegistry::new();
        publish_core(&mut registry);

        let mut body_ran = false;
        let result = ModuleBuilder::new("USER")
            .import("CORE", "Var")
            .import("CORE", "nope")
            .build(&mut registry, |_| {
                body_ran = true;
                Ok(ExportTable::default())
            });

        assert!(matches!(result, Err(RegistryError::UnresolvedSymbol { .. })));
        assert!(!body_ran);
        assert!(!registry.is_loaded("USER"));
    }

    #[test]
    fn test_body_error_publishes_nothing() {
        let mut registry = SymbolRegistry::new();
        publish_core(&mut registry);

        let result = ModuleBuilder::new("USER")
            .import("CORE", "Var")
            .build(&mut registry, |imports| Err(imports.reject("bad index")));

        assert_eq!(
            result.unwrap_err(),
            RegistryError::Definition {
                module: "USER".into(),
                message: "bad index".into(),
            }
        );
        assert!(!registry.is_loaded("USER"));
    }

    #[test]
    fn test_import_from() {
        let builder = ModuleBuilder::new("M").import_from("CORE", ["a", "b"]);
        assert_eq!(
            builder.requests(),
            &[ImportRequest::new("CORE", "a"), ImportRequest::new("CORE", "b")]
        );
    }
}
