//! Definition modules
//!
//! A module is a named export table plus the imports it requested while
//! being built. Modules are constructed with [`ModuleBuilder`] and owned by
//! the registry once published.

mod builder;

pub use builder::{ModuleBuilder, ResolvedImports};

use crate::error::{RegistryError, RegistryResult};
use crate::node::{MibNode, NodeKind, Syntax, TypedNode};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// A request for one exported symbol of another module
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportRequest {
    /// Module expected to export the symbol
    pub module: String,
    /// Exported name
    pub symbol: String,
}

impl ImportRequest {
    /// Create an import request
    pub fn new(module: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbol: symbol.into(),
        }
    }
}

impl fmt::Display for ImportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.symbol)
    }
}

impl<M: Into<String>, S: Into<String>> From<(M, S)> for ImportRequest {
    fn from((module, symbol): (M, S)) -> Self {
        Self::new(module, symbol)
    }
}

/// An exported value
///
/// Cloning a symbol clones the `Arc`, so every importer observes the same
/// node object the exporting module published.
#[derive(Debug, Clone)]
pub enum Symbol {
    /// A tree node
    Node(Arc<MibNode>),
    /// A type descriptor
    Syntax(Arc<Syntax>),
    /// A node factory
    Factory(NodeKind),
}

impl Symbol {
    /// Wrap a node for export
    pub fn node(node: impl Into<MibNode>) -> Self {
        Self::Node(Arc::new(node.into()))
    }

    /// Wrap a syntax for export
    pub fn syntax(syntax: Syntax) -> Self {
        Self::Syntax(Arc::new(syntax))
    }

    /// Kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Node(node) => node.kind().as_str(),
            Self::Syntax(_) => "syntax",
            Self::Factory(_) => "factory",
        }
    }

    /// The node, if this symbol is one
    pub fn as_node(&self) -> Option<&Arc<MibNode>> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The syntax, if this symbol is one
    pub fn as_syntax(&self) -> Option<&Arc<Syntax>> {
        match self {
            Self::Syntax(syntax) => Some(syntax),
            _ => None,
        }
    }

    /// The factory, if this symbol is one
    pub fn as_factory(&self) -> Option<NodeKind> {
        match self {
            Self::Factory(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether two symbols refer to the same exported object
    pub fn same_object(&self, other: &Symbol) -> bool {
        match (self, other) {
            (Self::Node(a), Self::Node(b)) => Arc::ptr_eq(a, b),
            (Self::Syntax(a), Self::Syntax(b)) => Arc::ptr_eq(a, b),
            (Self::Factory(a), Self::Factory(b)) => a == b,
            _ => false,
        }
    }

    pub(crate) fn expect_node(&self, req: &ImportRequest) -> RegistryResult<&Arc<MibNode>> {
        self.as_node().ok_or_else(|| self.kind_error(req, "node"))
    }

    pub(crate) fn expect_typed(&self, req: &ImportRequest) -> RegistryResult<&TypedNode> {
        self.as_node()
            .and_then(|node| node.as_typed())
            .ok_or_else(|| self.kind_error(req, NodeKind::Typed.as_str()))
    }

    pub(crate) fn expect_syntax(&self, req: &ImportRequest) -> RegistryResult<&Arc<Syntax>> {
        self.as_syntax().ok_or_else(|| self.kind_error(req, "syntax"))
    }

    pub(crate) fn expect_factory(&self, req: &ImportRequest) -> RegistryResult<NodeKind> {
        self.as_factory().ok_or_else(|| self.kind_error(req, "factory"))
    }

    fn kind_error(&self, req: &ImportRequest, expected: &'static str) -> RegistryError {
        RegistryError::SymbolKind {
            module: req.module.clone(),
            symbol: req.symbol.clone(),
            expected,
            actual: self.kind_name(),
        }
    }
}

/// Name to symbol mapping published by a module
pub type ExportTable = FxHashMap<String, Symbol>;

/// A published module
#[derive(Debug, Clone)]
pub struct MibModule {
    name: String,
    imports: Vec<ImportRequest>,
    exports: ExportTable,
}

impl MibModule {
    /// Create a module from its parts
    pub fn new(name: impl Into<String>, imports: Vec<ImportRequest>, exports: ExportTable) -> Self {
        Self {
            name: name.into(),
            imports,
            exports,
        }
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Imports requested during construction, in request order
    pub fn imports(&self) -> &[ImportRequest] {
        &self.imports
    }

    /// Export table
    pub fn exports(&self) -> &ExportTable {
        &self.exports
    }

    /// Look up one export
    pub fn export(&self, symbol: &str) -> Option<&Symbol> {
        self.exports.get(symbol)
    }

    /// Exported names, sorted
    pub fn export_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.exports.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
