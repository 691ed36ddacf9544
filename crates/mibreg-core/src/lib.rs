//! mibreg core
//!
//! This crate provides the linkage layer for MIB definition modules:
//! - Node model (plain, typed and instance nodes with canonical rendering)
//! - Modules with typed export tables and ordered import requests
//! - Symbol registry with on-demand loading and cycle detection
//! - Build version gate

#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod module;
pub mod node;
pub mod registry;
pub mod version;

pub use config::RegistryOptions;
pub use error::{RegistryError, RegistryResult};
pub use module::{ExportTable, ImportRequest, MibModule, ModuleBuilder, ResolvedImports, Symbol};
pub use node::{
    Access, DefVal, InstanceNode, MibNode, Node, NodeAttrs, NodeKind, Oid, Status, Syntax,
    TypedNode,
};
pub use registry::{
    ChainLoader, DependencyGraph, LoadState, ModuleDefinition, ModuleLoader, SharedRegistry,
    StaticLoader, SymbolRegistry,
};
pub use version::{check_minimum_release, check_minimum_version, VersionError};
