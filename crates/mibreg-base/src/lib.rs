//! Built-in SMI base modules
//!
//! Definitions of the RFC modules every MIB builds on, packaged as a
//! [`StaticLoader`] so a registry loads them the first time they are imported.

mod smi;
mod snmpv2_mib;
mod tc;

use mibreg_core::{RegistryResult, StaticLoader, SymbolRegistry};

/// Base modules provided by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseModule {
    /// SNMPv2-SMI (RFC 2578): OID roots, base types, node factories
    SnmpV2Smi,
    /// SNMPv2-TC (RFC 2579): textual conventions
    SnmpV2Tc,
    /// SNMPv2-MIB (RFC 3418): the system group
    SnmpV2Mib,
}

impl BaseModule {
    /// Canonical module name
    pub const fn name(self) -> &'static str {
        match self {
            Self::SnmpV2Smi => smi::MODULE,
            Self::SnmpV2Tc => tc::MODULE,
            Self::SnmpV2Mib => snmpv2_mib::MODULE,
        }
    }

    /// Look up a base module by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|m| m.name() == name)
    }

    /// All base modules, dependencies first
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::SnmpV2Smi, Self::SnmpV2Tc, Self::SnmpV2Mib].into_iter()
    }

    /// Build and publish this module into `registry`
    pub fn define(self, registry: &mut SymbolRegistry) -> RegistryResult<()> {
        tracing::debug!(module = self.name(), "defining base module");
        match self {
            Self::SnmpV2Smi => smi::define(registry),
            Self::SnmpV2Tc => tc::define(registry),
            Self::SnmpV2Mib => snmpv2_mib::define(registry),
        }
    }
}

/// Whether `name` is one of the built-in base modules
pub fn is_base_module(name: &str) -> bool {
    BaseModule::from_name(name).is_some()
}

/// Add every base module definition to `loader`
pub fn register_base_modules(loader: &mut StaticLoader) {
    for module in BaseModule::all() {
        loader.register(module.name(), move |registry: &mut SymbolRegistry| {
            module.define(registry)
        });
    }
}

/// A loader providing every base module
pub fn base_loader() -> StaticLoader {
    let mut loader = StaticLoader::new();
    register_base_modules(&mut loader);
    loader
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for module in BaseModule::all() {
            assert_eq!(BaseModule::from_name(module.name()), Some(module));
        }
        assert!(is_base_module("SNMPv2-TC"));
        assert!(!is_base_module("IF-MIB"));
    }

    #[test]
    fn test_loader_provides_all() {
        let loader = base_loader();
        assert_eq!(
            loader.module_names(),
            vec!["SNMPv2-MIB", "SNMPv2-SMI", "SNMPv2-TC"]
        );
    }
}
