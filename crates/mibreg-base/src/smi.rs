//! SNMPv2-SMI

use mibreg_core::{
    DefVal, ExportTable, ModuleBuilder, NodeAttrs, NodeKind, Oid, RegistryResult, Symbol, Syntax,
    SymbolRegistry,
};

pub(crate) const MODULE: &str = "SNMPv2-SMI";

/// OID roots as (label, arcs)
const ROOTS: &[(&str, &[u32])] = &[
    ("ccitt", &[0]),
    ("iso", &[1]),
    ("joint-iso-ccitt", &[2]),
    ("org", &[1, 3]),
    ("dod", &[1, 3, 6]),
    ("internet", &[1, 3, 6, 1]),
    ("directory", &[1, 3, 6, 1, 1]),
    ("mgmt", &[1, 3, 6, 1, 2]),
    ("mib-2", &[1, 3, 6, 1, 2, 1]),
    ("transmission", &[1, 3, 6, 1, 2, 1, 10]),
    ("experimental", &[1, 3, 6, 1, 3]),
    ("private", &[1, 3, 6, 1, 4]),
    ("enterprises", &[1, 3, 6, 1, 4, 1]),
    ("security", &[1, 3, 6, 1, 5]),
    ("snmpV2", &[1, 3, 6, 1, 6]),
    ("snmpDomains", &[1, 3, 6, 1, 6, 1]),
    ("snmpProxys", &[1, 3, 6, 1, 6, 2]),
    ("snmpModules", &[1, 3, 6, 1, 6, 3]),
];

/// Application types as (name, base type, constraint)
const BASE_TYPES: &[(&str, &str, Option<&str>)] = &[
    ("Integer32", "INTEGER", Some("(-2147483648..2147483647)")),
    ("Counter32", "Counter32", Some("(0..4294967295)")),
    ("Gauge32", "Gauge32", Some("(0..4294967295)")),
    ("Unsigned32", "Unsigned32", Some("(0..4294967295)")),
    ("TimeTicks", "TimeTicks", Some("(0..4294967295)")),
    ("Counter64", "Counter64", Some("(0..18446744073709551615)")),
    ("IpAddress", "OCTET STRING", Some("(SIZE (4))")),
    ("Opaque", "OCTET STRING", None),
];

/// Node factories by the class names definition modules import
const FACTORIES: &[(&str, NodeKind)] = &[
    ("MibNode", NodeKind::Node),
    ("MibIdentifier", NodeKind::Node),
    ("MibScalar", NodeKind::Typed),
    ("MibTable", NodeKind::Typed),
    ("MibTableRow", NodeKind::Typed),
    ("MibTableColumn", NodeKind::Typed),
    ("MibScalarInstance", NodeKind::Instance),
];

pub(crate) fn define(registry: &mut SymbolRegistry) -> RegistryResult<()> {
    ModuleBuilder::new(MODULE).build(registry, |_| {
        let mut exports = ExportTable::default();

        for (label, arcs) in ROOTS {
            let node = NodeKind::Node.build(NodeAttrs::new(*label).path(*arcs).module(MODULE));
            exports.insert(label.to_string(), Symbol::node(node));
        }

        let zero = Oid::from([0, 0]);
        let zero_dot_zero = NodeAttrs::new("zeroDotZero")
            .path(zero.clone())
            .value(DefVal::Oid(zero))
            .module(MODULE);
        exports.insert(
            "zeroDotZero".into(),
            Symbol::node(NodeKind::Node.build(zero_dot_zero)),
        );

        for (name, base, constraint) in BASE_TYPES {
            let syntax = match constraint {
                Some(c) => Syntax::constrained(*base, *c),
                None => Syntax::new(*base),
            };
            exports.insert(name.to_string(), Symbol::syntax(syntax));
        }

        for (name, kind) in FACTORIES {
            exports.insert(name.to_string(), Symbol::Factory(*kind));
        }

        Ok(exports)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mibreg_core::ImportRequest;

    #[test]
    fn test_roots_have_paths() {
        let mut registry = SymbolRegistry::new();
        define(&mut registry).unwrap();

        let symbols = registry
            .resolve(&[
                ImportRequest::new(MODULE, "mib-2"),
                ImportRequest::new(MODULE, "enterprises"),
            ])
            .unwrap();
        assert_eq!(symbols[0].as_node().unwrap().path().to_string(), "1.3.6.1.2.1");
        assert_eq!(symbols[1].as_node().unwrap().path().to_string(), "1.3.6.1.4.1");
    }

    #[test]
    fn test_zero_dot_zero_renders_value() {
        let mut registry = SymbolRegistry::new();
        define(&mut registry).unwrap();
        let node = registry.lookup(MODULE, "zeroDotZero").unwrap();
        assert_eq!(node.as_node().unwrap().to_string(), "{ zeroDotZero 0.0 }");
    }

    #[test]
    fn test_exports_factories_and_types() {
        let mut registry = SymbolRegistry::new();
        define(&mut registry).unwrap();
        assert_eq!(
            registry.lookup(MODULE, "MibScalarInstance").and_then(Symbol::as_factory),
            Some(NodeKind::Instance)
        );
        let ip = registry.lookup(MODULE, "IpAddress").and_then(Symbol::as_syntax).unwrap();
        assert_eq!(ip.to_string(), "OCTET STRING (SIZE (4))");
    }
}
