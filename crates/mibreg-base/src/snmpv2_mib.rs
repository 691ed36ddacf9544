//! SNMPv2-MIB (system group)

use mibreg_core::{
    Access, ExportTable, ModuleBuilder, NodeAttrs, NodeKind, RegistryResult, Status, Symbol,
    Syntax, SymbolRegistry,
};
use std::sync::Arc;

use super::{smi, tc};

pub(crate) const MODULE: &str = "SNMPv2-MIB";

pub(crate) fn define(registry: &mut SymbolRegistry) -> RegistryResult<()> {
    ModuleBuilder::new(MODULE)
        .import_from(smi::MODULE, ["mib-2", "TimeTicks", "MibIdentifier", "MibScalar"])
        .import(tc::MODULE, "DisplayString")
        .build(registry, |imports| {
            let mib2 = imports.node(smi::MODULE, "mib-2")?;
            let identifier = imports.factory(smi::MODULE, "MibIdentifier")?;
            let scalar = imports.factory(smi::MODULE, "MibScalar")?;
            let ticks = imports.syntax(smi::MODULE, "TimeTicks")?;
            let display = imports.syntax(tc::MODULE, "DisplayString")?;
            let object_id = Arc::new(Syntax::new("OBJECT IDENTIFIER"));
            if scalar != NodeKind::Typed {
                return Err(imports.reject(format!("MibScalar builds {} nodes", scalar)));
            }

            let system = mib2.path().child(1);
            let mut exports = ExportTable::default();
            exports.insert(
                "system".into(),
                Symbol::node(identifier.build(
                    NodeAttrs::new("system").path(system.clone()).module(MODULE),
                )),
            );

            let scalars = [
                ("sysDescr", 1, display, Access::ReadOnly),
                ("sysObjectID", 2, &object_id, Access::ReadOnly),
                ("sysUpTime", 3, ticks, Access::ReadOnly),
                ("sysContact", 4, display, Access::ReadWrite),
                ("sysName", 5, display, Access::ReadWrite),
                ("sysLocation", 6, display, Access::ReadWrite),
            ];

            for (label, arc, syntax, access) in scalars {
                let node = scalar.build(
                    NodeAttrs::new(label)
                        .path(system.child(arc))
                        .syntax(Arc::clone(syntax))
                        .access(access)
                        .status(Status::Current)
                        .module(MODULE),
                );
                exports.insert(label.to_string(), Symbol::node(node));
            }

            Ok(exports)
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mibreg_core::{ImportRequest, InstanceNode};

    #[test]
    fn test_system_group_paths_and_rendering() {
        let mut registry = SymbolRegistry::new().with_loader(crate::base_loader());
        let symbols = registry
            .resolve(&[
                ImportRequest::new(MODULE, "sysUpTime"),
                ImportRequest::new(MODULE, "sysDescr"),
            ])
            .unwrap();

        let up_time = symbols[0].as_node().unwrap().as_typed().unwrap();
        assert_eq!(up_time.path().to_string(), "1.3.6.1.2.1.1.3");
        assert_eq!(
            up_time.to_string(),
            "sysUpTime OBJECT-TYPE\nSYNTAX TimeTicks (0..4294967295)\nACCESS read-only\nSTATUS current"
        );

        let descr = symbols[1].as_node().unwrap().as_typed().unwrap();
        assert_eq!(descr.syntax().unwrap().name(), "OCTET STRING");

        let instance = InstanceNode::bind(up_time, &[0]);
        assert_eq!(instance.path().to_string(), "1.3.6.1.2.1.1.3.0");
    }

    #[test]
    fn test_shares_syntax_with_tc() {
        let mut registry = SymbolRegistry::new().with_loader(crate::base_loader());
        registry.load(MODULE).unwrap();

        let display = registry
            .lookup(tc::MODULE, "DisplayString")
            .and_then(|s| s.as_syntax())
            .unwrap();
        let contact = registry
            .lookup(MODULE, "sysContact")
            .and_then(|s| s.as_node())
            .and_then(|n| n.as_typed())
            .unwrap();
        assert!(Arc::ptr_eq(display, contact.syntax().unwrap()));
    }
}
