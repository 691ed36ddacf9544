//! Integration tests for loading user modules on top of the base modules

use mibreg_base::{base_loader, BaseModule};
use mibreg_core::{
    check_minimum_release, ChainLoader, ExportTable, ImportRequest, InstanceNode, ModuleBuilder,
    RegistryError, RegistryOptions, SharedRegistry, StaticLoader, Symbol, SymbolRegistry,
};

/// Binds instances of the system group scalars, like an agent's instance module
fn system_instances(registry: &mut SymbolRegistry) -> Result<(), RegistryError> {
    check_minimum_release(0, 1).map_err(|e| RegistryError::Definition {
        module: "SYSTEM-INSTANCES".into(),
        message: e.to_string(),
    })?;

    ModuleBuilder::new("SYSTEM-INSTANCES")
        .import_from("SNMPv2-MIB", ["sysDescr", "sysUpTime"])
        .build(registry, |imports| {
            let mut exports = ExportTable::default();
            for (symbol, value) in [("sysDescr", "mibreg agent"), ("sysUpTime", "0")] {
                let template = imports.typed("SNMPv2-MIB", symbol)?;
                let instance = InstanceNode::bind(template, &[0]).with_value(value);
                exports.insert(format!("{}Instance", symbol), Symbol::node(instance));
            }
            Ok(exports)
        })
        .map(|_| ())
}

fn user_loader() -> StaticLoader {
    StaticLoader::new().with("SYSTEM-INSTANCES", system_instances)
}

#[test]
fn test_user_module_pulls_in_base_chain() {
    let loader = ChainLoader::new().push(user_loader()).push(base_loader());
    let mut registry = SymbolRegistry::new().with_loader(loader);

    let symbols = registry
        .resolve(&[ImportRequest::new("SYSTEM-INSTANCES", "sysUpTimeInstance")])
        .unwrap();
    let instance = symbols[0].as_node().unwrap().as_instance().unwrap();
    assert_eq!(instance.path().to_string(), "1.3.6.1.2.1.1.3.0");
    assert_eq!(instance.to_string(), "{ sysUpTime 0 }");

    for module in BaseModule::all() {
        assert!(registry.is_loaded(module.name()), "{} not loaded", module.name());
    }

    let order = registry.load_order().unwrap();
    let pos = |name: &str| order.iter().position(|m| m == name).unwrap();
    assert!(pos("SNMPv2-SMI") < pos("SNMPv2-TC"));
    assert!(pos("SNMPv2-TC") < pos("SNMPv2-MIB"));
    assert!(pos("SNMPv2-MIB") < pos("SYSTEM-INSTANCES"));
}

#[test]
fn test_unknown_symbol_in_base_module() {
    let mut registry = SymbolRegistry::new().with_loader(base_loader());
    let err = registry
        .resolve(&[ImportRequest::new("SNMPv2-MIB", "sysServices")])
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::UnresolvedSymbol {
            module: "SNMPv2-MIB".into(),
            symbol: "sysServices".into(),
        }
    );
    // The module itself loaded fine and stays loaded
    assert!(registry.is_loaded("SNMPv2-MIB"));
}

#[test]
fn test_preload_from_options() {
    let options = RegistryOptions {
        preload: vec!["SNMPv2-TC".into()],
        ..RegistryOptions::default()
    };
    let mut registry = SymbolRegistry::with_options(options).with_loader(base_loader());
    registry.preload().unwrap();

    assert_eq!(registry.module_names(), vec!["SNMPv2-SMI", "SNMPv2-TC"]);
}

#[test]
fn test_shared_registry_across_threads() {
    let loader = ChainLoader::new().push(user_loader()).push(base_loader());
    let shared = SharedRegistry::new(SymbolRegistry::new().with_loader(loader));

    let handles: Vec<_> = ["sysDescrInstance", "sysUpTimeInstance"]
        .into_iter()
        .map(|symbol| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                shared.resolve(&[ImportRequest::new("SYSTEM-INSTANCES", symbol)])
            })
        })
        .collect();

    for handle in handles {
        let symbols = handle.join().unwrap().unwrap();
        assert!(symbols[0].as_node().unwrap().as_instance().is_some());
    }
    assert!(shared.is_loaded("SNMPv2-SMI"));
}
