//! SNMPv2-TC

use mibreg_core::{ExportTable, ModuleBuilder, RegistryResult, Symbol, Syntax, SymbolRegistry};

pub(crate) const MODULE: &str = "SNMPv2-TC";

pub(crate) fn define(registry: &mut SymbolRegistry) -> RegistryResult<()> {
    ModuleBuilder::new(MODULE)
        .import(super::smi::MODULE, "TimeTicks")
        .build(registry, |imports| {
            let ticks = imports.syntax(super::smi::MODULE, "TimeTicks")?;
            let mut exports = ExportTable::default();

            let conventions = [
                ("DisplayString", Syntax::constrained("OCTET STRING", "(SIZE (0..255))")),
                ("PhysAddress", Syntax::new("OCTET STRING")),
                ("MacAddress", Syntax::constrained("OCTET STRING", "(SIZE (6))")),
                ("TruthValue", Syntax::constrained("INTEGER", "{ true(1), false(2) }")),
                ("TestAndIncr", Syntax::constrained("INTEGER", "(0..2147483647)")),
                ("AutonomousType", Syntax::new("OBJECT IDENTIFIER")),
                ("TimeStamp", Syntax::clone(ticks)),
                ("TimeInterval", Syntax::constrained("INTEGER", "(0..2147483647)")),
                (
                    "RowStatus",
                    Syntax::constrained(
                        "INTEGER",
                        "{ active(1), notInService(2), notReady(3), createAndGo(4), createAndWait(5), destroy(6) }",
                    ),
                ),
                (
                    "StorageType",
                    Syntax::constrained(
                        "INTEGER",
                        "{ other(1), volatile(2), nonVolatile(3), permanent(4), readOnly(5) }",
                    ),
                ),
            ];

            for (name, syntax) in conventions {
                exports.insert(name.to_string(), Symbol::syntax(syntax));
            }
            Ok(exports)
        })?;
    Ok(())
}
