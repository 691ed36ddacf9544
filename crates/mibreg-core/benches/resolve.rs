//! Symbol resolution benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mibreg_core::{
    ExportTable, ImportRequest, ModuleBuilder, NodeAttrs, NodeKind, StaticLoader, Symbol,
    SymbolRegistry,
};

fn exports(prefix: &str, count: u32) -> ExportTable {
    (0..count)
        .map(|i| {
            let name = format!("{}{}", prefix, i);
            let node = NodeKind::Typed.build(NodeAttrs::new(name.clone()).path([1, 3, 6, 1, 4, 1, i]));
            (name, Symbol::node(node))
        })
        .collect()
}

fn bench_resolve_loaded(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_loaded");
    for size in [1u32, 16, 256] {
        let mut registry = SymbolRegistry::new();
        registry.publish("M", exports("obj", size));
        let requests: Vec<ImportRequest> = (0..size)
            .map(|i| ImportRequest::new("M", format!("obj{}", i)))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &requests, |b, requests| {
            b.iter(|| registry.resolve(black_box(requests)).unwrap())
        });
    }
    group.finish();
}

fn bench_load_chain(c: &mut Criterion) {
    c.bench_function("load_chain_32", |b| {
        b.iter(|| {
            let mut loader = StaticLoader::new();
            for i in 0..32u32 {
                let name = format!("M{}", i);
                let dep = (i > 0).then(|| format!("M{}", i - 1));
                loader.register(name.clone(), move |registry: &mut SymbolRegistry| {
                    let mut builder = ModuleBuilder::new(name.clone());
                    if let Some(dep) = &dep {
                        builder = builder.import(dep.clone(), "x0");
                    }
                    builder.build(registry, |_| Ok(exports("x", 1))).map(|_| ())
                });
            }
            let mut registry = SymbolRegistry::new().with_loader(loader);
            registry
                .resolve(&[ImportRequest::new("M31", "x0")])
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_resolve_loaded, bench_load_chain);
criterion_main!(benches);
