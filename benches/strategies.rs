use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphclone::codegen;
use graphclone::strategies::CUSTOMER_ROUTINE;
use graphclone::{create_sample_graph, kind_registry, standard_lineup};

// Warm-path cost of one clone per strategy; one-time setup happens outside the timed loop
fn bench_warm_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("warm_clone");
    let source = create_sample_graph();

    for mut strategy in standard_lineup(&kind_registry()) {
        let name = strategy.name().to_string();
        let _ = strategy.clone_graph(&source).unwrap();
        group.bench_with_input(BenchmarkId::new("clone", &name), &source, |b, source| {
            b.iter(|| strategy.clone_graph(black_box(source)).unwrap());
        });
    }

    group.finish();
}

// What the compiled strategy pays on its first call
fn bench_routine_compilation(c: &mut Criterion) {
    let registry = kind_registry();
    c.bench_function("compile_customer_routine", |b| {
        b.iter(|| codegen::compile(black_box(CUSTOMER_ROUTINE), &registry).unwrap());
    });
}

criterion_group!(benches, bench_warm_clone, bench_routine_compilation);
criterion_main!(benches);
