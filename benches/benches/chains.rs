//! Benchmark rendering time of layout chains.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

criterion_main! { benches }
criterion_group! { benches, bench_depth, bench_areas }

/// Benchmarks the time taken to render chains of increasing depth.
fn bench_depth(c: &mut Criterion) {
    let mut g = c.benchmark_group("depth");

    for depth in [1, 4, 16, 48] {
        let engine = benches::chain(depth, 4);
        let name = benches::leaf(depth);
        g.bench_with_input(BenchmarkId::from_parameter(depth), &name, |b, name| {
            b.iter(|| engine.render(name, ()).to_string().unwrap());
        });
    }
}

/// Benchmarks the time taken to render chains with many areas.
fn bench_areas(c: &mut Criterion) {
    let mut g = c.benchmark_group("areas");

    for areas in [1, 16, 128] {
        let engine = benches::chain(8, areas);
        let name = benches::leaf(8);
        g.bench_with_input(BenchmarkId::from_parameter(areas), &name, |b, name| {
            b.iter(|| engine.render(name, ()).to_string().unwrap());
        });
    }
}
