//! Benchmarks for stepping a full lattice generation.

use caex::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_step_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_generation");

    for &size in &[64usize, 128, 256] {
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("life", size), &size, |b, &size| {
            let rule = Life::conway();
            let mut lattice = Lattice::new(size, size, Topology::SquareMoore, Edge::Wrap);
            lattice.seed_random(1, 0.25, rule.state_count());
            b.iter(|| lattice.step(&rule));
        });

        group.bench_with_input(BenchmarkId::new("cyclic", size), &size, |b, &size| {
            let rule = Cyclic::new(12, 1);
            let mut lattice = Lattice::new(size, size, Topology::SquareMoore, Edge::Wrap);
            lattice.seed_random(1, 1.0, rule.state_count());
            b.iter(|| lattice.step(&rule));
        });

        group.bench_with_input(
            BenchmarkId::new("brians_brain", size),
            &size,
            |b, &size| {
                let rule = BriansBrain;
                let mut lattice = Lattice::new(size, size, Topology::SquareMoore, Edge::Wrap);
                lattice.seed_random(1, 0.3, rule.state_count());
                b.iter(|| lattice.step(&rule));
            },
        );
    }

    group.finish();
}

fn bench_rasterize(c: &mut Criterion) {
    let rule = Life::conway();
    let mut lattice = Lattice::new(256, 256, Topology::SquareMoore, Edge::Wrap);
    lattice.seed_random(1, 0.25, rule.state_count());

    c.bench_function("rasterize_256", |b| {
        b.iter(|| Palette::Viridis.rasterize(lattice.cells(), rule.state_count()));
    });
}

criterion_group!(benches, bench_step_generation, bench_rasterize);
criterion_main!(benches);
