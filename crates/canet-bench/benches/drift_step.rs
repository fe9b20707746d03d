//! Criterion benchmarks for stepping drift runs.

use std::hint::black_box;

use canet_bench::{reference_profile, stress_profile};
use canet_engine::{DriftWorld, NullObserver};
use canet_space::{CurveMode, DomainGeometry};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_step_500(c: &mut Criterion) {
    let geometry = DomainGeometry::canet(CurveMode::Smooth).unwrap();
    let mut world = DriftWorld::new(reference_profile(42), geometry).unwrap();

    c.bench_function("step_500", |b| {
        b.iter(|| {
            if world.is_finished() {
                world.reset(42);
            }
            let result = world.step().unwrap();
            black_box(&result);
        });
    });
}

fn bench_full_run_500x50(c: &mut Criterion) {
    let geometry = std::sync::Arc::new(DomainGeometry::canet(CurveMode::Smooth).unwrap());
    c.bench_function("full_run_500x50", |b| {
        b.iter(|| {
            let mut world =
                DriftWorld::new(reference_profile(42), std::sync::Arc::clone(&geometry)).unwrap();
            black_box(world.run(&mut NullObserver).unwrap());
        });
    });
}

fn bench_step_10k_by_workers(c: &mut Criterion) {
    let geometry = std::sync::Arc::new(DomainGeometry::canet(CurveMode::Smooth).unwrap());
    let mut group = c.benchmark_group("step_10k");
    for workers in [1usize, 2, 4] {
        let mut world =
            DriftWorld::new(stress_profile(42, workers), std::sync::Arc::clone(&geometry)).unwrap();
        group.bench_function(format!("workers_{workers}"), |b| {
            b.iter(|| {
                if world.is_finished() {
                    world.reset(42);
                }
                let result = world.step().unwrap();
                black_box(&result);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_step_500,
    bench_full_run_500x50,
    bench_step_10k_by_workers
);
criterion_main!(benches);
