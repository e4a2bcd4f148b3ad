//! Benchmarks for nearest-neighbour lookup and field synthesis.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gazeheat::{FieldSynthesizer, HeatAccumulator, HeatMapConfig, Vec3};

fn filled(config: &HeatMapConfig, count: usize) -> HeatAccumulator {
    let mut rng = fastrand::Rng::with_seed(42);
    let mut heatmap = HeatAccumulator::new(config);
    for _ in 0..count {
        let p = Vec3::new(rng.f32() * 6.0, rng.f32() * 2.0, rng.f32() * 6.0);
        heatmap.add_heat_to_point(p, 0.5 + rng.f32() * 2.0);
    }
    heatmap
}

fn bench_closest(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_heat_data");

    for &count in &[100usize, 1000, 5000] {
        let indexed = filled(&HeatMapConfig::default(), count);
        let linear = filled(
            &HeatMapConfig::default().with_spatial_cell_size(None),
            count,
        );
        let query = Vec3::new(3.0, 1.0, 3.0);

        group.bench_with_input(BenchmarkId::new("spatial_hash", count), &count, |b, _| {
            b.iter(|| black_box(indexed.closest_heat_data(black_box(query))))
        });
        group.bench_with_input(BenchmarkId::new("linear", count), &count, |b, _| {
            b.iter(|| black_box(linear.closest_heat_data(black_box(query))))
        });
    }

    group.finish();
}

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_processed_heat_map");
    group.sample_size(20);

    let config = HeatMapConfig::default();
    let synthesizer = FieldSynthesizer::new(&config);
    for &count in &[50usize, 200, 500] {
        let heatmap = filled(&config, count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(synthesizer.generate_processed_heat_map(&heatmap)))
        });
    }

    group.finish();
}

fn bench_points_between(c: &mut Criterion) {
    let synthesizer = FieldSynthesizer::new(&HeatMapConfig::default());
    c.bench_function("points_between_unit", |b| {
        b.iter(|| black_box(synthesizer.points_between(black_box(Vec3::ZERO), black_box(Vec3::X))))
    });
}

criterion_group!(benches, bench_closest, bench_synthesis, bench_points_between);
criterion_main!(benches);
