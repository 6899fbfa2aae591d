//! Benchmarks for kelvin-rs operations.
//!
//! Run with: `cargo bench -p kelvin-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use kelvin_color::{PipelineConfig, SweepDriver, SweepMode, SweepParams};
use kelvin_math::integrate;
use kelvin_spectral::{CmfTable, ColorMatcher, radiance};

/// Benchmark Planck's law over the visible range.
fn bench_radiance(c: &mut Criterion) {
    let wavelengths: Vec<f64> = (360..=830).map(|nm| nm as f64 * 1e-9).collect();

    let mut group = c.benchmark_group("planck");
    group.throughput(Throughput::Elements(wavelengths.len() as u64));
    group.bench_function("radiance_visible", |b| {
        b.iter(|| {
            wavelengths
                .iter()
                .map(|&l| radiance(l, black_box(2856.0)))
                .sum::<f64>()
        })
    });
    group.finish();
}

/// Benchmark Simpson integration at different sample counts.
fn bench_simpson(c: &mut Criterion) {
    let mut group = c.benchmark_group("simpson");

    for size in [81, 471, 4701].iter() {
        let values: Vec<f64> = (0..*size).map(|i| (i as f64 * 0.01).sin()).collect();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("integrate", size), &values, |b, v| {
            b.iter(|| integrate(black_box(v), 1.0))
        });
    }

    group.finish();
}

/// Benchmark a single XYZ evaluation per table resolution.
fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher");

    for step in [5.0, 1.0] {
        let table = CmfTable::analytic_cie1931(360.0, 830.0, step).unwrap();
        let matcher = ColorMatcher::new(&table);
        group.bench_with_input(BenchmarkId::new("xyz", table.len()), &matcher, |b, m| {
            b.iter(|| m.xyz(black_box(5000.0)))
        });
    }

    group.finish();
}

/// Benchmark full sweeps, serial and parallel.
fn bench_sweep(c: &mut Criterion) {
    let table = CmfTable::analytic_cie1931(360.0, 830.0, 1.0).unwrap();
    let params = SweepParams::new(SweepMode::Temperature, 1000.0, 20000.0, 10.0);
    let driver = SweepDriver::new(&table, PipelineConfig::new().normalize(true));

    let mut group = c.benchmark_group("sweep");
    group.throughput(Throughput::Elements(params.count() as u64));
    group.sample_size(20);

    group.bench_function("serial", |b| b.iter(|| driver.run(black_box(&params))));
    group.bench_function("parallel", |b| {
        let driver = driver.parallel(true);
        b.iter(|| driver.run(black_box(&params)))
    });

    group.finish();
}

criterion_group!(benches, bench_radiance, bench_simpson, bench_matcher, bench_sweep);
criterion_main!(benches);
