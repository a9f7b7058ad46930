//! Benchmark for the online mean/variance accumulator against a two-pass
//! reference, across stream sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use featurestats_rs::stats::MeanVarianceAccumulator;

/// Deterministic pseudo-random stream, no RNG dependency needed.
fn synthetic_stream(len: usize) -> Vec<f64> {
    let mut state: u64 = 0x9e3779b97f4a7c15;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            1e6 + (state >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect()
}

fn two_pass_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
    (mean, ss / (n - 1.0))
}

fn bench_welford(c: &mut Criterion) {
    let mut group = c.benchmark_group("mean_variance");
    for len in [1_000usize, 100_000, 1_000_000] {
        let stream = synthetic_stream(len);

        group.bench_with_input(BenchmarkId::new("welford", len), &stream, |b, stream| {
            b.iter(|| {
                let mut acc = MeanVarianceAccumulator::new();
                acc.observe_all(black_box(stream));
                black_box((acc.mean(), acc.variance()))
            })
        });

        group.bench_with_input(BenchmarkId::new("two_pass", len), &stream, |b, stream| {
            b.iter(|| black_box(two_pass_variance(black_box(stream))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_welford);
criterion_main!(benches);
