//! Criterion benchmarks for the daily aggregation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use wxbench_core::aggregate::{aggregate, HourlySeries};

#[allow(clippy::cast_precision_loss)]
fn synthetic_series(days: usize) -> HourlySeries {
    HourlySeries::new(
        (0..days * 24)
            .map(|h| 20.0 + 8.0 * ((h % 24) as f64 / 24.0 * std::f64::consts::TAU).sin())
            .collect(),
    )
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for &days in &[1usize, 31, 365] {
        let series = synthetic_series(days);
        group.bench_with_input(BenchmarkId::from_parameter(days), &days, |b, &days| {
            b.iter(|| aggregate(&series, days).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
