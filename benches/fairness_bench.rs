//! Performance benchmarks for labeling and epsilon estimation.
//!
//! Both operations are single-pass; these benches keep regressions from
//! sneaking in via accidental per-row allocation or re-hashing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use equidad::fairness::DifferentialFairness;
use equidad::frame::{Frame, Value};
use equidad::groups::GroupLabeler;

fn synthetic_frame(rows: usize) -> Frame {
    let sex: Vec<Value> = (0..rows).map(|i| Value::Int((i % 2) as i64)).collect();
    let age: Vec<Value> = (0..rows)
        .map(|i| {
            if i % 17 == 0 {
                Value::Missing
            } else if i % 3 == 0 {
                Value::Str("older".to_string())
            } else {
                Value::Str("young".to_string())
            }
        })
        .collect();
    Frame::from_columns(vec![("Sex".to_string(), sex), ("age_group".to_string(), age)]).unwrap()
}

fn synthetic_predictions(rows: usize, n_groups: usize) -> (Vec<f64>, Vec<String>) {
    let predictions: Vec<f64> = (0..rows).map(|i| ((i * 7) % 3 == 0) as u8 as f64).collect();
    let groups: Vec<String> = (0..rows).map(|i| format!("g{}", i % n_groups)).collect();
    (predictions, groups)
}

/// Benchmark GroupLabeler::label throughput
fn bench_labeling(c: &mut Criterion) {
    let mut group = c.benchmark_group("GroupLabeler");

    for size in [1_000, 10_000, 100_000].iter() {
        let frame = synthetic_frame(*size);
        let labeler = GroupLabeler::new(["Sex", "age_group"]).unwrap();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("label", size), size, |b, _| {
            b.iter(|| black_box(labeler.label(&frame).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark epsilon estimation across group counts
fn bench_epsilon(c: &mut Criterion) {
    let mut group = c.benchmark_group("DifferentialFairness");

    for n_groups in [2, 16, 128].iter() {
        let (predictions, groups) = synthetic_predictions(100_000, *n_groups);
        let df = DifferentialFairness::default();

        group.throughput(Throughput::Elements(100_000));
        group.bench_with_input(
            BenchmarkId::new("epsilon", n_groups),
            n_groups,
            |b, _| {
                b.iter(|| black_box(df.epsilon(&predictions, &groups).unwrap()));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_labeling, bench_epsilon);
criterion_main!(benches);
