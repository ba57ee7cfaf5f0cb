use adsim::{
    ArmStats, ConfidenceBound, ConfidenceConfig, PosteriorConfig, PosteriorSampling,
    SelectionPolicy,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn filled_stats(d: usize) -> Vec<ArmStats> {
    // A deterministic, slightly-non-uniform count pattern.
    (0..d)
        .map(|i| {
            let pulls = ((i as u64) * 17 + 3) % 101 + 1;
            let successes = pulls / 3;
            ArmStats {
                pulls,
                successes,
                failures: pulls - successes,
                cumulative_reward: successes as f64,
            }
        })
        .collect()
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    for &d in &[2usize, 10usize, 100usize] {
        let stats = filled_stats(d);

        group.bench_with_input(BenchmarkId::new("posterior_sampling", d), &d, |b, _| {
            let mut policy = PosteriorSampling::with_seed(PosteriorConfig::default(), 123);
            b.iter(|| black_box(policy.select(black_box(&stats), 1_000)))
        });

        group.bench_with_input(BenchmarkId::new("confidence_bound", d), &d, |b, _| {
            let mut policy = ConfidenceBound::new(ConfidenceConfig::default());
            b.iter(|| black_box(policy.select(black_box(&stats), 1_000)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
