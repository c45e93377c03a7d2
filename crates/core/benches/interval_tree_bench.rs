#[path = "common/criterion.rs"]
mod bench_criterion;
#[path = "common/group_light.rs"]
mod group_light;
#[path = "common/rng.rs"]
mod rng;
#[path = "common/seed.rs"]
mod bench_seed;
#[path = "common/tier.rs"]
mod bench_tier;

use std::hint::black_box;

use criterion::{BenchmarkId, criterion_group, criterion_main};

use blobmark_core::IntervalTree;

use bench_criterion::{BenchCriterion, bench_criterion};
use bench_seed::bench_seed;
use bench_tier::{bench_sizes, bench_tier};
use group_light::{boxes_throughput, configure_group_light};
use rng::XorShift64;

fn gen_intervals(seed: u64, n: usize) -> Vec<(f64, f64)> {
    let mut rng = XorShift64::new(seed);
    (0..n).map(|_| rng.span(0.0..10_000.0, 1.0..50.0)).collect()
}

fn bench_tree_queries(c: &mut BenchCriterion) {
    let tier = bench_tier();
    let seed = bench_seed();

    let mut group = c.benchmark_group("interval_tree_queries");
    configure_group_light(&mut group, tier);

    for &n in bench_sizes(tier) {
        let mut tree = IntervalTree::with_capacity(n);
        for (i, (lo, hi)) in gen_intervals(seed ^ (n as u64), n).into_iter().enumerate() {
            tree.insert(lo, hi, i).unwrap();
        }
        let query = (2_000.0, 2_400.0);

        group.throughput(boxes_throughput(n));
        group.bench_with_input(BenchmarkId::new("query", n), &query, |b, q| {
            b.iter(|| {
                let hits = tree.query(q.0, q.1);
                black_box(hits.len());
            })
        });
    }

    group.finish();
}

fn bench_tree_insert_remove(c: &mut BenchCriterion) {
    let tier = bench_tier();
    let seed = bench_seed();

    let mut group = c.benchmark_group("interval_tree_insert_remove");
    configure_group_light(&mut group, tier);

    for &n in bench_sizes(tier) {
        let intervals = gen_intervals(seed ^ 0xBAD5EED, n);
        group.throughput(boxes_throughput(n));
        group.bench_with_input(
            BenchmarkId::new("insert_remove", n),
            &intervals,
            |b, intervals| {
                b.iter(|| {
                    let mut tree = IntervalTree::with_capacity(intervals.len());
                    let handles: Vec<_> = intervals
                        .iter()
                        .enumerate()
                        .map(|(i, &(lo, hi))| tree.insert(lo, hi, i).unwrap())
                        .collect();
                    for h in handles.into_iter().step_by(5) {
                        let _ = tree.remove(h);
                    }
                    black_box(tree.len());
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    name = interval_tree_benches;
    config = bench_criterion();
    targets = bench_tree_queries, bench_tree_insert_remove
);
criterion_main!(interval_tree_benches);
