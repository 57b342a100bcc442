//! B-tree operation benchmarks across minimum degrees.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mindex::BTree;

const N: u64 = 10_000;
const DEGREES: [usize; 4] = [2, 4, 16, 64];

/// Deterministic permutation of 0..N (N and the multiplier are coprime).
fn shuffled_keys() -> Vec<u64> {
    (0..N).map(|i| (i * 7919) % N).collect()
}

fn build(t: usize, keys: &[u64]) -> BTree<u64> {
    let mut tree = BTree::new(t).unwrap();
    for &k in keys {
        tree.insert(k).unwrap();
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let keys = shuffled_keys();
    let mut group = c.benchmark_group("insert");

    for t in DEGREES {
        group.bench_with_input(BenchmarkId::from_parameter(t), &t, |b, &t| {
            b.iter(|| black_box(build(t, &keys)));
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let keys = shuffled_keys();
    let mut group = c.benchmark_group("delete_all");

    for t in DEGREES {
        group.bench_with_input(BenchmarkId::from_parameter(t), &t, |b, &t| {
            b.iter_batched(
                || build(t, &keys),
                |mut tree| {
                    for k in 0..N {
                        tree.delete(&k).unwrap();
                    }
                    tree
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_lookup_and_scan(c: &mut Criterion) {
    let keys = shuffled_keys();
    let mut group = c.benchmark_group("read");

    for t in DEGREES {
        let tree = build(t, &keys);

        group.bench_with_input(BenchmarkId::new("contains", t), &tree, |b, tree| {
            b.iter(|| {
                let mut hits = 0;
                for k in (0..N).step_by(7) {
                    hits += usize::from(tree.contains(black_box(&k)));
                }
                hits
            });
        });

        group.bench_with_input(BenchmarkId::new("iter", t), &tree, |b, tree| {
            b.iter(|| tree.iter().copied().sum::<u64>());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_delete, bench_lookup_and_scan);
criterion_main!(benches);
