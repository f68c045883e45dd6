//! PartialHeapSort top-K benchmark.
//!
//! Compares pulling the first `k` elements through `PartialHeapSort` against
//! draining it fully and against `sort_unstable` + `truncate` (baseline).
//! Expected: small `k` should stay close to the O(n) heap construction cost.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use ixseq::context::ExecutionContext;
use ixseq::ordering::{NaturalOrder, PartialHeapSort};
use ixseq::sequence::{LazySequenceExt, from_values};
use std::hint::black_box;

const SIZES: [u64; 3] = [1_000, 10_000, 100_000];
const TOP: usize = 10;

/// Deterministic pseudo-random input so runs are comparable.
fn generate_values(size: u64) -> Vec<u64> {
    let mut state = 0x9e37_79b9_7f4a_7c15_u64;
    (0..size)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        })
        .collect()
}

fn benchmark_top_k(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("partial_heap_sort_top_k");
    let context = ExecutionContext::new();

    for size in SIZES {
        let values = generate_values(size);
        group.bench_with_input(BenchmarkId::new("heap_top_10", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sorted = PartialHeapSort::new(from_values(black_box(values.clone())), NaturalOrder);
                black_box(sorted.take(TOP).try_collect(&context))
            });
        });
        group.bench_with_input(BenchmarkId::new("heap_full", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sorted = PartialHeapSort::new(from_values(black_box(values.clone())), NaturalOrder);
                black_box(sorted.try_collect(&context))
            });
        });
        group.bench_with_input(BenchmarkId::new("sort_truncate", size), &size, |bencher, _| {
            bencher.iter_batched(
                || values.clone(),
                |mut values| {
                    values.sort_unstable();
                    values.truncate(TOP);
                    black_box(values)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_top_k);
criterion_main!(benches);
