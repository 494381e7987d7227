//! Criterion benchmarks for the binomial heap
//!
//! ```bash
//! cargo bench --bench binomial_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_binomial_heap::{BinomialHeap, Key};

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next_key(&mut self) -> Key {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 40) as Key
    }
}

fn keys(n: usize, seed: u64) -> Vec<Key> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next_key()).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for size in [1_000usize, 10_000, 100_000] {
        let input = keys(size, 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let mut heap = BinomialHeap::with_capacity(input.len());
                for &k in input {
                    heap.insert(k, ());
                }
                black_box(heap.len())
            })
        });
    }
    group.finish();
}

fn bench_insert_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_drain");
    for size in [1_000usize, 10_000] {
        let input = keys(size, 2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let mut heap = BinomialHeap::with_capacity(input.len());
                for &k in input {
                    heap.insert(k, ());
                }
                let mut acc = 0u64;
                while let Ok((k, ())) = heap.delete_min() {
                    acc = acc.wrapping_add(u64::from(k));
                }
                black_box(acc)
            })
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    for size in [1_000usize, 10_000] {
        let input = keys(size, 3);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let mut heap = BinomialHeap::with_capacity(input.len());
                let handles: Vec<_> = input.iter().map(|&k| heap.insert(k, ())).collect();
                for (handle, &k) in handles.iter().zip(input) {
                    if k > 1 {
                        heap.decrease_key(handle, k / 2).unwrap();
                    }
                }
                black_box(heap.peek().map(|(k, _)| k))
            })
        });
    }
    group.finish();
}

fn bench_meld(c: &mut Criterion) {
    let mut group = c.benchmark_group("meld");
    for parts in [16usize, 256] {
        let input = keys(parts * 64, 4);
        group.bench_with_input(BenchmarkId::from_parameter(parts), &input, |b, input| {
            b.iter(|| {
                let mut total = BinomialHeap::new();
                for chunk in input.chunks(64) {
                    let mut part = BinomialHeap::new();
                    for &k in chunk {
                        part.insert(k, ());
                    }
                    total.meld(&mut part);
                }
                black_box(total.num_trees())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_insert_drain,
    bench_decrease_key,
    bench_meld
);
criterion_main!(benches);
