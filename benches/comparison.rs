//! Benchmark comparison: heap multiset vs ordered multiset vs sorted Vec
//!
//! Run with: cargo bench
//! Results will be in target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use medianset_core::{MedianContainer, MedianMultiset, OrderedMedianMultiset, Value};
use rand::Rng;

// ============================================================================
// Sorted Vec baseline
// ============================================================================

#[derive(Default)]
struct SortedVec {
    values: Vec<Value>,
}

impl MedianContainer for SortedVec {
    fn add(&mut self, value: Value) -> usize {
        let idx = self.values.partition_point(|&v| v <= value);
        self.values.insert(idx, value);
        self.values.len()
    }

    fn delete(&mut self, value: Value) -> bool {
        match self.values.binary_search(&value) {
            Ok(idx) => {
                self.values.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    fn get_median(&mut self) -> Option<Value> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values[(self.values.len() - 1) / 2])
        }
    }

    fn count(&self, value: Value) -> usize {
        let lo = self.values.partition_point(|&v| v < value);
        let hi = self.values.partition_point(|&v| v <= value);
        hi - lo
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

// ============================================================================
// Benchmark Helpers
// ============================================================================

type MakeContainer = fn() -> Box<dyn MedianContainer>;

fn new_heap() -> Box<dyn MedianContainer> {
    Box::new(MedianMultiset::new())
}

fn new_ordered() -> Box<dyn MedianContainer> {
    Box::new(OrderedMedianMultiset::new())
}

fn new_sorted_vec() -> Box<dyn MedianContainer> {
    Box::new(SortedVec::default())
}

fn containers() -> Vec<(&'static str, MakeContainer)> {
    vec![
        ("Heap", new_heap as MakeContainer),
        ("Ordered", new_ordered as MakeContainer),
        ("SortedVec", new_sorted_vec as MakeContainer),
    ]
}

fn random_values(count: usize, range: Value) -> Vec<Value> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen_range(-range..=range)).collect()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_insert_and_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_and_query");
    group.throughput(Throughput::Elements(1));

    for count in [1000, 10000].iter() {
        let values = random_values(*count, 1_000_000);
        for (name, make) in containers() {
            group.bench_with_input(BenchmarkId::new(name, count), &values, |b, values| {
                b.iter_with_setup(make, |mut set| {
                    for &v in values {
                        set.add(v);
                        black_box(set.get_median());
                    }
                });
            });
        }
    }

    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_workload");
    group.throughput(Throughput::Elements(1));

    // 50% adds, 30% deletes, 20% median queries over a narrow value range so
    // deletes usually hit.
    let ops = 10000;
    let prefill = random_values(5000, 500);

    for (name, make) in containers() {
        group.bench_function(name, |b| {
            b.iter_with_setup(
                || {
                    let mut set = make();
                    for &v in &prefill {
                        set.add(v);
                    }
                    set
                },
                |mut set| {
                    let mut rng = rand::thread_rng();
                    for _ in 0..ops {
                        let v = rng.gen_range(-500..=500);
                        match rng.gen_range(0..10) {
                            0..=4 => {
                                black_box(set.add(v));
                            }
                            5..=7 => {
                                black_box(set.delete(v));
                            }
                            _ => {
                                black_box(set.get_median());
                            }
                        }
                    }
                },
            );
        });
    }

    group.finish();
}

fn bench_drain_from_ends(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain_from_ends");

    for count in [1000, 10000].iter() {
        group.throughput(Throughput::Elements(*count as u64));

        for (name, make) in containers() {
            group.bench_with_input(BenchmarkId::new(name, count), count, |b, &count| {
                b.iter_with_setup(
                    || {
                        let mut set = make();
                        for v in 0..count as Value {
                            set.add(v);
                        }
                        set
                    },
                    |mut set| {
                        let (mut lo, mut hi) = (0, count as Value - 1);
                        while lo <= hi {
                            set.delete(lo);
                            set.delete(hi);
                            black_box(set.get_median());
                            lo += 1;
                            hi -= 1;
                        }
                    },
                );
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_and_query,
    bench_mixed_workload,
    bench_drain_from_ends,
);

criterion_main!(benches);
