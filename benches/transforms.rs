// Parameterized comparison of sequential, chunked-parallel, and
// work-stealing implementations across input sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use rayon::prelude::*;

use parallel_vector_math::{add, available_workers, outer, par_add, par_outer};

fn random_vector(len: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn add_benchmark(c: &mut Criterion) {
    let workers = available_workers();
    let mut group = c.benchmark_group("vector_add");

    for size in [1_000, 100_000, 1_000_000].iter() {
        let left = random_vector(*size);
        let right = random_vector(*size);

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| black_box(add(&left, &right).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("chunked", size), size, |b, _| {
            b.iter(|| black_box(par_add(&left, &right, workers).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("rayon", size), size, |b, _| {
            b.iter(|| {
                let sum: Vec<f64> = left
                    .par_iter()
                    .zip(right.par_iter())
                    .map(|(x, y)| x + y)
                    .collect();
                black_box(sum)
            });
        });
    }

    group.finish();
}

fn outer_benchmark(c: &mut Criterion) {
    let workers = available_workers();
    let mut group = c.benchmark_group("vector_outer");

    for size in [64, 256, 1024].iter() {
        let left = random_vector(*size);
        let right = random_vector(*size);

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| black_box(outer(&left, &right)));
        });
        group.bench_with_input(BenchmarkId::new("chunked", size), size, |b, _| {
            b.iter(|| black_box(par_outer(&left, &right, workers).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, add_benchmark, outer_benchmark);
criterion_main!(benches);
