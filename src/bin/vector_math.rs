//! Sequential versus chunked-parallel vector arithmetic.
//!
//! Run with: cargo run --release --bin vector_math [size]

use std::time::Instant;

use rayon::prelude::*;

use parallel_vector_math::{add, available_workers, outer, par_add, par_outer};

const WARMUP_ROUNDS: usize = 10;
const SUM_ROUNDS: usize = 200;
const OUTER_ROUNDS: usize = 10;

fn main() {
    let size: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3000);
    if size == 0 {
        println!("nothing to compute for size 0");
        return;
    }
    let workers = available_workers();
    let probe = size / 2;

    // ramp operands: a = [1, 2, ...], b = [2, 3, ...]
    let a: Vec<f64> = (0..size).map(|i| i as f64 + 1.0).collect();
    let b: Vec<f64> = (0..size).map(|i| i as f64 + 2.0).collect();

    println!("=== Warm-up ===\n");
    // the running checksum keeps the loops from being optimized away
    let mut checksum = 0.0;
    for _ in 0..WARMUP_ROUNDS {
        checksum += par_add(&a, &b, workers).unwrap()[probe];
        checksum += par_outer(&a, &b, workers).unwrap().get(probe, probe);
    }
    println!("warm-up ended with checksum {:.1}", checksum);

    println!(
        "\n=== Elementwise Sum ({} elements, {} workers) ===\n",
        size, workers
    );
    let start = Instant::now();
    for _ in 0..SUM_ROUNDS {
        checksum += add(&a, &b).unwrap()[probe];
    }
    let sequential = start.elapsed();
    println!("sequential:       {:?}", sequential);

    let start = Instant::now();
    for _ in 0..SUM_ROUNDS {
        checksum += par_add(&a, &b, workers).unwrap()[probe];
    }
    let partitioned = start.elapsed();
    println!("chunked parallel: {:?}", partitioned);

    let start = Instant::now();
    for _ in 0..SUM_ROUNDS {
        let sum: Vec<f64> = a.par_iter().zip(b.par_iter()).map(|(x, y)| x + y).collect();
        checksum += sum[probe];
    }
    let stolen = start.elapsed();
    println!("rayon:            {:?}", stolen);
    println!(
        "speedup over sequential: {:.2}x",
        sequential.as_secs_f64() / partitioned.as_secs_f64()
    );

    println!("\n=== Outer Product ({0}x{0} cells) ===\n", size);
    let start = Instant::now();
    for _ in 0..OUTER_ROUNDS {
        checksum += outer(&a, &b).get(probe, probe);
    }
    let sequential = start.elapsed();
    println!("sequential:       {:?}", sequential);

    let start = Instant::now();
    for _ in 0..OUTER_ROUNDS {
        checksum += par_outer(&a, &b, workers).unwrap().get(probe, probe);
    }
    let partitioned = start.elapsed();
    println!("chunked parallel: {:?}", partitioned);
    println!(
        "speedup over sequential: {:.2}x",
        sequential.as_secs_f64() / partitioned.as_secs_f64()
    );

    println!("\ntiming ended with checksum {:.1}", checksum);

    if size <= 10 {
        let sum = par_add(&a, &b, workers).unwrap();
        let product = par_outer(&a, &b, workers).unwrap();
        println!("\na     = {:?}", a);
        println!("b     = {:?}", b);
        println!("a + b = {:?}", sum);
        println!("a x b =");
        for row in 0..product.rows() {
            println!("  {:?}", product.row(row));
        }
    }

    println!("\n=== Key Points ===");
    println!("1. Contiguous chunks give each worker an exclusive output slice");
    println!("2. Every worker is joined before a result is returned");
    println!("3. Work stealing (rayon) trades fixed partitions for balance");
}
