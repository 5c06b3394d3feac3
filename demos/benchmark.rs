// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Adds two large random vectors serially and on a thread pool, and checks
//! that both results agree bit-for-bit.

use clap::{Parser, ValueEnum};
use parvec::{
    CpuPinningPolicy, NumericVector, RangeStrategy, ThreadCount, VectorAdderBuilder,
    DEFAULT_BLOCK_SIZE,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::hint::black_box;
use std::num::NonZeroUsize;
use std::process::ExitCode;
use std::time::{Duration, Instant};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    println!("Generating 2 random vectors of {} elements...", cli.len);
    let mut rng = ChaCha12Rng::seed_from_u64(cli.seed);
    let a = random_vector(&mut rng, cli.len);
    let b = random_vector(&mut rng, cli.len);

    let (expected, serial_time) = timed(|| serial_sum(&a, &b));
    println!("serial: {serial_time:?}");

    let mut adder = VectorAdderBuilder {
        num_threads: match cli.num_threads {
            Some(num_threads) => ThreadCount::Count(num_threads),
            None => ThreadCount::AvailableParallelism,
        },
        range_strategy: match cli.range_strategy {
            RangeStrategyCli::Fixed => RangeStrategy::Fixed,
            RangeStrategyCli::WorkStealing => RangeStrategy::WorkStealing,
        },
        cpu_pinning: CpuPinningPolicy::IfSupported,
        block_size: cli.block_size,
    }
    .build();

    let (actual, parallel_time) = timed(|| adder.add(black_box(&a), black_box(&b)));
    let actual = match actual {
        Ok(actual) => actual,
        Err(e) => {
            eprintln!("Parallel addition failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "parvec ({} threads, blocks of {}): {parallel_time:?}",
        adder.num_threads(),
        adder.block_size()
    );
    if !parallel_time.is_zero() {
        println!(
            "speedup: {:.2}x",
            serial_time.as_secs_f64() / parallel_time.as_secs_f64()
        );
    }

    if !actual.bit_eq(&expected) {
        let index = actual
            .iter()
            .zip(expected.iter())
            .position(|(x, y)| x.to_bits() != y.to_bits());
        eprintln!("Results differ (first mismatch at index {index:?})");
        return ExitCode::FAILURE;
    }
    println!("Results are identical.");
    ExitCode::SUCCESS
}

fn random_vector(rng: &mut ChaCha12Rng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.random::<f64>()).collect()
}

/// Reference sum with a plain indexed loop.
#[allow(clippy::needless_range_loop)]
fn serial_sum(a: &[f64], b: &[f64]) -> NumericVector {
    let mut output = vec![0.0; a.len()];
    for i in 0..output.len() {
        output[i] = black_box(a)[i] + black_box(b)[i];
    }
    NumericVector::from(output)
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Benchmark of element-wise vector addition.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(version)]
struct Cli {
    /// Number of elements in each vector.
    #[arg(long, default_value_t = 100_000_000)]
    len: usize,

    /// Seed of the random inputs.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of worker threads. Default to the available parallelism.
    #[arg(long)]
    num_threads: Option<NonZeroUsize>,

    /// Policy to split work among threads.
    #[arg(long, value_enum, default_value_t = RangeStrategyCli::WorkStealing)]
    range_strategy: RangeStrategyCli,

    /// Number of elements per block of work.
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: NonZeroUsize,
}

/// Policy to split work among threads.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
enum RangeStrategyCli {
    /// Each worker thread processes a fixed sequential chunk of blocks.
    Fixed,
    /// Worker threads can steal blocks from each other.
    WorkStealing,
}
