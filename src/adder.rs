// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Element-wise addition of `f64` vectors, serial and on a thread pool.

use crate::error::{check_lengths, Result};
use crate::macros::log_debug;
use crate::pool::{spawn_pool, CpuPinningPolicy, RangeStrategy, ThreadCount};
use crate::vector::NumericVector;
use paralight::iter::{
    IntoParallelRefMutSource, IntoParallelRefSource, ParallelIteratorExt, ParallelSourceExt,
    ZipableSource,
};
use paralight::ThreadPool;
use std::num::NonZeroUsize;

/// Default number of elements per block processed by a worker thread (128 KiB
/// of `f64` output).
pub const DEFAULT_BLOCK_SIZE: NonZeroUsize = match NonZeroUsize::new(16 * 1024) {
    Some(block_size) => block_size,
    None => unreachable!(),
};

/// Adds two slices element-wise on the calling thread.
///
/// The `i`-th output element is `a[i] + b[i]` under IEEE-754 double-precision
/// arithmetic, so NaNs and infinities propagate as usual. Nothing is allocated
/// if the lengths differ.
///
/// ```
/// # use parvec::{add, Error};
/// let sum = add(&[1.0, 2.0], &[0.5, -2.0]).unwrap();
/// assert_eq!(sum.as_slice(), &[1.5, 0.0]);
///
/// assert_eq!(
///     add(&[1.0, 2.0], &[1.0]),
///     Err(Error::LengthMismatch { left: 2, right: 1 })
/// );
/// ```
pub fn add(a: &[f64], b: &[f64]) -> Result<NumericVector> {
    check_lengths(a, b)?;
    Ok(add_serial(a, b))
}

/// Writes `a[i] + b[i]` into `out[i]` for every index.
///
/// This is the kernel that every addition path runs, on the whole vectors or
/// on one block at a time. It is written as zipped slice iterators so that
/// the compiler can vectorize it.
///
/// # Panics
///
/// Panics if the three slices don't have the same length.
///
/// ```
/// # use parvec::add_into;
/// let mut out = [0.0; 3];
/// add_into(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &mut out);
/// assert_eq!(out, [5.0, 7.0, 9.0]);
/// ```
#[inline]
pub fn add_into(a: &[f64], b: &[f64], out: &mut [f64]) {
    assert!(
        a.len() == b.len() && a.len() == out.len(),
        "add_into() called with slices of lengths {}, {} and {}",
        a.len(),
        b.len(),
        out.len()
    );
    out.iter_mut()
        .zip(a.iter().zip(b))
        .for_each(|(out, (&x, &y))| *out = x + y);
}

/// Serial addition of slices of equal lengths.
fn add_serial(a: &[f64], b: &[f64]) -> NumericVector {
    let mut output = vec![0.0; a.len()];
    add_into(a, b, &mut output);
    NumericVector::from(output)
}

/// Parameters of a [`VectorAdder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorAdderBuilder {
    /// Number of worker threads to spawn.
    pub num_threads: ThreadCount,
    /// Distribution of the blocks among the threads.
    pub range_strategy: RangeStrategy,
    /// CPU pinning of the threads.
    pub cpu_pinning: CpuPinningPolicy,
    /// Number of elements in each block of work. Inputs that fit in a single
    /// block are added on the calling thread.
    pub block_size: NonZeroUsize,
}

impl Default for VectorAdderBuilder {
    fn default() -> Self {
        Self {
            num_threads: ThreadCount::AvailableParallelism,
            range_strategy: RangeStrategy::WorkStealing,
            cpu_pinning: CpuPinningPolicy::No,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl VectorAdderBuilder {
    /// Spawns the worker threads of the adder.
    ///
    /// ```
    /// # use parvec::{CpuPinningPolicy, RangeStrategy, ThreadCount, VectorAdderBuilder};
    /// # use std::num::NonZeroUsize;
    /// let mut adder = VectorAdderBuilder {
    ///     num_threads: ThreadCount::try_from(4).unwrap(),
    ///     range_strategy: RangeStrategy::Fixed,
    ///     cpu_pinning: CpuPinningPolicy::No,
    ///     block_size: NonZeroUsize::new(1024).unwrap(),
    /// }
    /// .build();
    ///
    /// let a = (0..10_000).map(|i| i as f64).collect::<Vec<_>>();
    /// let b = (0..10_000).map(|i| 0.5 * i as f64).collect::<Vec<_>>();
    /// let sum = adder.add(&a, &b).unwrap();
    /// assert_eq!(sum[9_999], 1.5 * 9_999.0);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `num_threads` is [`ThreadCount::AvailableParallelism`] and
    /// the parallelism can't be queried, or if `cpu_pinning` is
    /// [`CpuPinningPolicy::Always`] on a platform without CPU pinning.
    pub fn build(&self) -> VectorAdder {
        let num_threads = self.num_threads.resolve();
        VectorAdder {
            thread_pool: spawn_pool(num_threads, self.range_strategy, self.cpu_pinning),
            num_threads,
            block_size: self.block_size,
        }
    }
}

/// Adds large vectors element-wise on a pool of worker threads.
///
/// The output is split into blocks of [`block_size()`](Self::block_size)
/// elements, and each block is written by exactly one worker. Results are
/// bit-identical to [`add()`] whatever the number of threads, range strategy
/// or block size.
///
/// Calls take `&mut self` because the pool runs one addition at a time; use
/// one adder per thread to add concurrently.
pub struct VectorAdder {
    thread_pool: ThreadPool,
    num_threads: NonZeroUsize,
    block_size: NonZeroUsize,
}

impl VectorAdder {
    /// Returns the number of worker threads of this adder.
    pub fn num_threads(&self) -> NonZeroUsize {
        self.num_threads
    }

    /// Returns the number of elements per block of work.
    pub fn block_size(&self) -> NonZeroUsize {
        self.block_size
    }

    /// Adds two slices element-wise.
    ///
    /// Returns [`Error::LengthMismatch`](crate::Error::LengthMismatch), before
    /// allocating anything, if the lengths differ.
    pub fn add(&mut self, a: &[f64], b: &[f64]) -> Result<NumericVector> {
        check_lengths(a, b)?;

        let block_size = self.block_size.get();
        if a.len() <= block_size {
            return Ok(add_serial(a, b));
        }

        let mut output = vec![0.0; a.len()];
        {
            let mut out_blocks = output.chunks_mut(block_size).collect::<Vec<_>>();
            let a_blocks = a.chunks(block_size).collect::<Vec<_>>();
            let b_blocks = b.chunks(block_size).collect::<Vec<_>>();
            log_debug!(
                "Adding {} elements in {} blocks of {block_size} on {} threads",
                a.len(),
                out_blocks.len(),
                self.num_threads
            );

            (
                out_blocks.par_iter_mut(),
                a_blocks.par_iter(),
                b_blocks.par_iter(),
            )
                .zip_eq()
                .with_thread_pool(&mut self.thread_pool)
                .for_each(|(out, a, b)| add_into(a, b, out));
        }

        Ok(NumericVector::from(output))
    }
}
