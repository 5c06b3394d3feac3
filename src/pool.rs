// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Worker pool settings of a [`VectorAdder`](crate::VectorAdder), and how
//! they map onto a [`paralight`] thread pool.
//!
//! The pool itself is owned by the adder and isn't part of the public API.
//!
//! ```compile_fail
//! use parvec::ThreadPool;
//! ```

use crate::macros::log_debug;
use paralight::ThreadPool;
use std::num::{NonZeroUsize, TryFromIntError};

/// Number of worker threads of an adder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThreadCount {
    /// As many threads as [`std::thread::available_parallelism()`] reports.
    AvailableParallelism,
    /// Exactly this many threads.
    Count(NonZeroUsize),
}

impl ThreadCount {
    /// Number of threads to spawn on this machine.
    ///
    /// # Panics
    ///
    /// Panics if the available parallelism can't be queried.
    pub(crate) fn resolve(self) -> NonZeroUsize {
        match self {
            ThreadCount::AvailableParallelism => std::thread::available_parallelism()
                .expect("Getting the available parallelism failed"),
            ThreadCount::Count(count) => count,
        }
    }
}

impl TryFrom<usize> for ThreadCount {
    type Error = TryFromIntError;

    /// Fails on zero.
    fn try_from(count: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::try_from(count).map(ThreadCount::Count)
    }
}

/// How the blocks of an addition are distributed among the worker threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeStrategy {
    /// Each thread gets a fixed, contiguous share of the blocks.
    Fixed,
    /// Threads that run out of blocks steal half of the remaining blocks of
    /// another thread.
    WorkStealing,
}

impl From<RangeStrategy> for paralight::RangeStrategy {
    fn from(strategy: RangeStrategy) -> Self {
        match strategy {
            RangeStrategy::Fixed => paralight::RangeStrategy::Fixed,
            RangeStrategy::WorkStealing => paralight::RangeStrategy::WorkStealing,
        }
    }
}

/// Whether worker threads are pinned to CPUs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuPinningPolicy {
    /// Don't pin.
    No,
    /// Pin worker `i` to CPU `i` where the platform supports it.
    IfSupported,
    /// Pin worker `i` to CPU `i`, and panic when building the adder if the
    /// platform doesn't support it.
    Always,
}

impl From<CpuPinningPolicy> for paralight::CpuPinningPolicy {
    fn from(policy: CpuPinningPolicy) -> Self {
        match policy {
            CpuPinningPolicy::No => paralight::CpuPinningPolicy::No,
            CpuPinningPolicy::IfSupported => paralight::CpuPinningPolicy::IfSupported,
            CpuPinningPolicy::Always => paralight::CpuPinningPolicy::Always,
        }
    }
}

/// Spawns `num_threads` workers. They live until the returned pool is
/// dropped.
pub(crate) fn spawn_pool(
    num_threads: NonZeroUsize,
    range_strategy: RangeStrategy,
    cpu_pinning: CpuPinningPolicy,
) -> ThreadPool {
    log_debug!("Spawning {num_threads} workers ({range_strategy:?}, pinning: {cpu_pinning:?})");
    paralight::ThreadPoolBuilder {
        num_threads: paralight::ThreadCount::Count(num_threads),
        range_strategy: range_strategy.into(),
        cpu_pinning: cpu_pinning.into(),
    }
    .build()
}
