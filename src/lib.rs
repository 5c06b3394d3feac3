// Copyright 2024-2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc = include_str!("../README.md")]
#![deny(missing_docs, unsafe_code)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod adder;
mod error;
mod macros;
mod pool;
// The pyo3 macros expand to unsafe FFI glue.
#[cfg(feature = "python")]
#[allow(unsafe_code)]
mod python;
mod vector;

pub use adder::{add, add_into, VectorAdder, VectorAdderBuilder, DEFAULT_BLOCK_SIZE};
pub use error::{Error, Result};
pub use pool::{CpuPinningPolicy, RangeStrategy, ThreadCount};
pub use vector::NumericVector;
