// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Python bindings, built with the `python` feature (and `extension-module`
//! for a wheel).
//!
//! ```python
//! import parvec
//! parvec.add_1d([1.0, 2.0], [0.5, 0.5])  # [1.5, 2.5]
//! parvec.add_1d([1.0, 2.0], [1.0])       # raises parvec.LengthMismatch
//! ```

use crate::{Error, NumericVector, Result, VectorAdder, VectorAdderBuilder};
use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::sync::{Mutex, OnceLock, PoisonError};

create_exception!(
    parvec,
    LengthMismatch,
    PyValueError,
    "Raised when the two operands of an addition have different lengths."
);

impl From<Error> for PyErr {
    fn from(e: Error) -> PyErr {
        match e {
            Error::LengthMismatch { .. } => LengthMismatch::new_err(e.to_string()),
        }
    }
}

/// Adder shared by all calls from Python, spawned on first use.
fn shared_adder() -> &'static Mutex<VectorAdder> {
    static ADDER: OnceLock<Mutex<VectorAdder>> = OnceLock::new();
    ADDER.get_or_init(|| Mutex::new(VectorAdderBuilder::default().build()))
}

/// Adds with the given adder, even if a previous call panicked while holding
/// it. The worker pool re-raises worker panics only once the round is over,
/// so the adder is always ready for the next round.
fn add_with(adder: &Mutex<VectorAdder>, a: &[f64], b: &[f64]) -> Result<NumericVector> {
    adder
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .add(a, b)
}

/// Adds two lists of floats element-wise and returns a new list.
#[pyfunction]
fn add_1d(py: Python<'_>, a: Vec<f64>, b: Vec<f64>) -> PyResult<Vec<f64>> {
    let sum = py.allow_threads(|| add_with(shared_adder(), &a, &b))?;
    Ok(sum.into_vec())
}

#[pymodule]
fn parvec(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(add_1d, m)?)?;
    m.add("LengthMismatch", m.py().get_type_bound::<LengthMismatch>())?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
