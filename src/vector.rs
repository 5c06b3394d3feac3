// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An immutable vector of `f64`.

use crate::adder::add;
use crate::error::Result;
use std::ops::{Deref, Index};

/// An immutable, fixed-length sequence of `f64` stored contiguously.
///
/// Equality follows IEEE-754 (`NaN != NaN`); use [`bit_eq()`](Self::bit_eq)
/// to compare bit patterns instead.
///
/// ```
/// # use parvec::NumericVector;
/// let a = NumericVector::from(vec![1.0, 2.0]);
/// let b: NumericVector = [0.5, f64::INFINITY].into_iter().collect();
/// let sum = a.try_add(&b).unwrap();
/// assert_eq!(sum.as_slice(), &[1.5, f64::INFINITY]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumericVector {
    data: Box<[f64]>,
}

impl NumericVector {
    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// Adds two vectors element-wise on the calling thread.
    ///
    /// Returns [`Error::LengthMismatch`](crate::Error::LengthMismatch) if the
    /// lengths differ.
    pub fn try_add(&self, other: &NumericVector) -> Result<NumericVector> {
        add(self, other)
    }

    /// Returns true if both vectors have the same length and their elements
    /// have the same bit patterns.
    pub fn bit_eq(&self, other: &NumericVector) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }

    /// Returns the underlying elements.
    pub fn into_vec(self) -> Vec<f64> {
        self.data.into_vec()
    }

    /// Returns the underlying elements.
    pub fn into_boxed_slice(self) -> Box<[f64]> {
        self.data
    }
}

impl From<Vec<f64>> for NumericVector {
    fn from(data: Vec<f64>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }
}

impl From<Box<[f64]>> for NumericVector {
    fn from(data: Box<[f64]>) -> Self {
        Self { data }
    }
}

impl From<&[f64]> for NumericVector {
    fn from(data: &[f64]) -> Self {
        Self { data: data.into() }
    }
}

impl<const N: usize> From<[f64; N]> for NumericVector {
    fn from(data: [f64; N]) -> Self {
        Self {
            data: Box::new(data),
        }
    }
}

impl From<NumericVector> for Vec<f64> {
    fn from(vector: NumericVector) -> Self {
        vector.into_vec()
    }
}

impl FromIterator<f64> for NumericVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl Deref for NumericVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.data
    }
}

impl AsRef<[f64]> for NumericVector {
    fn as_ref(&self) -> &[f64] {
        &self.data
    }
}

impl Index<usize> for NumericVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl<'a> IntoIterator for &'a NumericVector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;

    #[test]
    fn test_conversions_preserve_elements() {
        let expected = [1.0, -2.5, f64::MAX];
        for vector in [
            NumericVector::from(expected.to_vec()),
            NumericVector::from(&expected[..]),
            NumericVector::from(expected),
            NumericVector::from(Box::<[f64]>::from(&expected[..])),
            expected.iter().copied().collect(),
        ] {
            assert_eq!(vector.len(), 3);
            assert_eq!(vector.as_slice(), &expected);
            assert_eq!(vector[1], -2.5);
            assert_eq!(Vec::from(vector), expected.to_vec());
        }
    }

    #[test]
    fn test_default_is_empty() {
        let vector = NumericVector::default();
        assert!(vector.is_empty());
        assert_eq!(vector.iter().count(), 0);
    }

    #[test]
    fn test_bit_eq_distinguishes_nan_equality() {
        let a = NumericVector::from(vec![f64::NAN, 0.0]);
        let b = NumericVector::from(vec![f64::NAN, 0.0]);
        assert_ne!(a, b);
        assert!(a.bit_eq(&b));

        // +0.0 == -0.0 under IEEE-754, but the bit patterns differ.
        let c = NumericVector::from(vec![f64::NAN, -0.0]);
        assert!(!a.bit_eq(&c));
        assert!(!a.bit_eq(&NumericVector::from(vec![f64::NAN])));
    }

    #[test]
    fn test_try_add() {
        let a = NumericVector::from(vec![1.0, 2.0, 3.0]);
        let b = NumericVector::from(vec![10.0, 20.0, 30.0]);
        assert_eq!(a.try_add(&b).unwrap().as_slice(), &[11.0, 22.0, 33.0]);

        let short = NumericVector::from(vec![1.0]);
        assert_eq!(
            a.try_add(&short),
            Err(Error::LengthMismatch { left: 3, right: 1 })
        );
    }

    #[test]
    fn test_try_add_leaves_inputs_untouched() {
        let a = NumericVector::from(vec![0.1, 0.2]);
        let b = NumericVector::from(vec![0.3, 0.4]);
        let (a_before, b_before) = (a.clone(), b.clone());
        let _ = a.try_add(&b).unwrap();
        assert!(a.bit_eq(&a_before));
        assert!(b.bit_eq(&b_before));
    }
}
