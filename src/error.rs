// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error type of the vector operations.

use thiserror::Error;

/// Result type of the vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the vector operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The two operands don't have the same number of elements.
    #[error("length mismatch: left operand has {left} elements, right operand has {right}")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },
}

/// Checks that both operands can be added together.
pub(crate) fn check_lengths(left: &[f64], right: &[f64]) -> Result<()> {
    if left.len() == right.len() {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            left: left.len(),
            right: right.len(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = Error::LengthMismatch { left: 2, right: 1 };
        assert_eq!(
            err.to_string(),
            "length mismatch: left operand has 2 elements, right operand has 1"
        );
    }

    #[test]
    fn test_check_lengths() {
        assert_eq!(check_lengths(&[], &[]), Ok(()));
        assert_eq!(check_lengths(&[1.0, 2.0], &[3.0, 4.0]), Ok(()));
        assert_eq!(
            check_lengths(&[1.0], &[]),
            Err(Error::LengthMismatch { left: 1, right: 0 })
        );
    }
}
