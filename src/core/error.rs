// Copyright 2025 Chunkstats Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for Chunkstats
//!
//! This module defines all error types used by the histogram builders and
//! the estimation surface. Builders reject invalid input before any bucket
//! is materialized, so a histogram is never partially constructed.

use thiserror::Error;

/// Result type alias for Chunkstats operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for histogram construction and estimation
///
/// This enum covers string-arithmetic failures (the only errors that can
/// occur at estimation time) and the build-time precondition violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // String arithmetic errors
    // =========================================================================
    /// Character outside the supported alphabet
    #[error("unsupported character '{0}' in histogram string domain")]
    UnsupportedCharacter(char),

    /// Invalid alphabet configuration
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    // =========================================================================
    // Build-input precondition violations
    // =========================================================================
    /// Distinct-value and count slices differ in length
    #[error("values and counts length mismatch, expected {expected}, got {got}")]
    ValuesCountsMismatch { expected: usize, got: usize },

    /// Distinct values are not sorted in strictly ascending order
    #[error("distinct values must be sorted and strictly ascending")]
    UnsortedValues,

    /// A distinct value was reported with no occurrences
    #[error("distinct value at index {index} has a zero row count")]
    ZeroValueCount { index: usize },

    /// Declared row total disagrees with the per-value counts
    #[error("row total {declared} does not match the sum of value counts {actual}")]
    RowCountMismatch { declared: u64, actual: u64 },

    /// NaN has no total order and cannot be bucketed
    #[error("NaN cannot be ordered and is rejected from float histogram domains")]
    NanValue,

    /// Range with max smaller than min
    #[error("invalid value range: max is smaller than min")]
    InvertedRange,

    /// Column value outside the declared column range
    #[error("column value lies outside the declared [min, max] range")]
    ValueOutOfRange,

    /// Zero buckets requested
    #[error("histogram requires at least one bucket")]
    ZeroBuckets,
}

impl Error {
    /// Create a new ValuesCountsMismatch error
    pub fn values_counts_mismatch(expected: usize, got: usize) -> Self {
        Error::ValuesCountsMismatch { expected, got }
    }

    /// Create a new ZeroValueCount error
    pub fn zero_value_count(index: usize) -> Self {
        Error::ZeroValueCount { index }
    }

    /// Create a new RowCountMismatch error
    pub fn row_count_mismatch(declared: u64, actual: u64) -> Self {
        Error::RowCountMismatch { declared, actual }
    }

    /// Create a new InvalidAlphabet error
    pub fn invalid_alphabet(message: impl Into<String>) -> Self {
        Error::InvalidAlphabet(message.into())
    }

    /// Check if this error reports a caller-side precondition violation
    /// (invalid build input) rather than a string-arithmetic failure
    pub fn is_precondition_violation(&self) -> bool {
        !matches!(
            self,
            Error::UnsupportedCharacter(_) | Error::InvalidAlphabet(_)
        )
    }
}
