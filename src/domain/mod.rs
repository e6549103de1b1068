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

//! Value-domain abstraction for histogram arithmetic
//!
//! A histogram is generic over a [`ValueDomain`] that supplies the small set
//! of capabilities estimation and construction need on top of ordering:
//! range width, distance, successor, and equal-range partitioning. Every
//! domain is a concrete monomorphized type; no dynamic dispatch sits on the
//! estimation path.
//!
//! ## Domains
//!
//! - [`Int64Domain`] - signed 64-bit integers
//! - [`Float32Domain`] / [`Float64Domain`] - IEEE-754 floats (NaN rejected)
//! - [`StringDomain`] - bounded-alphabet strings via a base-|A| embedding

pub mod numeric;
pub mod string;

use std::fmt;

use crate::core::Result;

pub use numeric::{Float32Domain, Float64Domain, Int64Domain};
pub use string::{StringAlphabet, StringDomain, DEFAULT_STRING_PREFIX_LENGTH};

/// Match interval derived from the literal prefix of a LIKE pattern
#[derive(Debug, Clone, PartialEq)]
pub struct PatternBounds<T> {
    /// Longest literal prefix before the first wildcard (inclusive lower bound)
    pub lower: T,
    /// Exclusive upper bound of the match interval; `None` when every prefix
    /// character already sits at the alphabet maximum (interval open above)
    pub upper: Option<T>,
    /// True when the pattern contains no wildcard at all and therefore
    /// matches exactly one value
    pub exact: bool,
}

/// Capabilities a value type must provide for histogram bucketing
///
/// `width` and `distance` feed the partial-bucket fraction
/// `distance(min, v) / width(min, max)`; the fraction is clamped to `[0, 1]`
/// by the caller before it scales a bucket's row count.
pub trait ValueDomain {
    /// Concrete value type bucketed by this domain
    type Value: Clone + PartialOrd + fmt::Debug;

    /// Reject values the domain cannot order (NaN); probe values that order
    /// fine but cannot be encoded are accepted here and only fail in the
    /// arithmetic that needs the encoding
    fn validate(&self, value: &Self::Value) -> Result<()>;

    /// Reject values a histogram cannot be built over; defaults to
    /// [`validate`](ValueDomain::validate), tightened by the string domain
    /// to its supported alphabet
    fn validate_build(&self, value: &Self::Value) -> Result<()> {
        self.validate(value)
    }

    /// Width of the closed range `[lo, hi]` with an exclusive upper edge:
    /// `hi - lo + 1` for discrete domains, the IEEE successor of `hi - lo`
    /// for floats
    fn width(&self, lo: &Self::Value, hi: &Self::Value) -> Result<f64>;

    /// Distance from `lo` to `value`, in the same scale as [`width`]
    ///
    /// [`width`]: ValueDomain::width
    fn distance(&self, lo: &Self::Value, value: &Self::Value) -> Result<f64>;

    /// Smallest domain value strictly greater than `value`
    fn successor(&self, value: &Self::Value) -> Result<Self::Value>;

    /// Split `[min, max]` into at most `max_parts` contiguous closed
    /// sub-ranges of (almost) equal width, covering the range without
    /// overlap: `hi_i < lo_{i+1}` with no representable value in between
    fn partition(
        &self,
        min: &Self::Value,
        max: &Self::Value,
        max_parts: u64,
    ) -> Result<Vec<(Self::Value, Self::Value)>>;

    /// Match interval for a LIKE pattern; `None` when the domain has no
    /// pattern semantics or the pattern starts with a wildcard
    fn pattern_bounds(&self, pattern: &Self::Value) -> Result<Option<PatternBounds<Self::Value>>> {
        let _ = pattern;
        Ok(None)
    }
}
