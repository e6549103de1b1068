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

//! Chunk-level column histograms
//!
//! A [`Histogram`] summarizes one column of one immutable chunk as a short
//! list of value buckets and answers two questions for the optimizer:
//!
//! - [`can_prune`] - is a predicate guaranteed to match no rows? The answer
//!   is conservative: `true` is only returned when no matching value can
//!   exist in the chunk.
//! - [`estimate_cardinality`] - roughly how many rows does a predicate
//!   select? Within a bucket, rows are assumed uniformly distributed over
//!   the bucket's value range.
//!
//! Three builders populate the identical bucket layout:
//!
//! - [`build_equal_num_elements`] - equal distinct-value count per bucket
//! - [`build_equal_width`] - equal value-range width per bucket
//! - [`build_equal_height`] - (approximately) equal row count per bucket
//!
//! [`can_prune`]: Histogram::can_prune
//! [`estimate_cardinality`]: Histogram::estimate_cardinality
//!
//! ## Example
//!
//! ```rust
//! use chunkstats::{build_equal_num_elements, Int64Domain, Predicate};
//!
//! // Sorted distinct values with their per-value row counts
//! let values = [12_i64, 123, 12_345, 123_456];
//! let counts = [1_u64, 1, 2, 3];
//!
//! let hist = build_equal_num_elements(Int64Domain, &values, &counts, 2).unwrap();
//! assert_eq!(hist.num_buckets(), 2);
//! assert!(hist.can_prune(&0, &Predicate::Eq));
//!
//! let rows = hist.estimate_cardinality(&123_456, &Predicate::Eq).unwrap();
//! assert!((rows - 2.5).abs() < f32::EPSILON);
//! ```

pub mod bucket;
pub mod equal_height;
pub mod equal_num_elements;
pub mod equal_width;
pub mod input;

use std::fmt;

use crate::core::{Error, Result};
use crate::domain::ValueDomain;

pub use bucket::{Bucket, BucketStore};
pub use equal_height::build_equal_height;
pub use equal_num_elements::build_equal_num_elements;
pub use equal_width::build_equal_width;
pub use input::ValueCounts;

/// Bucket-partitioning strategy a histogram was built with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramKind {
    /// Equal distinct-value count per bucket
    EqualNumElements,
    /// Equal value-range width per bucket
    EqualWidth,
    /// (Approximately) equal row count per bucket
    EqualHeight,
}

impl HistogramKind {
    /// Human-readable name of the strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            HistogramKind::EqualNumElements => "equal-num-elements",
            HistogramKind::EqualWidth => "equal-width",
            HistogramKind::EqualHeight => "equal-height",
        }
    }
}

impl fmt::Display for HistogramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate a histogram can prune or estimate
///
/// The probe value is passed separately; `Between` carries the inclusive
/// upper bound of the range `[value, upper]`. For `Like`/`NotLike` the probe
/// value is the pattern (`%` matches any suffix, `_` any single character).
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<T> {
    /// Equality (=)
    Eq,
    /// Inequality (!=)
    Ne,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Closed range [value, upper]
    Between(T),
    /// Pattern match (LIKE)
    Like,
    /// Negated pattern match (NOT LIKE)
    NotLike,
}

/// Immutable per-column bucket statistics
///
/// Built once per chunk snapshot by one of the builder functions and never
/// mutated; concurrent readers may share it freely. The histogram owns its
/// bucket arrays and keeps no reference to the source column.
#[derive(Debug, Clone)]
pub struct Histogram<D: ValueDomain> {
    domain: D,
    kind: HistogramKind,
    store: BucketStore<D::Value>,
    row_count: u64,
    total: u64,
    distinct: u64,
}

impl<D: ValueDomain> Histogram<D> {
    pub(crate) fn from_store(
        domain: D,
        kind: HistogramKind,
        store: BucketStore<D::Value>,
        row_count: u64,
    ) -> Self {
        let total = store.total_count();
        let distinct = store.total_distinct();
        Self {
            domain,
            kind,
            store,
            row_count,
            total,
            distinct,
        }
    }

    pub(crate) fn empty(domain: D, kind: HistogramKind) -> Self {
        Self::from_store(domain, kind, BucketStore::new(), 0)
    }

    /// Partitioning strategy this histogram was built with
    pub fn kind(&self) -> HistogramKind {
        self.kind
    }

    /// Domain configuration the histogram operates on
    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// Number of buckets
    pub fn num_buckets(&self) -> usize {
        self.store.len()
    }

    /// Sum of all bucket row counts
    pub fn total_count(&self) -> u64 {
        self.total
    }

    /// Sum of all bucket distinct counts
    pub fn total_distinct_count(&self) -> u64 {
        self.distinct
    }

    /// Row count of the source column at build time; at least
    /// [`total_count`](Histogram::total_count)
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Smallest value covered by any bucket, `None` for an empty histogram
    pub fn min(&self) -> Option<&D::Value> {
        (!self.store.is_empty()).then(|| self.store.min(0))
    }

    /// Largest value covered by any bucket, `None` for an empty histogram
    pub fn max(&self) -> Option<&D::Value> {
        (!self.store.is_empty()).then(|| self.store.max(self.store.len() - 1))
    }

    /// Read-only view of bucket `index`
    pub fn bucket(&self, index: usize) -> Bucket<'_, D::Value> {
        self.store.bucket(index)
    }

    /// Index of the unique bucket whose range contains `value`, if any
    pub fn bucket_for_value(&self, value: &D::Value) -> Option<usize> {
        self.store.bucket_for_value(value)
    }

    /// Smallest bucket index with `max >= value`, if any
    pub fn lower_bound_bucket(&self, value: &D::Value) -> Option<usize> {
        self.store.lower_bound(value)
    }

    /// Smallest bucket index with `max > value`, if any
    pub fn upper_bound_bucket(&self, value: &D::Value) -> Option<usize> {
        self.store.upper_bound(value)
    }

    /// Check whether `predicate` is guaranteed to select no rows
    ///
    /// Conservative: returns `false` whenever a matching value may exist,
    /// including when the probe value fails domain validation.
    pub fn can_prune(&self, value: &D::Value, predicate: &Predicate<D::Value>) -> bool {
        if self.store.is_empty() {
            return true;
        }
        match predicate {
            Predicate::Like => self.can_prune_pattern(value),
            Predicate::NotLike => false,
            _ => {
                if self.domain.validate(value).is_err() {
                    return false;
                }
                let last = self.store.len() - 1;
                match predicate {
                    Predicate::Eq => match self.store.bucket_for_value(value) {
                        Some(index) => self.store.count(index) == 0,
                        None => true,
                    },
                    // All rows equal the probe value only when the histogram
                    // covers a single point
                    Predicate::Ne => {
                        self.store.min(0) == value && self.store.max(last) == value
                    }
                    Predicate::Lt => value <= self.store.min(0),
                    Predicate::Lte => value < self.store.min(0),
                    Predicate::Gt => value >= self.store.max(last),
                    Predicate::Gte => value > self.store.max(last),
                    Predicate::Between(upper) => {
                        if self.domain.validate(upper).is_err() {
                            return false;
                        }
                        upper < value || !self.has_rows_between(value, Some(upper), true)
                    }
                    Predicate::Like | Predicate::NotLike => false,
                }
            }
        }
    }

    /// Estimate the number of rows selected by `predicate`
    ///
    /// Non-negative; zero whenever [`can_prune`](Histogram::can_prune)
    /// returns `true`. The only estimation-time error is
    /// [`Error::UnsupportedCharacter`] from string arithmetic.
    pub fn estimate_cardinality(
        &self,
        value: &D::Value,
        predicate: &Predicate<D::Value>,
    ) -> Result<f32> {
        if self.store.is_empty() {
            return Ok(0.0);
        }
        match predicate {
            Predicate::Like => self.estimate_pattern(value, false),
            Predicate::NotLike => self.estimate_pattern(value, true),
            _ => {
                self.domain.validate(value)?;
                let total = self.total as f64;
                let estimate = match predicate {
                    Predicate::Eq => self.estimate_eq(value),
                    Predicate::Ne => total - self.estimate_eq(value),
                    Predicate::Lt => self.estimate_lt(value)?,
                    Predicate::Lte => self.estimate_lt(value)? + self.estimate_eq(value),
                    Predicate::Gt => {
                        total - self.estimate_lt(value)? - self.estimate_eq(value)
                    }
                    Predicate::Gte => total - self.estimate_lt(value)?,
                    Predicate::Between(upper) => {
                        self.domain.validate(upper)?;
                        if upper < value {
                            0.0
                        } else {
                            self.estimate_lt(upper)? + self.estimate_eq(upper)
                                - self.estimate_lt(value)?
                        }
                    }
                    Predicate::Like | Predicate::NotLike => unreachable!("handled above"),
                };
                Ok(estimate.max(0.0) as f32)
            }
        }
    }

    /// Rows matching `= value`: the containing bucket's count spread evenly
    /// over its distinct values
    fn estimate_eq(&self, value: &D::Value) -> f64 {
        match self.store.bucket_for_value(value) {
            Some(index) if self.store.distinct(index) > 0 => {
                self.store.count(index) as f64 / self.store.distinct(index) as f64
            }
            _ => 0.0,
        }
    }

    /// Rows matching `< value`: every bucket entirely below the probe plus
    /// a linear fraction of the bucket containing (or straddling) it
    fn estimate_lt(&self, value: &D::Value) -> Result<f64> {
        if *value <= *self.store.min(0) {
            return Ok(0.0);
        }
        if *value > *self.store.max(self.store.len() - 1) {
            return Ok(self.total as f64);
        }
        let index = match self.store.lower_bound(value) {
            Some(index) => index,
            None => return Ok(self.total as f64),
        };
        let mut estimate = self.store.cumulative_count(index) as f64;

        let min = self.store.min(index);
        if *value > *min {
            let width = self.domain.width(min, self.store.max(index))?;
            if width > 0.0 {
                let fraction = (self.domain.distance(min, value)? / width).clamp(0.0, 1.0);
                estimate += fraction * self.store.count(index) as f64;
            }
        }
        Ok(estimate)
    }

    /// LIKE / NOT LIKE over the longest literal prefix of the pattern;
    /// without a prefix there is no selectivity information either way and
    /// the full row count is returned
    fn estimate_pattern(&self, pattern: &D::Value, negate: bool) -> Result<f32> {
        let total = self.total as f64;
        let bounds = match self.domain.pattern_bounds(pattern)? {
            Some(bounds) => bounds,
            None => return Ok(total as f32),
        };
        let covered = if bounds.exact {
            self.estimate_eq(&bounds.lower)
        } else {
            match &bounds.upper {
                Some(upper) => self.estimate_lt(upper)? - self.estimate_lt(&bounds.lower)?,
                None => total - self.estimate_lt(&bounds.lower)?,
            }
        };
        let covered = covered.clamp(0.0, total);
        let estimate = if negate { total - covered } else { covered };
        Ok(estimate as f32)
    }

    fn can_prune_pattern(&self, pattern: &D::Value) -> bool {
        let bounds = match self.domain.pattern_bounds(pattern) {
            Ok(Some(bounds)) => bounds,
            // No prefix information or invalid pattern: never claim pruning
            _ => return false,
        };
        if bounds.exact {
            return self.can_prune(&bounds.lower, &Predicate::Eq);
        }
        !self.has_rows_between(&bounds.lower, bounds.upper.as_ref(), false)
    }

    /// Check whether any bucket holding rows intersects `[lo, upper]`
    /// (inclusive) or `[lo, upper)` (exclusive); an absent upper bound means
    /// the interval is open above
    fn has_rows_between(
        &self,
        lo: &D::Value,
        upper: Option<&D::Value>,
        upper_inclusive: bool,
    ) -> bool {
        let start = match self.store.lower_bound(lo) {
            Some(start) => start,
            None => return false,
        };
        for index in start..self.store.len() {
            if let Some(hi) = upper {
                let min = self.store.min(index);
                let beyond = if upper_inclusive { *min > *hi } else { *min >= *hi };
                if beyond {
                    break;
                }
            }
            if self.store.count(index) > 0 {
                return true;
            }
        }
        false
    }
}

/// Shared builder-input validation: matching lengths, positive counts,
/// domain-valid values in strictly ascending order
pub(crate) fn validate_build_input<D: ValueDomain>(
    domain: &D,
    values: &[D::Value],
    counts: &[u64],
    max_buckets: u64,
) -> Result<()> {
    if max_buckets == 0 {
        return Err(Error::ZeroBuckets);
    }
    if values.len() != counts.len() {
        return Err(Error::values_counts_mismatch(values.len(), counts.len()));
    }
    for value in values {
        domain.validate_build(value)?;
    }
    if let Some(index) = counts.iter().position(|&count| count == 0) {
        return Err(Error::zero_value_count(index));
    }
    if values.windows(2).any(|pair| !(pair[0] < pair[1])) {
        return Err(Error::UnsortedValues);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Int64Domain, StringDomain};

    #[test]
    fn test_kind_display() {
        assert_eq!(HistogramKind::EqualNumElements.to_string(), "equal-num-elements");
        assert_eq!(HistogramKind::EqualWidth.to_string(), "equal-width");
        assert_eq!(HistogramKind::EqualHeight.to_string(), "equal-height");
    }

    #[test]
    fn test_validate_build_input() {
        let domain = Int64Domain;
        assert!(validate_build_input(&domain, &[1, 2, 3], &[1, 1, 1], 4).is_ok());
        assert_eq!(
            validate_build_input(&domain, &[1, 2], &[1, 1], 0),
            Err(Error::ZeroBuckets)
        );
        assert_eq!(
            validate_build_input(&domain, &[1, 2], &[1], 2),
            Err(Error::values_counts_mismatch(2, 1))
        );
        assert_eq!(
            validate_build_input(&domain, &[1, 2], &[1, 0], 2),
            Err(Error::zero_value_count(1))
        );
        assert_eq!(
            validate_build_input(&domain, &[2, 1], &[1, 1], 2),
            Err(Error::UnsortedValues)
        );
        assert_eq!(
            validate_build_input(&domain, &[1, 1], &[1, 1], 2),
            Err(Error::UnsortedValues)
        );
    }

    #[test]
    fn test_validate_build_input_rejects_nan() {
        use crate::domain::Float64Domain;
        let domain = Float64Domain;
        assert_eq!(
            validate_build_input(&domain, &[1.0, f64::NAN], &[1, 1], 2),
            Err(Error::NanValue)
        );
    }

    #[test]
    fn test_validate_build_input_rejects_bad_strings() {
        let domain = StringDomain::default();
        assert_eq!(
            validate_build_input(&domain, &["abc".into(), "ab1".into()], &[1, 1], 2),
            Err(Error::UnsupportedCharacter('1'))
        );
    }

    #[test]
    fn test_empty_histogram_behavior() {
        let hist = Histogram::empty(Int64Domain, HistogramKind::EqualNumElements);
        assert_eq!(hist.num_buckets(), 0);
        assert_eq!(hist.total_count(), 0);
        assert_eq!(hist.min(), None);
        assert_eq!(hist.max(), None);
        for predicate in [
            Predicate::Eq,
            Predicate::Ne,
            Predicate::Lt,
            Predicate::Lte,
            Predicate::Gt,
            Predicate::Gte,
            Predicate::Between(10),
        ] {
            assert!(hist.can_prune(&5, &predicate), "{:?}", predicate);
            assert_eq!(hist.estimate_cardinality(&5, &predicate).unwrap(), 0.0);
        }
    }
}
