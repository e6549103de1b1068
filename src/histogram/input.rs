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

//! Builder input preparation
//!
//! The builders consume a column as sorted distinct values plus per-value
//! row counts, the shape a columnar storage layer hands out directly.
//! [`ValueCounts`] produces that shape from a raw value slice for callers
//! that only hold the unaggregated column.

use std::cmp::Ordering;

use crate::core::Result;
use crate::domain::ValueDomain;

/// Sorted distinct values of a column with their occurrence counts
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCounts<T> {
    values: Vec<T>,
    counts: Vec<u64>,
}

impl<T: Clone + PartialOrd> ValueCounts<T> {
    /// Aggregate a raw column slice (unsorted, with duplicates) into sorted
    /// distinct values and counts; every value is validated by the domain
    pub fn from_column<D: ValueDomain<Value = T>>(domain: &D, column: &[T]) -> Result<Self> {
        for value in column {
            domain.validate_build(value)?;
        }
        let mut sorted = column.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let mut values = Vec::new();
        let mut counts: Vec<u64> = Vec::new();
        for value in sorted {
            match values.last() {
                Some(last) if *last == value => {
                    let end = counts.len() - 1;
                    counts[end] += 1;
                }
                _ => {
                    values.push(value);
                    counts.push(1);
                }
            }
        }
        Ok(Self { values, counts })
    }

    /// Distinct values in ascending order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Row count per distinct value
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Number of distinct values
    pub fn distinct_count(&self) -> usize {
        self.values.len()
    }

    /// Total number of rows aggregated
    pub fn row_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Smallest value in the column, `None` when empty
    pub fn min(&self) -> Option<&T> {
        self.values.first()
    }

    /// Largest value in the column, `None` when empty
    pub fn max(&self) -> Option<&T> {
        self.values.last()
    }

    /// Check whether the column held no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the aggregation into its value and count vectors
    pub fn into_parts(self) -> (Vec<T>, Vec<u64>) {
        (self.values, self.counts)
    }
}
