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

//! Bucket storage shared by all histogram variants
//!
//! Four parallel arrays (min, max, row count, distinct count) hold the
//! buckets in ascending, non-overlapping order: `max_i < min_{i+1}`. The
//! variants differ only in how a builder populates the arrays; lookup and
//! estimation read the same layout.

/// Read-only view of a single bucket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket<'a, T> {
    /// Inclusive lower bound
    pub min: &'a T,
    /// Inclusive upper bound
    pub max: &'a T,
    /// Number of rows in the bucket
    pub count: u64,
    /// Number of distinct values in the bucket
    pub distinct: u64,
}

/// Per-bucket arrays of a histogram
///
/// Indices are caller preconditions: accessors `debug_assert!` bounds and
/// index directly in release builds.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketStore<T> {
    mins: Vec<T>,
    maxs: Vec<T>,
    counts: Vec<u64>,
    distincts: Vec<u64>,
}

impl<T: Clone + PartialOrd> BucketStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty store with room for `capacity` buckets
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            mins: Vec::with_capacity(capacity),
            maxs: Vec::with_capacity(capacity),
            counts: Vec::with_capacity(capacity),
            distincts: Vec::with_capacity(capacity),
        }
    }

    /// Append a bucket; buckets must be pushed in ascending order
    pub fn push(&mut self, min: T, max: T, count: u64, distinct: u64) {
        debug_assert!(min <= max, "bucket min must not exceed max");
        debug_assert!(
            self.maxs.last().map_or(true, |prev| *prev < min),
            "buckets must be pushed in ascending, non-overlapping order"
        );
        self.mins.push(min);
        self.maxs.push(max);
        self.counts.push(count);
        self.distincts.push(distinct);
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check whether the store holds no buckets
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Inclusive lower bound of bucket `index`
    pub fn min(&self, index: usize) -> &T {
        debug_assert!(index < self.mins.len(), "bucket index out of range");
        &self.mins[index]
    }

    /// Inclusive upper bound of bucket `index`
    pub fn max(&self, index: usize) -> &T {
        debug_assert!(index < self.maxs.len(), "bucket index out of range");
        &self.maxs[index]
    }

    /// Row count of bucket `index`
    pub fn count(&self, index: usize) -> u64 {
        debug_assert!(index < self.counts.len(), "bucket index out of range");
        self.counts[index]
    }

    /// Distinct-value count of bucket `index`
    pub fn distinct(&self, index: usize) -> u64 {
        debug_assert!(index < self.distincts.len(), "bucket index out of range");
        self.distincts[index]
    }

    /// Read-only view of bucket `index`
    pub fn bucket(&self, index: usize) -> Bucket<'_, T> {
        Bucket {
            min: self.min(index),
            max: self.max(index),
            count: self.count(index),
            distinct: self.distinct(index),
        }
    }

    /// Sum of all bucket row counts
    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Sum of all bucket distinct counts
    pub fn total_distinct(&self) -> u64 {
        self.distincts.iter().sum()
    }

    /// Sum of the row counts of all buckets before `index`
    pub fn cumulative_count(&self, index: usize) -> u64 {
        debug_assert!(index <= self.counts.len(), "bucket index out of range");
        self.counts[..index].iter().sum()
    }

    /// Smallest index whose bucket max is `>= value`, if any
    pub fn lower_bound(&self, value: &T) -> Option<usize> {
        let mut lo = 0;
        let mut hi = self.maxs.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.maxs[mid] < *value {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        (lo < self.maxs.len()).then_some(lo)
    }

    /// Smallest index whose bucket max is `> value`, if any
    pub fn upper_bound(&self, value: &T) -> Option<usize> {
        let mut lo = 0;
        let mut hi = self.maxs.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.maxs[mid] <= *value {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        (lo < self.maxs.len()).then_some(lo)
    }

    /// Index of the unique bucket whose `[min, max]` range contains `value`,
    /// or `None` when the value falls outside every bucket
    pub fn bucket_for_value(&self, value: &T) -> Option<usize> {
        let index = self.lower_bound(value)?;
        (self.mins[index] <= *value).then_some(index)
    }
}

impl<T: Clone + PartialOrd> Default for BucketStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_buckets() -> BucketStore<i64> {
        let mut store = BucketStore::new();
        store.push(12, 123, 2, 2);
        store.push(12_345, 12_345, 2, 1);
        store.push(123_456, 123_456, 3, 1);
        store
    }

    #[test]
    fn test_push_and_accessors() {
        let store = three_buckets();
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
        assert_eq!(*store.min(0), 12);
        assert_eq!(*store.max(0), 123);
        assert_eq!(store.count(2), 3);
        assert_eq!(store.distinct(1), 1);

        let bucket = store.bucket(0);
        assert_eq!(*bucket.min, 12);
        assert_eq!(*bucket.max, 123);
        assert_eq!(bucket.count, 2);
        assert_eq!(bucket.distinct, 2);
    }

    #[test]
    fn test_totals() {
        let store = three_buckets();
        assert_eq!(store.total_count(), 7);
        assert_eq!(store.total_distinct(), 4);
        assert_eq!(store.cumulative_count(0), 0);
        assert_eq!(store.cumulative_count(2), 4);
        assert_eq!(store.cumulative_count(3), 7);
    }

    #[test]
    fn test_lower_bound() {
        let store = three_buckets();
        assert_eq!(store.lower_bound(&0), Some(0));
        assert_eq!(store.lower_bound(&123), Some(0));
        assert_eq!(store.lower_bound(&124), Some(1));
        assert_eq!(store.lower_bound(&12_345), Some(1));
        assert_eq!(store.lower_bound(&123_456), Some(2));
        assert_eq!(store.lower_bound(&123_457), None);
    }

    #[test]
    fn test_upper_bound() {
        let store = three_buckets();
        assert_eq!(store.upper_bound(&0), Some(0));
        assert_eq!(store.upper_bound(&123), Some(1));
        assert_eq!(store.upper_bound(&12_345), Some(2));
        assert_eq!(store.upper_bound(&123_456), None);
    }

    #[test]
    fn test_bucket_for_value() {
        let store = three_buckets();
        assert_eq!(store.bucket_for_value(&12), Some(0));
        assert_eq!(store.bucket_for_value(&70), Some(0));
        assert_eq!(store.bucket_for_value(&123), Some(0));
        // Gap between buckets
        assert_eq!(store.bucket_for_value(&1_234), None);
        assert_eq!(store.bucket_for_value(&12_345), Some(1));
        // Outside the histogram
        assert_eq!(store.bucket_for_value(&0), None);
        assert_eq!(store.bucket_for_value(&1_000_000), None);
    }

    #[test]
    fn test_empty_store() {
        let store: BucketStore<i64> = BucketStore::default();
        assert!(store.is_empty());
        assert_eq!(store.lower_bound(&5), None);
        assert_eq!(store.upper_bound(&5), None);
        assert_eq!(store.bucket_for_value(&5), None);
        assert_eq!(store.total_count(), 0);
    }

    #[test]
    fn test_float_store() {
        let mut store = BucketStore::new();
        store.push(0.5f32, 2.2, 4, 4);
        store.push(2.5, 3.3, 6, 3);
        assert_eq!(store.bucket_for_value(&1.0), Some(0));
        assert_eq!(store.bucket_for_value(&2.3), None);
        assert_eq!(store.bucket_for_value(&2.2f32.next_up()), None);
        assert_eq!(store.lower_bound(&2.2f32.next_up()), Some(1));
    }
}
