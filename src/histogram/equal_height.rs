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

//! Equal-height builder: (approximately) equal row count per bucket

use crate::core::{Error, Result};
use crate::domain::ValueDomain;
use crate::histogram::bucket::BucketStore;
use crate::histogram::{validate_build_input, Histogram, HistogramKind};

/// Build a histogram whose buckets hold (approximately) the same number of
/// rows
///
/// The builder walks the sorted distinct values and closes a bucket as soon
/// as its running row count reaches the target height
/// `H = ceil(total_rows / max_buckets)`, including the value that crossed
/// the threshold; the last bucket absorbs whatever trails. Distinct values
/// are atomic, so exact equality of bucket heights is impossible in general
/// and the resulting bucket count may fall short of `max_buckets`.
///
/// Bucket ranges tile the column range without gaps: each bucket after the
/// first starts at the successor of its predecessor's max, so every value
/// inside `[column_min, column_max]` falls into exactly one bucket. Every
/// bucket reports the target height as its row count (the last one its
/// actual remainder, if smaller), which keeps the per-bucket uniformity
/// assumption and the row total consistent.
pub fn build_equal_height<D: ValueDomain>(
    domain: D,
    values: &[D::Value],
    counts: &[u64],
    total_rows: u64,
    max_buckets: u64,
) -> Result<Histogram<D>> {
    validate_build_input(&domain, values, counts, max_buckets)?;
    let actual: u64 = counts.iter().sum();
    if actual != total_rows {
        return Err(Error::row_count_mismatch(total_rows, actual));
    }
    if values.is_empty() {
        return Ok(Histogram::empty(domain, HistogramKind::EqualHeight));
    }

    let height = total_rows.div_ceil(max_buckets).max(1);
    let mut store = BucketStore::with_capacity(max_buckets as usize);

    let mut bucket_min = values[0].clone();
    let mut run_rows = 0u64;
    let mut run_distinct = 0u64;
    let mut consumed = 0u64;
    for (index, (value, &count)) in values.iter().zip(counts).enumerate() {
        run_rows += count;
        run_distinct += 1;
        let is_last = index + 1 == values.len();
        if run_rows >= height || is_last {
            store.push(
                bucket_min.clone(),
                value.clone(),
                height.min(total_rows - consumed),
                run_distinct,
            );
            consumed += run_rows;
            if !is_last {
                let mut next_min = domain.successor(value)?;
                // String successors can overshoot values longer than the
                // embedding prefix; fall back to the next observed value.
                if next_min > values[index + 1] {
                    next_min = values[index + 1].clone();
                }
                bucket_min = next_min;
                run_rows = 0;
                run_distinct = 0;
            }
        }
    }

    Ok(Histogram::from_store(
        domain,
        HistogramKind::EqualHeight,
        store,
        total_rows,
    ))
}
