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

//! Equal-width builder: equal value-range width per bucket

use crate::core::{Error, Result};
use crate::domain::ValueDomain;
use crate::histogram::bucket::BucketStore;
use crate::histogram::{validate_build_input, Histogram, HistogramKind};

/// Build a histogram whose buckets cover (almost) equal-width sub-ranges of
/// the column range `[min, max]`
///
/// The domain partitions the range: integer buckets differ by at most one
/// value in width (the wider ones leading), float buckets share one exact
/// width with edges at `min + i * width`. Bucket bounds are the partition
/// edges, not observed extremes, so sub-ranges without values stay in the
/// store as empty buckets (`count = 0`, `distinct = 0`).
pub fn build_equal_width<D: ValueDomain>(
    domain: D,
    min: &D::Value,
    max: &D::Value,
    values: &[D::Value],
    counts: &[u64],
    max_buckets: u64,
) -> Result<Histogram<D>> {
    validate_build_input(&domain, values, counts, max_buckets)?;
    domain.validate_build(min)?;
    domain.validate_build(max)?;
    if max < min {
        return Err(Error::InvertedRange);
    }
    if values.is_empty() {
        return Ok(Histogram::empty(domain, HistogramKind::EqualWidth));
    }
    if values[0] < *min || values[values.len() - 1] > *max {
        return Err(Error::ValueOutOfRange);
    }

    let ranges = domain.partition(min, max, max_buckets)?;
    let last = ranges.len() - 1;

    let mut store = BucketStore::with_capacity(ranges.len());
    let mut pos = 0usize;
    for (index, (lo, hi)) in ranges.into_iter().enumerate() {
        let start = pos;
        if index == last {
            pos = values.len();
        } else {
            while pos < values.len() && values[pos] <= hi {
                pos += 1;
            }
        }
        let count: u64 = counts[start..pos].iter().sum();
        let distinct = (pos - start) as u64;

        // A lossy domain partition (string embedding) can decode edges
        // short of the values it groups; widen the edges so every observed
        // value stays covered. Exact numeric partitions are unaffected.
        let mut bucket_min = lo;
        let mut bucket_max = hi;
        if distinct > 0 {
            if values[start] < bucket_min {
                bucket_min = values[start].clone();
            }
            if values[pos - 1] > bucket_max {
                bucket_max = values[pos - 1].clone();
            }
        }
        store.push(bucket_min, bucket_max, count, distinct);
    }

    let row_count = counts.iter().sum();
    Ok(Histogram::from_store(
        domain,
        HistogramKind::EqualWidth,
        store,
        row_count,
    ))
}
