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

//! Equal-num-elements builder: equal distinct-value count per bucket

use crate::core::Result;
use crate::domain::ValueDomain;
use crate::histogram::bucket::BucketStore;
use crate::histogram::{validate_build_input, Histogram, HistogramKind};

/// Build a histogram whose buckets hold (almost) the same number of
/// distinct values
///
/// `values` are the column's distinct values in strictly ascending order,
/// `counts[i]` the number of rows carrying `values[i]`. With `D` distinct
/// values and `N = min(max_buckets, D)` buckets, the first `D mod N`
/// buckets own one distinct value more than the rest; bucket bounds are the
/// first and last owned value. An empty column yields an empty histogram.
pub fn build_equal_num_elements<D: ValueDomain>(
    domain: D,
    values: &[D::Value],
    counts: &[u64],
    max_buckets: u64,
) -> Result<Histogram<D>> {
    validate_build_input(&domain, values, counts, max_buckets)?;
    if values.is_empty() {
        return Ok(Histogram::empty(domain, HistogramKind::EqualNumElements));
    }

    let distinct = values.len() as u64;
    let buckets = distinct.min(max_buckets);
    let per_bucket = distinct / buckets;
    let with_extra = distinct % buckets;

    let mut store = BucketStore::with_capacity(buckets as usize);
    let mut begin = 0usize;
    for index in 0..buckets {
        let size = (per_bucket + u64::from(index < with_extra)) as usize;
        let end = begin + size;
        store.push(
            values[begin].clone(),
            values[end - 1].clone(),
            counts[begin..end].iter().sum(),
            size as u64,
        );
        begin = end;
    }

    let row_count = counts.iter().sum();
    Ok(Histogram::from_store(
        domain,
        HistogramKind::EqualNumElements,
        store,
        row_count,
    ))
}
