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

//! Numeric value domains
//!
//! Integer ranges are discrete: a bucket `[lo, hi]` spans `hi - lo + 1`
//! values. Float ranges realize half-open bucket edges through the IEEE-754
//! successor (`next_up`), never an additive epsilon, so that
//! `distance / width` reaches 1 exactly at the successor of the bucket max.

use crate::core::{Error, Result};
use crate::domain::ValueDomain;

/// Domain of signed 64-bit integers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Int64Domain;

impl ValueDomain for Int64Domain {
    type Value = i64;

    fn validate(&self, _value: &i64) -> Result<()> {
        Ok(())
    }

    fn width(&self, lo: &i64, hi: &i64) -> Result<f64> {
        // i128 keeps the subtraction exact across the full i64 range
        Ok((*hi as i128 - *lo as i128 + 1) as f64)
    }

    fn distance(&self, lo: &i64, value: &i64) -> Result<f64> {
        Ok((*value as i128 - *lo as i128) as f64)
    }

    fn successor(&self, value: &i64) -> Result<i64> {
        Ok(value.saturating_add(1))
    }

    fn partition(&self, min: &i64, max: &i64, max_parts: u64) -> Result<Vec<(i64, i64)>> {
        if max_parts == 0 {
            return Err(Error::ZeroBuckets);
        }
        if max < min {
            return Err(Error::InvertedRange);
        }
        let span = (*max as i128 - *min as i128 + 1) as u128;
        let parts = (max_parts as u128).min(span);
        let base = span / parts;
        let extra = span % parts;

        let mut ranges = Vec::with_capacity(parts as usize);
        let mut lo = *min as i128;
        for index in 0..parts {
            let width = base + u128::from(index < extra);
            let hi = lo + width as i128 - 1;
            ranges.push((lo as i64, hi as i64));
            lo = hi + 1;
        }
        Ok(ranges)
    }
}

macro_rules! float_domain {
    ($name:ident, $doc:expr, $ty:ty) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl ValueDomain for $name {
            type Value = $ty;

            fn validate(&self, value: &$ty) -> Result<()> {
                if value.is_nan() {
                    return Err(Error::NanValue);
                }
                Ok(())
            }

            fn width(&self, lo: &$ty, hi: &$ty) -> Result<f64> {
                // Exclusive upper edge: the successor of the closed span
                Ok((*hi - *lo).next_up() as f64)
            }

            fn distance(&self, lo: &$ty, value: &$ty) -> Result<f64> {
                Ok((*value - *lo) as f64)
            }

            fn successor(&self, value: &$ty) -> Result<$ty> {
                Ok(value.next_up())
            }

            fn partition(&self, min: &$ty, max: &$ty, max_parts: u64) -> Result<Vec<($ty, $ty)>> {
                if max_parts == 0 {
                    return Err(Error::ZeroBuckets);
                }
                if max < min {
                    return Err(Error::InvertedRange);
                }
                if min == max || max_parts == 1 {
                    return Ok(vec![(*min, *max)]);
                }
                let span = (*max - *min).next_up();
                let width = span / max_parts as $ty;

                let mut ranges = Vec::with_capacity(max_parts as usize);
                let mut lo = *min;
                for index in 1..max_parts {
                    let edge = *min + width * index as $ty;
                    // Rounding can collapse an edge onto its neighbor; drop
                    // the degenerate boundary instead of emitting an
                    // inverted bucket.
                    if edge <= lo || edge > *max {
                        continue;
                    }
                    ranges.push((lo, edge.next_down()));
                    lo = edge;
                }
                ranges.push((lo, *max));
                Ok(ranges)
            }
        }
    };
}

float_domain!(
    Float32Domain,
    "Domain of IEEE-754 single-precision floats (NaN rejected)",
    f32
);
float_domain!(
    Float64Domain,
    "Domain of IEEE-754 double-precision floats (NaN rejected)",
    f64
);
