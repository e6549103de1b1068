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

//! # Chunkstats - Chunk-level column histograms for query optimization
//!
//! Chunkstats builds per-column, per-chunk histograms for the cost-based
//! optimizer of a column-oriented database. A histogram answers two
//! questions about a predicate without touching the data: can the chunk be
//! *pruned* (guaranteed zero matching rows), and roughly how many rows will
//! match (*cardinality estimation*).
//!
//! ## Key Features
//!
//! - **Three bucket layouts** - equal-num-elements (equi-depth by distinct
//!   values), equal-width (equi-range), and equal-height (equi-frequency by
//!   rows) behind one estimation surface
//! - **Conservative pruning** - `can_prune` never claims pruning when a
//!   matching value may exist
//! - **Typed value domains** - monomorphized integer, float, and
//!   bounded-alphabet string domains; no dynamic dispatch on the estimation
//!   path
//! - **IEEE-correct float edges** - half-open bucket boundaries through the
//!   platform successor (`next_up`), never an additive epsilon
//! - **String range arithmetic** - successor/predecessor and an
//!   order-preserving base-|A| embedding drive LIKE-prefix estimation
//! - **Immutable value objects** - built once per chunk snapshot, shareable
//!   across threads without synchronization
//!
//! ## Quick Start
//!
//! ```rust
//! use chunkstats::{build_equal_height, Int64Domain, Predicate, ValueCounts};
//!
//! // Aggregate a raw column into sorted distinct values and counts
//! let column = [12_i64, 123, 12_345, 12_345, 123_456, 123_456, 123_456];
//! let agg = ValueCounts::from_column(&Int64Domain, &column).unwrap();
//!
//! let hist = build_equal_height(
//!     Int64Domain,
//!     agg.values(),
//!     agg.counts(),
//!     agg.row_count(),
//!     3,
//! )
//! .unwrap();
//!
//! // A value below the column range prunes the whole chunk
//! assert!(hist.can_prune(&0, &Predicate::Eq));
//!
//! // Rows with value < 12'346
//! let rows = hist.estimate_cardinality(&12_346, &Predicate::Lt).unwrap();
//! assert_eq!(rows, 3.0);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Error types ([`Error`], [`Result`])
//! - [`domain`] - Value domains ([`Int64Domain`], [`Float32Domain`],
//!   [`Float64Domain`], [`StringDomain`]) and the [`ValueDomain`] trait
//! - [`histogram`] - [`Histogram`], the three builders, and the bucket store

pub mod core;
pub mod domain;
pub mod histogram;

// Re-export core types for convenience
pub use crate::core::{Error, Result};

// Re-export domain types
pub use domain::{
    Float32Domain, Float64Domain, Int64Domain, PatternBounds, StringAlphabet, StringDomain,
    ValueDomain, DEFAULT_STRING_PREFIX_LENGTH,
};

// Re-export histogram types and builders
pub use histogram::{
    build_equal_height, build_equal_num_elements, build_equal_width, Bucket, BucketStore,
    Histogram, HistogramKind, Predicate, ValueCounts,
};
