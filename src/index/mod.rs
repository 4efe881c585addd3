// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Precomputed snippet vectors and nearest-neighbour lookup.
//!
//! The index is built offline from the snippet table (that pipeline lives
//! elsewhere) and loaded read-only. Position `i` in the index is row `i` of
//! the snippet table; [`VectorIndex::len`] and, when present,
//! [`VectorIndex::table_fingerprint`] are how `SearchContext` checks that the
//! two still line up.
//!
//! # Distance
//!
//! Distances are **squared L2**, the native unit of a flat L2 index. For
//! unit-length vectors that is `2 - 2·cos(a, b)`, ranging over `[0, 4]`.

pub mod build;
pub mod flat;
pub mod format;

pub use build::build_index;
pub use flat::FlatIndex;

use crate::error::Result;
use crate::types::Hit;

/// Read-only nearest-neighbour index over snippet vectors.
pub trait VectorIndex: Send + Sync {
    /// Number of vectors (must equal the snippet table's row count).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn dimension(&self) -> usize;

    /// Embedding model the vectors were produced with.
    fn model_id(&self) -> &str;

    /// Fingerprint of the snippet table the index was built from, if recorded.
    fn table_fingerprint(&self) -> Option<u32> {
        None
    }

    /// The `k` nearest vectors to `query`, ascending by distance.
    ///
    /// Returns fewer than `k` hits when the index is smaller than `k`.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Hit>>;
}

/// Squared Euclidean distance.
#[inline]
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
