// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Exact (brute-force) nearest-neighbour index.
//!
//! One contiguous `Vec<f32>`, row-major. A query scans every row, which at
//! agenda-corpus sizes (tens of thousands of snippets, a few hundred
//! dimensions) is a few milliseconds and gives exact results. With the
//! `parallel` feature the scan is split across the rayon pool.

use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use super::format::{self, IndexFormatError};
use super::{squared_l2, VectorIndex};
use crate::error::{DocketError, Result};
use crate::types::Hit;

#[derive(Debug, Clone, PartialEq)]
pub struct FlatIndex {
    model_id: String,
    dimension: usize,
    vectors: Vec<f32>,
    fingerprint: Option<u32>,
}

impl FlatIndex {
    /// Empty index. `dimension` must be non-zero.
    pub fn new(model_id: impl Into<String>, dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(IndexFormatError::ZeroDimension.into());
        }
        Ok(Self {
            model_id: model_id.into(),
            dimension,
            vectors: Vec::new(),
            fingerprint: None,
        })
    }

    /// Build from rows; every row must have `dimension` values.
    pub fn from_rows<I, R>(model_id: impl Into<String>, dimension: usize, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f32]>,
    {
        let mut index = Self::new(model_id, dimension)?;
        for row in rows {
            index.push(row.as_ref())?;
        }
        Ok(index)
    }

    /// Record the fingerprint of the snippet table these rows belong to.
    pub fn with_fingerprint(mut self, fingerprint: u32) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    /// Append one row.
    pub fn push(&mut self, row: &[f32]) -> Result<()> {
        if row.len() != self.dimension {
            return Err(DocketError::DimensionMismatch {
                expected: self.dimension,
                actual: row.len(),
            });
        }
        self.vectors.extend_from_slice(row);
        Ok(())
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        let start = i.checked_mul(self.dimension)?;
        self.vectors.get(start..start + self.dimension)
    }

    // ========================================================================
    // SERIALIZATION
    // ========================================================================

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(format::encode(
            &self.model_id,
            self.dimension,
            self.fingerprint,
            &self.vectors,
        )?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded = format::decode(bytes)?;
        Ok(Self {
            fingerprint: decoded.header.fingerprint(),
            dimension: decoded.header.dimension as usize,
            model_id: decoded.model_id,
            vectors: decoded.vectors,
        })
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes).map_err(|e| DocketError::io(path, e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote index");
        Ok(())
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| DocketError::io(path, e))?;
        let index = Self::from_bytes(&bytes)?;
        info!(
            path = %path.display(),
            rows = index.len(),
            dimension = index.dimension,
            model = %index.model_id,
            "opened vector index"
        );
        Ok(index)
    }

    fn distances(&self, query: &[f32]) -> Vec<Hit> {
        #[cfg(feature = "parallel")]
        let hits = self
            .vectors
            .par_chunks_exact(self.dimension)
            .enumerate()
            .map(|(i, row)| Hit::new(i, squared_l2(query, row)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let hits = self
            .vectors
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(i, row)| Hit::new(i, squared_l2(query, row)))
            .collect();

        hits
    }
}

/// Ascending by distance, then by row so equal distances stay deterministic.
fn hit_order(a: &Hit, b: &Hit) -> std::cmp::Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.row.cmp(&b.row))
}

impl VectorIndex for FlatIndex {
    fn len(&self) -> usize {
        self.vectors.len() / self.dimension
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn table_fingerprint(&self) -> Option<u32> {
        self.fingerprint
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Hit>> {
        if query.len() != self.dimension {
            return Err(DocketError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits = self.distances(query);
        if k < hits.len() {
            hits.select_nth_unstable_by(k - 1, hit_order);
            hits.truncate(k);
        }
        hits.sort_unstable_by(hit_order);
        Ok(hits)
    }
}
