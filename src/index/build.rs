// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Building a [`FlatIndex`] from a snippet table.
//!
//! Encoding is the only expensive part and every row is independent, so with
//! the `parallel` feature rows are encoded across the rayon pool. Order is
//! preserved: vector `i` is always snippet `i`. The finished index records
//! the table's fingerprint so a later load can tell if the table changed.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use super::FlatIndex;
use crate::embedding::{Embedder, EmbeddingError};
use crate::error::Result;
use crate::store::SnippetStore;

/// Encode every snippet and collect the vectors into an index.
///
/// A snippet with blank text gets a zero vector rather than failing the
/// build; it can still be found through a literal match.
pub fn build_index(snippets: &SnippetStore, embedder: &dyn Embedder) -> Result<FlatIndex> {
    let encode = |text: &str| match embedder.encode(text) {
        Err(EmbeddingError::EmptyInput) => Ok(vec![0.0; embedder.dimension()]),
        other => other,
    };

    #[cfg(feature = "parallel")]
    let rows: std::result::Result<Vec<Vec<f32>>, EmbeddingError> = snippets
        .as_slice()
        .par_iter()
        .map(|s| encode(&s.text))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let rows: std::result::Result<Vec<Vec<f32>>, EmbeddingError> = snippets
        .as_slice()
        .iter()
        .map(|s| encode(&s.text))
        .collect();

    let index = FlatIndex::from_rows(embedder.model_id(), embedder.dimension(), rows?)?
        .with_fingerprint(snippets.fingerprint());

    info!(
        rows = snippets.len(),
        dimension = embedder.dimension(),
        model = embedder.model_id(),
        "built vector index"
    );
    Ok(index)
}
