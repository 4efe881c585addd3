// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query encoders.
//!
//! The embedding engine only needs one thing from a model: turn a query into
//! a vector in the same space the snippet index was built in. Which model that
//! is gets fixed by configuration and checked against the index at load, never
//! chosen per call.

pub mod hashing;

pub use hashing::HashingEmbedder;

use std::sync::Arc;
use thiserror::Error;

/// Model id of the built-in [`HashingEmbedder`] at its default dimension.
pub const DEFAULT_MODEL_ID: &str = "docket-hashing-384";

/// Dimension of the built-in [`HashingEmbedder`].
pub const DEFAULT_DIMENSION: usize = 384;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmbeddingError {
    /// Nothing to encode.
    #[error("cannot embed empty text")]
    EmptyInput,
    /// The model is not loaded or not reachable.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    /// The model ran and failed.
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

/// Encodes text into fixed-dimension vectors.
///
/// Implementations must be deterministic for a given `model_id`: the same
/// text always maps to the same vector, or precomputed snippet vectors stop
/// meaning anything.
pub trait Embedder: Send + Sync {
    /// Identifier recorded in index files built with this model.
    fn model_id(&self) -> &str;

    /// Length of every vector `encode` returns.
    fn dimension(&self) -> usize;

    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Resolve a configured model id to an embedder.
///
/// Only the built-in hashing family (`docket-hashing-<dimension>`) is known
/// here; anything else is `ModelUnavailable`.
pub fn embedder_for(model_id: &str) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    HashingEmbedder::from_model_id(model_id)
        .map(|e| Arc::new(e) as Arc<dyn Embedder>)
        .ok_or_else(|| EmbeddingError::ModelUnavailable(model_id.to_string()))
}
