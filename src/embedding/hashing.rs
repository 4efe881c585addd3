// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Feature-hashing embedder.
//!
//! Bag-of-words with each token hashed (FNV-1a) into three buckets of a fixed
//! vector, weighted by term frequency and L2-normalised. No model files, no
//! network, fully deterministic: good enough to serve small corpora and to
//! exercise the whole semantic path in tests. Swap in a transformer-backed
//! `Embedder` for real recall.

use std::collections::HashMap;

use super::{Embedder, EmbeddingError, DEFAULT_DIMENSION};

const MODEL_PREFIX: &str = "docket-hashing-";

/// Weight of each salted bucket a token lands in.
const BUCKET_WEIGHTS: [f32; 3] = [1.0, 0.7, 0.5];

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
    model_id: String,
}

impl HashingEmbedder {
    /// `dimension` must be non-zero.
    pub fn new(dimension: usize) -> Self {
        let dimension = dimension.max(1);
        Self {
            dimension,
            model_id: format!("{}{}", MODEL_PREFIX, dimension),
        }
    }

    /// Parse `docket-hashing-<dimension>`. Zero dimensions are rejected.
    pub fn from_model_id(model_id: &str) -> Option<Self> {
        let dimension: usize = model_id.strip_prefix(MODEL_PREFIX)?.parse().ok()?;
        (dimension > 0).then(|| Self::new(dimension))
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl Embedder for HashingEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let mut vector = vec![0.0f32; self.dimension];

        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Ok(vector);
        }

        let mut freq: HashMap<&str, f32> = HashMap::new();
        for token in &tokens {
            *freq.entry(*token).or_insert(0.0) += 1.0;
        }

        let total = tokens.len() as f32;
        for (token, count) in &freq {
            let tf = count / total;
            for (salt, weight) in BUCKET_WEIGHTS.iter().enumerate() {
                let bucket = fnv1a(token.as_bytes(), salt as u8) as usize % self.dimension;
                vector[bucket] += tf * weight;
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        Ok(vector)
    }
}

/// FNV-1a over `data` followed by one salt byte.
fn fnv1a(data: &[u8], salt: u8) -> u32 {
    let mut hash: u32 = 2_166_136_261;
    for &byte in data.iter().chain(std::iter::once(&salt)) {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}
