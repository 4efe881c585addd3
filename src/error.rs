// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Searching never fails on bad luck: empty queries, empty corpora and stale
//! index rows all produce empty or shorter result lists. What does fail is
//! loading (the context refuses to exist rather than serve degraded results)
//! and the two external steps of semantic search, encoding and index lookup.

use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::index::format::IndexFormatError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DocketError>;

#[derive(Debug, Error)]
pub enum DocketError {
    /// A corpus, index or config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document or snippet table is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The TOML config could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// The vector index file is malformed.
    #[error("invalid index file: {0}")]
    IndexFormat(#[from] IndexFormatError),

    /// The embedder failed to encode a query.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Index and snippet table are out of lock-step.
    #[error("index has {index_rows} vectors but snippet table has {table_rows} rows")]
    RowCountMismatch { index_rows: usize, table_rows: usize },

    /// The snippet table is not the one the index was built from.
    #[error("snippet table fingerprint {actual:08x} does not match index fingerprint {expected:08x}")]
    FingerprintMismatch { expected: u32, actual: u32 },

    /// Vector dimensions disagree (query vs index, or embedder vs index).
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The index or embedder was built for a different model than configured.
    #[error("{component} uses model '{found}' but config expects '{expected}'")]
    ModelMismatch {
        component: &'static str,
        expected: String,
        found: String,
    },
}

impl DocketError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocketError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DocketError::Json {
            path: path.into(),
            source,
        }
    }
}
