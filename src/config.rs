// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration.
//!
//! Everything here is fixed for the lifetime of a `SearchContext`. Changing a
//! value means building a new context, same as reloading the corpus.
//!
//! ```toml
//! model_id = "docket-hashing-384"
//! distance_threshold = 1.5
//! default_k = 100
//! context_lines = 2
//! pathless_policy = "drop"
//! rrf_k = 60
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::embedding::DEFAULT_MODEL_ID;
use crate::error::{DocketError, Result};

/// Squared-L2 distance above which a hit needs a literal match to survive.
///
/// For unit-length vectors squared L2 is `2 - 2·cos`, so 1.5 keeps hits with
/// cosine similarity of at least 0.25.
pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 1.5;

/// Nearest neighbours requested from the index per semantic query.
pub const DEFAULT_K: usize = 100;

/// Lines of context on each side of a lexical match.
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// Reciprocal rank fusion constant (Cormack et al., SIGIR 2009).
pub const DEFAULT_RRF_K: usize = 60;

/// What semantic dedupe does with snippets that have no source path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathlessPolicy {
    /// Drop every path-less result. This is how the agenda site has always
    /// behaved; whether it is intended is still an open product question.
    #[default]
    Drop,
    /// Keep every path-less result (never deduped against each other).
    Keep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Embedding model the index was built with. Checked at load.
    pub model_id: String,
    pub distance_threshold: f32,
    pub default_k: usize,
    pub context_lines: usize,
    pub pathless_policy: PathlessPolicy,
    pub rrf_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            default_k: DEFAULT_K,
            context_lines: DEFAULT_CONTEXT_LINES,
            pathless_policy: PathlessPolicy::Drop,
            rrf_k: DEFAULT_RRF_K,
        }
    }
}

impl SearchConfig {
    /// Parse a TOML config. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| DocketError::io(path, e))?;
        Self::from_toml_str(&source)
    }
}
