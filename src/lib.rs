// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet search over municipal agenda documents.
//!
//! Two engines over one read-only corpus. The lexical engine finds literal,
//! case-insensitive occurrences in full markdown documents and returns
//! highlighted context windows. The semantic engine embeds the query, asks a
//! vector index for the nearest pre-segmented snippets, and keeps the ones
//! that are close enough or contain the query outright. A hybrid mode fuses
//! both rankings per document.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────┐
//! │ store        │   │ index        │   │ embedding     │
//! │ (documents,  │   │ (FlatIndex,  │   │ (Embedder,    │
//! │  snippets)   │   │  .dkvx file) │   │  Hashing…)    │
//! └──────┬───────┘   └──────┬───────┘   └──────┬────────┘
//!        └──────────────────┼──────────────────┘
//!                           ▼
//!                  ┌─────────────────┐
//!                  │ SearchContext   │  validated once, then read-only
//!                  └────────┬────────┘
//!                           ▼
//!        ┌──────────────────┼──────────────────┐
//!        ▼                  ▼                  ▼
//!   search_lexical    search_semantic     search_hybrid
//!        │                  │
//!        └──── render ──────┘   escaped HTML, whitelisted markup only
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use docket::{embedder_for, search_semantic, CorpusPaths, SearchConfig, SearchContext};
//!
//! let config = SearchConfig::load("docket.toml")?;
//! let embedder = embedder_for(&config.model_id)?;
//! let context = SearchContext::load(&paths, embedder, config)?;
//! let results = search_semantic(&context, "liquor license", 100)?;
//! ```

pub mod config;
pub mod context;
pub mod embedding;
pub mod error;
pub mod index;
pub mod render;
pub mod search;
pub mod store;
pub mod types;
pub mod util;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use config::{PathlessPolicy, SearchConfig};
pub use context::{CorpusPaths, SearchContext, SharedContext};
pub use embedding::{embedder_for, Embedder, EmbeddingError, HashingEmbedder};
pub use error::{DocketError, Result};
pub use index::format::IndexFormatError;
pub use index::{build_index, FlatIndex, VectorIndex};
pub use search::{
    rank_hits, search_hybrid, search_lexical, search_lexical_with_context, search_semantic,
};
pub use store::{DocumentStore, SnippetStore};
pub use types::{
    DateKey, Document, Hit, HybridResult, LexicalResult, RowId, SemanticResult, Snippet,
};
