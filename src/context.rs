// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Everything a search needs, validated once and then read-only.
//!
//! A [`SearchContext`] owns both corpora, the vector index, the query embedder
//! and the configuration. It can only be built through [`SearchContext::new`],
//! which checks the cross-component invariants:
//!
//! | Check        | Between                         |
//! |--------------|---------------------------------|
//! | model id     | config ↔ embedder ↔ index       |
//! | dimension    | embedder ↔ index                |
//! | row count    | index ↔ snippet table           |
//! | fingerprint  | index ↔ snippet table (if set)  |
//!
//! Any failure is an error and no context exists. Engines never re-check.
//!
//! Reloading builds a new context and swaps it into a [`SharedContext`];
//! searches already running keep the `Arc` they started with.

use parking_lot::RwLock;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::SearchConfig;
use crate::embedding::Embedder;
use crate::error::{DocketError, Result};
use crate::index::{FlatIndex, VectorIndex};
use crate::store::{DocumentStore, SnippetStore};

/// File locations for [`SearchContext::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusPaths {
    pub documents: PathBuf,
    pub snippets: PathBuf,
    pub index: PathBuf,
}

pub struct SearchContext {
    documents: DocumentStore,
    snippets: SnippetStore,
    index: Box<dyn VectorIndex>,
    embedder: Arc<dyn Embedder>,
    config: SearchConfig,
}

impl SearchContext {
    /// Assemble and validate a context.
    pub fn new(
        documents: DocumentStore,
        snippets: SnippetStore,
        index: Box<dyn VectorIndex>,
        embedder: Arc<dyn Embedder>,
        config: SearchConfig,
    ) -> Result<Self> {
        if embedder.model_id() != config.model_id {
            return Err(DocketError::ModelMismatch {
                component: "embedder",
                expected: config.model_id.clone(),
                found: embedder.model_id().to_string(),
            });
        }
        if index.model_id() != config.model_id {
            return Err(DocketError::ModelMismatch {
                component: "index",
                expected: config.model_id.clone(),
                found: index.model_id().to_string(),
            });
        }
        if embedder.dimension() != index.dimension() {
            return Err(DocketError::DimensionMismatch {
                expected: index.dimension(),
                actual: embedder.dimension(),
            });
        }
        if index.len() != snippets.len() {
            return Err(DocketError::RowCountMismatch {
                index_rows: index.len(),
                table_rows: snippets.len(),
            });
        }
        if let Some(expected) = index.table_fingerprint() {
            let actual = snippets.fingerprint();
            if actual != expected {
                return Err(DocketError::FingerprintMismatch { expected, actual });
            }
        }

        info!(
            documents = documents.len(),
            snippets = snippets.len(),
            dimension = index.dimension(),
            model = %config.model_id,
            "search context ready"
        );

        Ok(Self {
            documents,
            snippets,
            index,
            embedder,
            config,
        })
    }

    /// Load both tables and a [`FlatIndex`] file, then validate.
    pub fn load(
        paths: &CorpusPaths,
        embedder: Arc<dyn Embedder>,
        config: SearchConfig,
    ) -> Result<Self> {
        let documents = DocumentStore::load(&paths.documents)?;
        let snippets = SnippetStore::load(&paths.snippets)?;
        let index = FlatIndex::open(&paths.index)?;
        Self::new(documents, snippets, Box::new(index), embedder, config)
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn snippets(&self) -> &SnippetStore {
        &self.snippets
    }

    pub fn index(&self) -> &dyn VectorIndex {
        self.index.as_ref()
    }

    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchContext")
            .field("documents", &self.documents.len())
            .field("snippets", &self.snippets.len())
            .field("index_model", &self.index.model_id())
            .field("embedder_model", &self.embedder.model_id())
            .field("config", &self.config)
            .finish()
    }
}

// ============================================================================
// SHARED CONTEXT
// ============================================================================

/// The live context, swappable as a whole.
///
/// Readers take a snapshot (an `Arc` clone under a read lock held for
/// nanoseconds) and search against that. A reload never mutates a context in
/// place; it publishes a new one.
#[derive(Debug)]
pub struct SharedContext {
    current: RwLock<Arc<SearchContext>>,
}

impl SharedContext {
    pub fn new(context: SearchContext) -> Self {
        Self {
            current: RwLock::new(Arc::new(context)),
        }
    }

    pub fn snapshot(&self) -> Arc<SearchContext> {
        Arc::clone(&self.current.read())
    }

    /// Replace the live context, returning the one it replaced.
    pub fn publish(&self, context: SearchContext) -> Arc<SearchContext> {
        let next = Arc::new(context);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!("published new search context");
        previous
    }
}
