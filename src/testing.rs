// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical builders for documents, snippets and fully validated
//! contexts so tests don't each reinvent a corpus.

#![doc(hidden)]

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::embedding::{Embedder, HashingEmbedder};
use crate::error::Result;
use crate::index::build_index;
use crate::store::{DocumentStore, SnippetStore};
use crate::types::{DateKey, Document, Snippet};

/// Dimension used by test contexts. Small keeps tests fast.
pub const TEST_DIMENSION: usize = 64;

/// Create a document.
pub fn make_doc(id: &str, text: &str) -> Document {
    Document::new(id, text)
}

/// Create a snippet with a path and type `"item"`.
pub fn make_snippet(doc_id: &str, text: &str, path: &str) -> Snippet {
    Snippet {
        source_document_id: DateKey::from(doc_id),
        text: text.to_string(),
        snippet_type: "item".to_string(),
        source_path: Some(path.to_string()),
    }
}

/// Create a snippet with no source path.
pub fn make_pathless_snippet(doc_id: &str, text: &str) -> Snippet {
    Snippet {
        source_path: None,
        ..make_snippet(doc_id, text, "")
    }
}

/// The embedder test contexts are built with.
pub fn test_embedder() -> HashingEmbedder {
    HashingEmbedder::new(TEST_DIMENSION)
}

/// Config matching [`test_embedder`].
pub fn test_config() -> SearchConfig {
    SearchConfig {
        model_id: test_embedder().model_id().to_string(),
        ..SearchConfig::default()
    }
}

/// Build a validated context, encoding snippets with [`test_embedder`].
pub fn build_context(documents: Vec<Document>, snippets: Vec<Snippet>) -> Result<SearchContext> {
    build_context_with(documents, snippets, test_config())
}

/// As [`build_context`], with a custom config (its `model_id` is overridden).
pub fn build_context_with(
    documents: Vec<Document>,
    snippets: Vec<Snippet>,
    config: SearchConfig,
) -> Result<SearchContext> {
    let embedder = test_embedder();
    let snippets = SnippetStore::new(snippets);
    let index = build_index(&snippets, &embedder)?;
    let config = SearchConfig {
        model_id: embedder.model_id().to_string(),
        ..config
    };
    SearchContext::new(
        DocumentStore::new(documents),
        snippets,
        Box::new(index),
        Arc::new(embedder),
        config,
    )
}

/// A small agenda corpus covering the usual cases.
pub fn agenda_corpus() -> (Vec<Document>, Vec<Snippet>) {
    let documents = vec![
        make_doc(
            "2024-03-12",
            "# City Council Agenda\n\n\
             1. Call to order\n\
             2. Liquor license renewal for Taco Shop on Main Street\n\
             3. Public comment\n\
             4. Adjourn",
        ),
        make_doc(
            "2023-11-07",
            "# Planning Commission\n\n\
             Zoning variance for 12 Elm Street.\n\
             See [staff report](https://county.test/report.pdf).\n\
             Liquor store setback discussion.",
        ),
        make_doc("2024-01-09", "# Parks Board\n\nNew playground at Riverside Park."),
    ];

    let snippets = vec![
        make_snippet(
            "2024-03-12",
            "Liquor license renewal for Taco Shop on Main Street",
            "2024-03-12/item-2",
        ),
        make_snippet("2024-03-12", "Public comment", "2024-03-12/item-3"),
        make_snippet(
            "2023-11-07",
            "Zoning variance for 12 Elm Street. See [staff report](https://county.test/report.pdf).",
            "2023-11-07/item-1",
        ),
        make_snippet("2023-11-07", "Liquor store setback discussion.", "2023-11-07/item-2"),
        make_snippet("2024-01-09", "New playground at Riverside Park.", "2024-01-09/item-1"),
    ];

    (documents, snippets)
}
