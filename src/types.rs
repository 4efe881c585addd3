// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records that flow through both search engines.
//!
//! Documents and snippets come in from the loaders, result records go out to
//! whatever renders pages or JSON. Nothing here is mutated after load.
//!
//! # Invariants
//!
//! - **RowId**: `row < snippets.len()`, and row `i` of the snippet table is
//!   vector `i` of the index. Hits that break this are dropped by the engine,
//!   and `SearchContext` refuses to build when the counts disagree.
//!
//! - **Result HTML**: every `String` documented as HTML below is either escaped
//!   text or markup the renderer itself produced. Nothing else gets through.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Date-derived document identifier (`"2024-03-12"` and friends).
///
/// Ordering is plain string ordering, which is chronological for ISO dates.
/// Not unique: several documents may share a key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub fn new(key: impl Into<String>) -> Self {
        DateKey(key.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DateKey {
    fn from(key: &str) -> Self {
        DateKey(key.to_string())
    }
}

impl From<String> for DateKey {
    fn from(key: String) -> Self {
        DateKey(key)
    }
}

/// Position of a snippet in the snippet table (and of its vector in the index).
///
/// Snippets have no stable key. Their identity is this position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RowId(pub usize);

impl RowId {
    /// Create a RowId, validating it's within the table.
    #[inline]
    pub fn new(row: usize, num_rows: usize) -> Option<Self> {
        if row < num_rows {
            Some(RowId(row))
        } else {
            None
        }
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for RowId {
    fn from(row: usize) -> Self {
        RowId(row)
    }
}

// =============================================================================
// CORPUS RECORDS
// =============================================================================

/// A full markdown document.
///
/// Accepts both `{id, text}` and the agenda export's `{ds, markdown_text}` names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(alias = "ds")]
    pub id: DateKey,
    #[serde(alias = "markdown_text")]
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<DateKey>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A pre-segmented excerpt of a document, one row of the snippet table.
///
/// The embedding vector is not stored here; it lives at the same position in
/// the vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(alias = "ds")]
    pub source_document_id: DateKey,
    #[serde(alias = "snippet")]
    pub text: String,
    #[serde(rename = "type", default)]
    pub snippet_type: String,
    #[serde(alias = "path", default)]
    pub source_path: Option<String>,
}

impl Snippet {
    /// The source path, or `None` when missing or empty.
    pub fn path(&self) -> Option<&str> {
        self.source_path.as_deref().filter(|p| !p.is_empty())
    }
}

// =============================================================================
// INDEX HITS
// =============================================================================

/// One nearest-neighbour hit: a snippet row and its distance (lower = closer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub row: RowId,
    pub distance: f32,
}

impl Hit {
    pub fn new(row: usize, distance: f32) -> Self {
        Self {
            row: RowId(row),
            distance,
        }
    }
}

// =============================================================================
// RESULT RECORDS
// =============================================================================

/// A document matched by the lexical engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexicalResult {
    /// HTML-escaped document id.
    pub document_id: String,
    /// One rendered HTML fragment per occurrence, in text order.
    pub snippets: Vec<String>,
    /// HTML-escaped document id for display and links.
    pub full_id: String,
}

/// A snippet matched by the embedding engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticResult {
    /// HTML-escaped id of the snippet's source document.
    pub document_id: String,
    /// Squared L2 distance between query and snippet vectors.
    pub distance: f32,
    /// Rendered snippet HTML.
    pub snippet_html: String,
    pub source_path: Option<String>,
    /// Whether the snippet contains the query literally (case-insensitive).
    pub contains_query: bool,
    pub snippet_type: String,
}

/// A document ranked by reciprocal rank fusion of both engines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridResult {
    /// HTML-escaped document id.
    pub document_id: String,
    pub score: f32,
    pub lexical_snippets: Vec<String>,
    pub semantic: Vec<SemanticResult>,
}
