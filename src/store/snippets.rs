// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The snippet table searched by the embedding engine.
//!
//! Row `i` here is vector `i` in the index. The table has no other key, so
//! the only way to catch a table/index mix-up is to compare counts and, when
//! the index recorded one, a fingerprint of the table contents.

use crc32fast::Hasher as Crc32Hasher;
use std::path::Path;
use tracing::info;

use super::read_table;
use crate::error::Result;
use crate::types::{RowId, Snippet};

/// Immutable table of snippets, addressed by position.
#[derive(Debug, Clone, Default)]
pub struct SnippetStore {
    rows: Vec<Snippet>,
}

impl SnippetStore {
    pub fn new(rows: Vec<Snippet>) -> Self {
        Self { rows }
    }

    /// Load snippets from a `.json` array or `.jsonl` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rows: Vec<Snippet> = read_table(path)?;
        info!(path = %path.display(), snippets = rows.len(), "loaded snippet table");
        Ok(Self::new(rows))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row lookup. `None` when the index hands back a stale position.
    pub fn get(&self, row: RowId) -> Option<&Snippet> {
        self.rows.get(row.as_usize())
    }

    pub fn as_slice(&self) -> &[Snippet] {
        &self.rows
    }

    /// CRC32 over every row in order.
    ///
    /// Fields are separated by `\0` and rows by `\x1e`, so moving text from
    /// one field or row to the next changes the fingerprint.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = Crc32Hasher::new();
        for row in &self.rows {
            hasher.update(row.source_document_id.as_str().as_bytes());
            hasher.update(b"\0");
            hasher.update(row.text.as_bytes());
            hasher.update(b"\0");
            hasher.update(row.snippet_type.as_bytes());
            hasher.update(b"\0");
            hasher.update(row.path().unwrap_or("").as_bytes());
            hasher.update(b"\x1e");
        }
        hasher.finalize()
    }
}

impl From<Vec<Snippet>> for SnippetStore {
    fn from(rows: Vec<Snippet>) -> Self {
        Self::new(rows)
    }
}
