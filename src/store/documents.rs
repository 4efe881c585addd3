// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The full-document table searched by the lexical engine.

use std::path::Path;
use tracing::info;

use super::read_table;
use crate::error::Result;
use crate::types::Document;

/// Immutable table of full markdown documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    docs: Vec<Document>,
}

impl DocumentStore {
    pub fn new(docs: Vec<Document>) -> Self {
        Self { docs }
    }

    /// Load documents from a `.json` array or `.jsonl` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let docs: Vec<Document> = read_table(path)?;
        info!(path = %path.display(), documents = docs.len(), "loaded document table");
        Ok(Self::new(docs))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn as_slice(&self) -> &[Document] {
        &self.docs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }
}

impl From<Vec<Document>> for DocumentStore {
    fn from(docs: Vec<Document>) -> Self {
        Self::new(docs)
    }
}
