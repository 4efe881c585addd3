// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Read-only corpora: full documents and pre-segmented snippets.
//!
//! Both tables are loaded once and never touched again. Reloading means
//! building new stores and a new `SearchContext` around them.
//!
//! Tables are read from either a JSON array (`.json`) or one record per line
//! (`.jsonl`, blank lines skipped).

pub mod documents;
pub mod snippets;

pub use documents::DocumentStore;
pub use snippets::SnippetStore;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::{DocketError, Result};

/// Load a table of records from `.json` (array) or `.jsonl` (one per line).
pub(crate) fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|e| DocketError::io(path, e))?;

    let is_lines = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));

    if is_lines {
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(|e| DocketError::json(path, e)))
            .collect()
    } else {
        serde_json::from_str(&content).map_err(|e| DocketError::json(path, e))
    }
}
