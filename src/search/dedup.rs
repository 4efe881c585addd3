// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Source-path deduplication for semantic results.
//!
//! Snippets are cut from documents with overlapping windows, so the nearest
//! neighbours of a query often include several snippets from the same agenda
//! item. One result per `source_path` is enough.
//!
//! **Invariant**: no two results share a non-empty `source_path`. Input must
//! already be in final rank order; the first result seen for a path wins.
//!
//! Results without a path are governed by [`PathlessPolicy`].

use std::collections::HashSet;

use crate::config::PathlessPolicy;
use crate::types::SemanticResult;

/// Streaming first-wins filter keyed on source path only.
#[derive(Debug)]
pub struct PathDedup {
    seen: HashSet<String>,
    pathless: PathlessPolicy,
}

impl PathDedup {
    pub fn new(pathless: PathlessPolicy) -> Self {
        Self {
            seen: HashSet::new(),
            pathless,
        }
    }

    /// Should this result be kept? Records its path if so.
    pub fn admit(&mut self, result: &SemanticResult) -> bool {
        match result.source_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => self.seen.insert(path.to_string()),
            None => self.pathless == PathlessPolicy::Keep,
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Keep the first result per source path, preserving order.
pub fn dedupe_by_path(results: Vec<SemanticResult>, pathless: PathlessPolicy) -> Vec<SemanticResult> {
    let mut dedup = PathDedup::new(pathless);
    results.into_iter().filter(|r| dedup.admit(r)).collect()
}
