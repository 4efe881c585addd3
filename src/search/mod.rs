// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engines.
//!
//! Two independent engines over the same corpus, plus a fusion of both:
//!
//! | Engine    | Searches          | Orders by                         | Output            |
//! |-----------|-------------------|-----------------------------------|-------------------|
//! | lexical   | full documents    | document id, newest first         | `LexicalResult`   |
//! | semantic  | snippet vectors   | literal match, then distance      | `SemanticResult`  |
//! | hybrid    | both              | reciprocal rank fusion            | `HybridResult`    |
//!
//! All three are plain functions over read-only data. Call them from as many
//! threads as you like.

pub mod dedup;
pub mod hybrid;
pub mod lexical;
pub mod semantic;

pub use dedup::{dedupe_by_path, PathDedup};
pub use hybrid::{reciprocal_rank_fusion, search_hybrid};
pub use lexical::{search_lexical, search_lexical_with_context};
pub use semantic::{rank_hits, search_semantic};
