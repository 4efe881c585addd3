// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Hybrid search: both engines, fused per document.
//!
//! The engines score on incomparable scales (the lexical engine doesn't score
//! at all, it orders by date), so fusion uses ranks only. Reciprocal rank
//! fusion:
//!
//! ```text
//! score(d) = Σ_r 1 / (k + rank_r(d))      rank is 1-indexed, k = 60
//! ```
//!
//! A document's semantic rank is the rank of its best snippet among the
//! distinct documents in the semantic list. Equal scores order by document
//! id, newest first, matching the lexical engine.
//!
//! **Invariant**: each document appears once in the fused list, and scores
//! never increase down the list.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::{debug, instrument};

use super::lexical::search_lexical_with_context;
use super::semantic::search_semantic;
use crate::context::SearchContext;
use crate::error::Result;
use crate::types::{HybridResult, LexicalResult, SemanticResult};

/// Fuse rankings with reciprocal rank fusion.
///
/// Repeated keys within one ranking count once, at their first position.
/// Output is by descending score, ties by descending key.
pub fn reciprocal_rank_fusion<T>(rankings: &[Vec<T>], k: usize) -> Vec<(T, f32)>
where
    T: Clone + Eq + Hash + Ord,
{
    let k = k as f32;
    let mut scores: HashMap<T, f32> = HashMap::new();

    for ranking in rankings {
        let mut rank = 0usize;
        let mut seen: HashSet<&T> = HashSet::new();
        for key in ranking {
            if !seen.insert(key) {
                continue;
            }
            rank += 1;
            *scores.entry(key.clone()).or_insert(0.0) += 1.0 / (k + rank as f32);
        }
    }

    let mut fused: Vec<(T, f32)> = scores.into_iter().collect();
    fused.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    fused
}

/// Run both engines and fuse their document rankings.
#[instrument(skip(context))]
pub fn search_hybrid(context: &SearchContext, query: &str, k: usize) -> Result<Vec<HybridResult>> {
    let config = context.config();
    let lexical = search_lexical_with_context(context.documents(), query, config.context_lines);
    let semantic = search_semantic(context, query, k)?;
    let fused = fuse(lexical, semantic, config.rrf_k);
    debug!(results = fused.len(), "hybrid search done");
    Ok(fused)
}

/// Group both result lists by document and order by fused score.
pub fn fuse(lexical: Vec<LexicalResult>, semantic: Vec<SemanticResult>, rrf_k: usize) -> Vec<HybridResult> {
    let rankings = vec![
        lexical.iter().map(|r| r.document_id.clone()).collect::<Vec<_>>(),
        semantic.iter().map(|r| r.document_id.clone()).collect::<Vec<_>>(),
    ];
    let fused = reciprocal_rank_fusion(&rankings, rrf_k);

    let mut lexical_by_doc: HashMap<String, Vec<String>> = HashMap::new();
    for result in lexical {
        lexical_by_doc
            .entry(result.document_id)
            .or_default()
            .extend(result.snippets);
    }
    let mut semantic_by_doc: HashMap<String, Vec<SemanticResult>> = HashMap::new();
    for result in semantic {
        semantic_by_doc
            .entry(result.document_id.clone())
            .or_default()
            .push(result);
    }

    fused
        .into_iter()
        .map(|(document_id, score)| HybridResult {
            lexical_snippets: lexical_by_doc.remove(&document_id).unwrap_or_default(),
            semantic: semantic_by_doc.remove(&document_id).unwrap_or_default(),
            document_id,
            score,
        })
        .collect()
}
