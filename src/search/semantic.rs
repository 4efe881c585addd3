// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Semantic search: nearest snippets by embedding distance.
//!
//! ```text
//! query ─► Embedder::encode ─► VectorIndex::search(k) ─► rank_hits ─► results
//!                                                          │
//!                       resolve row · filter · render · sort · dedupe
//! ```
//!
//! A hit survives the filter if it is close enough (`distance <= threshold`)
//! or if the snippet contains the query literally. Literal matches then sort
//! ahead of everything else, closest first within each group.

use std::cmp::Ordering;
use tracing::{debug, instrument, warn};

use super::dedup::dedupe_by_path;
use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::error::Result;
use crate::render::{escape_html, link_markdown};
use crate::store::SnippetStore;
use crate::types::{Hit, SemanticResult};
use crate::util::casefold::FoldedQuery;

/// Search the snippet index for `query`, asking the index for `k` neighbours.
///
/// Encoding and index failures are returned, not retried. An empty query
/// returns no results without touching the embedder.
#[instrument(skip(context), fields(index_rows = context.index().len()))]
pub fn search_semantic(context: &SearchContext, query: &str, k: usize) -> Result<Vec<SemanticResult>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let vector = context.embedder().encode(query)?;
    let hits = context.index().search(&vector, k)?;
    debug!(hits = hits.len(), "index returned");

    Ok(rank_hits(context.snippets(), &hits, query, context.config()))
}

/// Turn raw index hits into filtered, rendered, sorted, deduped results.
pub fn rank_hits(
    snippets: &SnippetStore,
    hits: &[Hit],
    query: &str,
    config: &SearchConfig,
) -> Vec<SemanticResult> {
    let folded = FoldedQuery::new(query);

    let mut results: Vec<SemanticResult> = hits
        .iter()
        .filter_map(|hit| {
            let Some(snippet) = snippets.get(hit.row) else {
                warn!(
                    row = hit.row.as_usize(),
                    rows = snippets.len(),
                    "index hit outside snippet table, skipping"
                );
                return None;
            };

            let contains_query = folded.is_in(&snippet.text);
            let too_far = hit.distance.is_nan() || hit.distance > config.distance_threshold;
            if too_far && !contains_query {
                return None;
            }

            let snippet_html = link_markdown(&snippet.text, contains_query.then_some(&folded));

            Some(SemanticResult {
                document_id: escape_html(snippet.source_document_id.as_str()).into_owned(),
                distance: hit.distance,
                snippet_html,
                source_path: snippet.source_path.clone(),
                contains_query,
                snippet_type: snippet.snippet_type.clone(),
            })
        })
        .collect();

    results.sort_by(result_order);
    dedupe_by_path(results, config.pathless_policy)
}

/// Literal matches first, then ascending distance.
fn result_order(a: &SemanticResult, b: &SemanticResult) -> Ordering {
    b.contains_query
        .cmp(&a.contains_query)
        .then_with(|| a.distance.total_cmp(&b.distance))
}
