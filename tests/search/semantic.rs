//! Semantic engine: filtering, ordering, dedupe, rendering, failures.

use std::collections::HashSet;
use std::sync::Arc;

use docket::{
    rank_hits, search_semantic, DocketError, DocumentStore, Embedder, EmbeddingError, FlatIndex,
    Hit, PathlessPolicy, SearchConfig, SearchContext, SnippetStore,
};

use super::common::{
    agenda_corpus, build_context, build_context_with, make_pathless_snippet, make_snippet,
    test_config,
};

/// Only literal matches (or exact vector matches) survive a zero threshold.
fn literal_only() -> SearchConfig {
    SearchConfig {
        distance_threshold: 0.0,
        ..test_config()
    }
}

// ============================================================================
// RANKING
// ============================================================================

#[test]
fn test_literal_matches_always_retained_and_first() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context(docs, snippets).unwrap();
    let results = search_semantic(&ctx, "liquor", 100).unwrap();

    let literal: Vec<bool> = results.iter().map(|r| r.contains_query).collect();
    assert!(literal.iter().filter(|c| **c).count() >= 2);
    // All literal matches precede all non-literal ones.
    assert!(literal.windows(2).all(|w| w[0] || !w[1]));
}

#[test]
fn test_distance_ascending_within_groups() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context(docs, snippets).unwrap();
    let results = search_semantic(&ctx, "street", 100).unwrap();
    for pair in results.windows(2) {
        if pair[0].contains_query == pair[1].contains_query {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }
}

#[test]
fn test_exact_snippet_text_is_nearest() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context(docs, snippets).unwrap();
    let results = search_semantic(&ctx, "New playground at Riverside Park.", 100).unwrap();
    assert_eq!(results[0].source_path.as_deref(), Some("2024-01-09/item-1"));
    assert!(results[0].distance < 1e-5);
}

#[test]
fn test_zero_threshold_keeps_only_literal() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context_with(docs, snippets, literal_only()).unwrap();
    let results = search_semantic(&ctx, "setback", 100).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source_path.as_deref(), Some("2023-11-07/item-2"));
}

#[test]
fn test_k_bounds_results() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context(docs, snippets).unwrap();
    assert!(search_semantic(&ctx, "liquor", 1).unwrap().len() <= 1);
    assert!(search_semantic(&ctx, "liquor", 0).unwrap().is_empty());
}

#[test]
fn test_literal_first_even_when_farther() {
    let table = SnippetStore::new(vec![
        make_snippet("2024-01-01", "sidewalk repair", "a"),
        make_snippet("2024-01-01", "curb cuts", "b"),
    ]);
    let hits = [Hit::new(0, 2.0), Hit::new(1, 0.1)];
    let results = rank_hits(&table, &hits, "sidewalk", &SearchConfig::default());
    let flags: Vec<bool> = results.iter().map(|r| r.contains_query).collect();
    assert_eq!(flags, vec![true, false]);
}

#[test]
fn test_threshold_boundary() {
    let table = SnippetStore::new(vec![
        make_snippet("2024-01-01", "fire station bond", "a"),
        make_snippet("2024-01-01", "fire station bond", "b"),
    ]);
    let far = [Hit::new(0, 1.6)];
    assert!(rank_hits(&table, &far, "library", &SearchConfig::default()).is_empty());
    assert_eq!(rank_hits(&table, &far, "station", &SearchConfig::default()).len(), 1);

    // Exactly at the threshold is kept.
    let edge = [Hit::new(1, 1.5)];
    assert_eq!(rank_hits(&table, &edge, "library", &SearchConfig::default()).len(), 1);
}

// ============================================================================
// DEDUPE
// ============================================================================

#[test]
fn test_no_duplicate_paths() {
    let snippets = vec![
        make_snippet("2024-02-01", "water rate increase", "rates"),
        make_snippet("2024-02-01", "water rate increase, second reading", "rates"),
        make_snippet("2024-02-01", "water main replacement", "mains"),
    ];
    let ctx = build_context(vec![], snippets).unwrap();
    let results = search_semantic(&ctx, "water", 100).unwrap();

    let mut seen = HashSet::new();
    for r in &results {
        if let Some(path) = r.source_path.as_deref() {
            assert!(seen.insert(path.to_string()), "duplicate path {}", path);
        }
    }
    assert_eq!(results.len(), 2);
}

#[test]
fn test_pathless_snippets_follow_policy() {
    let snippets = vec![
        make_pathless_snippet("2024-02-01", "consent calendar"),
        make_pathless_snippet("2024-02-02", "consent calendar items"),
    ];

    let ctx = build_context(vec![], snippets.clone()).unwrap();
    assert!(search_semantic(&ctx, "consent", 100).unwrap().is_empty());

    let keep = SearchConfig {
        pathless_policy: PathlessPolicy::Keep,
        ..test_config()
    };
    let ctx = build_context_with(vec![], snippets, keep).unwrap();
    assert_eq!(search_semantic(&ctx, "consent", 100).unwrap().len(), 2);
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_styled_highlight_and_links() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context_with(docs, snippets, literal_only()).unwrap();
    let results = search_semantic(&ctx, "zoning variance", 100).unwrap();
    let html = &results[0].snippet_html;

    assert!(html.starts_with(r#"<b style="color: #d9480f;">Zoning variance</b>"#));
    assert!(html.contains(
        r#"<a href="https://county.test/report.pdf" target="_blank">staff report</a>"#
    ));
}

#[test]
fn test_no_highlight_without_literal_match() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context(docs, snippets).unwrap();
    for r in search_semantic(&ctx, "taco shop liquor", 100).unwrap() {
        if !r.contains_query {
            assert!(!r.snippet_html.contains("<b"));
        }
    }
}

#[test]
fn test_markdown_link_conversion() {
    let table = SnippetStore::new(vec![make_snippet("2024-01-01", "[click here](http://x.test)", "a")]);
    let results = rank_hits(&table, &[Hit::new(0, 0.2)], "zzz", &SearchConfig::default());
    assert_eq!(
        results[0].snippet_html,
        r#"<a href="http://x.test" target="_blank">click here</a>"#
    );
}

// ============================================================================
// FAILURES
// ============================================================================

struct BrokenEmbedder;

impl Embedder for BrokenEmbedder {
    fn model_id(&self) -> &str {
        "broken"
    }

    fn dimension(&self) -> usize {
        4
    }

    fn encode(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::InferenceFailed("model crashed".to_string()))
    }
}

#[test]
fn test_encode_failure_surfaces() {
    let snippets = SnippetStore::new(vec![make_snippet("2024-01-01", "x", "p")]);
    let index = FlatIndex::from_rows("broken", 4, [[0.0f32; 4]]).unwrap();
    let config = SearchConfig {
        model_id: "broken".to_string(),
        ..SearchConfig::default()
    };
    let ctx = SearchContext::new(
        DocumentStore::default(),
        snippets,
        Box::new(index),
        Arc::new(BrokenEmbedder),
        config,
    )
    .unwrap();

    let err = search_semantic(&ctx, "anything", 10).unwrap_err();
    assert!(matches!(
        err,
        DocketError::Embedding(EmbeddingError::InferenceFailed(_))
    ));
    // Empty queries never reach the embedder.
    assert!(search_semantic(&ctx, "  ", 10).unwrap().is_empty());
}
