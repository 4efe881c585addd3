//! Hybrid search: fusion of both engines per document.

use docket::search_hybrid;

use super::common::{agenda_corpus, build_context, make_doc, make_snippet};

#[test]
fn test_document_in_both_lists_ranks_first() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context(docs, snippets).unwrap();
    let results = search_hybrid(&ctx, "liquor license", 100).unwrap();

    let top = &results[0];
    assert_eq!(top.document_id, "2024-03-12");
    assert!(!top.lexical_snippets.is_empty());
    assert!(top.semantic.iter().any(|s| s.contains_query));
}

#[test]
fn test_scores_descending() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context(docs, snippets).unwrap();
    let results = search_hybrid(&ctx, "street", 100).unwrap();
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_each_document_once() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context(docs, snippets).unwrap();
    let results = search_hybrid(&ctx, "liquor", 100).unwrap();
    let mut ids: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), before);
}

#[test]
fn test_lexical_only_document_included() {
    // The document has no snippets, so only the lexical engine can find it.
    let docs = vec![make_doc("2022-08-01", "Annual audit presentation")];
    let snippets = vec![make_snippet("2024-01-01", "unrelated snippet", "p")];
    let ctx = build_context(docs, snippets).unwrap();
    let results = search_hybrid(&ctx, "audit", 100).unwrap();

    let audit = results
        .iter()
        .find(|r| r.document_id == "2022-08-01")
        .expect("lexical hit fused in");
    assert_eq!(audit.lexical_snippets.len(), 1);
    assert!(audit.semantic.is_empty());
}

#[test]
fn test_empty_query() {
    let (docs, snippets) = agenda_corpus();
    let ctx = build_context(docs, snippets).unwrap();
    assert!(search_hybrid(&ctx, "", 100).unwrap().is_empty());
}
