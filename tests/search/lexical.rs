//! Lexical engine: matching, windows, ordering, rendering.

use docket::{search_lexical, search_lexical_with_context, DocumentStore};

use super::common::{agenda_corpus, assert_anchors_external, make_doc};

fn corpus() -> DocumentStore {
    DocumentStore::new(agenda_corpus().0)
}

// ============================================================================
// MATCHING
// ============================================================================

#[test]
fn test_finds_every_document_containing_query() {
    let results = search_lexical(&corpus(), "liquor");
    let ids: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
    assert_eq!(ids, vec!["2024-03-12", "2023-11-07"]);
}

#[test]
fn test_case_insensitive() {
    let upper = search_lexical(&corpus(), "LIQUOR LICENSE");
    let lower = search_lexical(&corpus(), "liquor license");
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].document_id, lower[0].document_id);
    // Original casing survives inside the highlight.
    assert!(upper[0].snippets[0].contains("<mark><b>Liquor license</b></mark>"));
}

#[test]
fn test_no_match_is_empty() {
    assert!(search_lexical(&corpus(), "skate park").is_empty());
}

#[test]
fn test_empty_corpus_is_empty() {
    assert!(search_lexical(&DocumentStore::default(), "budget").is_empty());
}

#[test]
fn test_quick_fox_highlight() {
    let docs = DocumentStore::new(vec![make_doc("2024-01-01", "the quick fox")]);
    let results = search_lexical(&docs, "quick");
    assert!(results[0].snippets[0].contains("the <mark><b>quick</b></mark> fox"));
}

// ============================================================================
// SNIPPETS
// ============================================================================

#[test]
fn test_snippets_in_text_order() {
    let docs = DocumentStore::new(vec![make_doc(
        "2024-01-01",
        "alpha quorum\nbeta\ngamma\ndelta\nepsilon\nzeta quorum",
    )]);
    let results = search_lexical_with_context(&docs, "quorum", 1);
    let snippets = &results[0].snippets;
    assert_eq!(snippets.len(), 2);
    assert!(snippets[0].contains("alpha"));
    assert!(snippets[1].contains("zeta"));
}

#[test]
fn test_context_radius_configurable() {
    let text = "one\ntwo\nthree\nfour\nfive";
    let docs = DocumentStore::new(vec![make_doc("2024-01-01", text)]);

    let narrow = search_lexical_with_context(&docs, "three", 0);
    assert!(!narrow[0].snippets[0].contains("two"));

    let wide = search_lexical_with_context(&docs, "three", 2);
    assert!(wide[0].snippets[0].contains("one"));
    assert!(wide[0].snippets[0].contains("five"));
}

#[test]
fn test_overlapping_pattern_non_overlapping_matches() {
    let docs = DocumentStore::new(vec![make_doc("2024-01-01", "aaaa")]);
    let results = search_lexical(&docs, "aa");
    assert_eq!(results[0].snippets.len(), 2);
    assert!(results[0].snippets[0]
        .contains("<mark><b>aa</b></mark><mark><b>aa</b></mark>"));
}

#[test]
fn test_markdown_rendered() {
    let docs = DocumentStore::new(vec![make_doc("2024-01-01", "**Budget** hearing")]);
    let html = &search_lexical(&docs, "hearing")[0].snippets[0];
    assert!(html.contains("<strong>Budget</strong>"));
}

#[test]
fn test_links_forced_to_new_tab() {
    let results = search_lexical(&corpus(), "staff report");
    let html = &results[0].snippets[0];
    assert!(html.contains("https://county.test/report.pdf"));
    assert_anchors_external(html);
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn test_descending_ids_stable_for_duplicates() {
    let docs = DocumentStore::new(vec![
        make_doc("2024-01-01", "first budget"),
        make_doc("2024-05-01", "budget"),
        make_doc("2024-01-01", "second budget"),
    ]);
    let results = search_lexical(&docs, "budget");
    assert_eq!(results[0].document_id, "2024-05-01");
    assert!(results[1].snippets[0].contains("first"));
    assert!(results[2].snippets[0].contains("second"));
}
