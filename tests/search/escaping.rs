//! HTML safety across both engines.
//!
//! Agenda text is scraped, so anything in a document, a snippet, an id or a
//! query may be hostile. The only tags allowed out are the ones the
//! renderers write themselves.

use docket::{search_lexical, search_semantic, DocumentStore, PathlessPolicy, SearchConfig};

use super::common::{
    assert_anchors_external, assert_only_allowed_tags, build_context_with, make_doc, make_snippet,
    test_config,
};

const HOSTILE: &str = "<script>alert(1)</script>";

fn keep_everything() -> SearchConfig {
    SearchConfig {
        distance_threshold: 10.0,
        pathless_policy: PathlessPolicy::Keep,
        ..test_config()
    }
}

#[test]
fn test_script_in_lexical_text_escaped() {
    let docs = DocumentStore::new(vec![make_doc(
        "2024-01-01",
        "Public comment: <script>alert(1)</script>\n<img src=x onerror=alert(1)>",
    )]);
    for result in search_lexical(&docs, "public comment") {
        for html in &result.snippets {
            assert!(!html.contains("<script"));
            assert!(!html.contains("<img src=x"));
            assert!(html.contains("&lt;script&gt;"));
            assert_only_allowed_tags(html);
        }
    }
}

#[test]
fn test_script_in_query_escaped() {
    let docs = DocumentStore::new(vec![make_doc("2024-01-01", HOSTILE)]);
    let results = search_lexical(&docs, HOSTILE);
    assert_eq!(results.len(), 1);
    let html = &results[0].snippets[0];
    assert!(!html.contains("<script"));
    assert!(html.contains("<mark><b>&lt;script&gt;"));
}

#[test]
fn test_script_in_document_id_escaped() {
    let docs = DocumentStore::new(vec![make_doc(HOSTILE, "budget")]);
    let results = search_lexical(&docs, "budget");
    assert!(!results[0].document_id.contains('<'));
    assert!(!results[0].full_id.contains('<'));
}

#[test]
fn test_smuggled_markers_cannot_open_tags() {
    let docs = DocumentStore::new(vec![make_doc(
        "2024-01-01",
        "budget\n\u{E000}not a highlight\u{E001}",
    )]);
    let html = &search_lexical(&docs, "budget")[0].snippets[0];
    assert_eq!(html.matches("<mark>").count(), 1);
}

#[test]
fn test_highlight_stays_out_of_attributes() {
    let docs = DocumentStore::new(vec![make_doc(
        "2024-01-01",
        "![quick fox](a.png) and [site](http://x.test \"quick\")",
    )]);
    let html = &search_lexical(&docs, "quick")[0].snippets[0];
    assert!(html.contains(r#"alt="quick fox""#));
    assert!(html.contains(r#"title="quick""#));
    assert!(!html.contains("<mark>"));
}

#[test]
fn test_percent_encoded_text_survives_highlighting() {
    let docs = DocumentStore::new(vec![make_doc("2024-01-01", "code 100%EE%80%80 here quick")]);
    let html = &search_lexical(&docs, "quick")[0].snippets[0];
    assert_eq!(
        html.trim_end(),
        "<p>code 100%EE%80%80 here <mark><b>quick</b></mark></p>"
    );
}

#[test]
fn test_script_links_disarmed_on_lexical_path() {
    let docs = DocumentStore::new(vec![make_doc(
        "2024-01-01",
        "Agenda [packet](javascript:alert(1)) and [minutes](https://city.test/m.pdf)",
    )]);
    let html = &search_lexical(&docs, "agenda")[0].snippets[0];
    assert!(!html.to_lowercase().contains("javascript:"));
    assert_anchors_external(html);
    assert_eq!(html.matches("<a ").count(), 2);
}

#[test]
fn test_raw_anchor_in_document_is_text() {
    let docs = DocumentStore::new(vec![make_doc(
        "2024-01-01",
        r#"Budget <a href="https://evil.test" onclick="x()">here</a>"#,
    )]);
    let html = &search_lexical(&docs, "budget")[0].snippets[0];
    assert_eq!(html.matches("<a ").count(), 0);
    assert!(html.contains("&lt;a href="));
}

#[test]
fn test_semantic_fields_escaped() {
    let snippets = vec![
        make_snippet(HOSTILE, &format!("budget {}", HOSTILE), "a"),
        make_snippet("2024-01-01", "[x](JavaScript:steal) budget", "b"),
        make_snippet("2024-01-01", r#"[x](http://a.test/"onmouseover="alert(1)) budget"#, "c"),
    ];
    let ctx = build_context_with(vec![], snippets, keep_everything()).unwrap();

    for query in ["budget", HOSTILE] {
        for r in search_semantic(&ctx, query, 100).unwrap() {
            assert!(!r.document_id.contains('<'));
            assert!(!r.snippet_html.contains("<script"));
            assert!(!r.snippet_html.to_lowercase().contains("javascript:"));
            assert!(!r.snippet_html.contains(r#""onmouseover"#));
            assert_only_allowed_tags(&r.snippet_html);
        }
    }
}
