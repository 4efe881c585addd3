//! Shared test utilities and fixtures.

#![allow(dead_code, unused_imports)]

use std::fs;
use std::path::Path;

use docket::index::build_index;
use docket::{CorpusPaths, Document, Snippet, SnippetStore};

// Re-export canonical test utilities from docket::testing
pub use docket::testing::{
    agenda_corpus, build_context, build_context_with, make_doc, make_pathless_snippet,
    make_snippet, test_config, test_embedder, TEST_DIMENSION,
};

// ============================================================================
// ON-DISK CORPORA
// ============================================================================

/// Write documents, snippets and a freshly built index into `dir`.
///
/// Documents go out as a JSON array, snippets as JSON lines, so both loaders
/// get exercised.
pub fn write_corpus(dir: &Path, documents: &[Document], snippets: &[Snippet]) -> CorpusPaths {
    let paths = CorpusPaths {
        documents: dir.join("documents.json"),
        snippets: dir.join("snippets.jsonl"),
        index: dir.join("snippets.dkvx"),
    };

    fs::write(
        &paths.documents,
        serde_json::to_string(documents).expect("serialize documents"),
    )
    .expect("write documents");

    let lines: Vec<String> = snippets
        .iter()
        .map(|s| serde_json::to_string(s).expect("serialize snippet"))
        .collect();
    fs::write(&paths.snippets, lines.join("\n")).expect("write snippets");

    let table = SnippetStore::new(snippets.to_vec());
    build_index(&table, &test_embedder())
        .expect("build index")
        .write_to(&paths.index)
        .expect("write index");

    paths
}

// ============================================================================
// HTML ASSERTIONS
// ============================================================================

/// Tags the renderers are allowed to emit around user text.
const ALLOWED_TAGS: &[&str] = &[
    "p", "mark", "b", "a", "em", "strong", "code", "pre", "h1", "h2", "h3", "h4", "h5", "h6",
    "ul", "ol", "li", "blockquote", "hr", "br", "img", "del",
];

/// Assert every tag in `html` is one the renderers produce.
pub fn assert_only_allowed_tags(html: &str) {
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let name: String = after
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        assert!(
            ALLOWED_TAGS.contains(&name.as_str()),
            "unexpected tag <{}> in {:?}",
            name,
            html
        );
        rest = after;
    }
}

/// Assert every anchor opens in a new tab without an opener.
pub fn assert_anchors_external(html: &str) {
    let anchors = html.matches("<a ").count();
    assert_eq!(
        html.matches(r#"<a target="_blank" rel="noopener noreferrer" "#).count(),
        anchors,
        "anchor without forced attributes in {:?}",
        html
    );
}
