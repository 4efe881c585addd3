// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lexical search over arbitrary documents and queries.
//!
//! Scraped agenda text has everything in it: stray HTML, half-written
//! markdown, characters whose lowercase form is longer than they are. The
//! scan must not panic on any of it, and the output must stay escaped.

#![no_main]

use arbitrary::Arbitrary;
use docket::util::casefold::FoldedQuery;
use docket::{search_lexical_with_context, Document, DocumentStore};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    docs: Vec<(String, String)>,
    query: String,
    context_lines: u8,
}

fuzz_target!(|input: Input| {
    // Cap sizes to keep iterations fast.
    let docs: Vec<Document> = input
        .docs
        .into_iter()
        .take(16)
        .map(|(id, text)| Document {
            id: id.chars().take(32).collect::<String>().into(),
            text: text.chars().take(2000).collect(),
        })
        .collect();
    let query: String = input.query.chars().take(64).collect();
    let store = DocumentStore::new(docs);

    let results = search_lexical_with_context(&store, &query, usize::from(input.context_lines % 8));

    // Every result is a document that contains the query.
    let folded = FoldedQuery::new(&query);
    assert!(results.len() <= store.len());
    for result in &results {
        assert!(!result.snippets.is_empty(), "result without snippets");
        assert!(!result.document_id.contains('<'), "unescaped id");
        for html in &result.snippets {
            assert!(!html.contains("<script"), "script tag leaked: {html:?}");
        }
    }
    if folded.is_empty() {
        assert!(results.is_empty());
    }

    // Newest first. Escaping can reorder ids holding markup, so only plain
    // ids are compared.
    for pair in results.windows(2) {
        if !pair[0].document_id.contains('&') && !pair[1].document_id.contains('&') {
            assert!(pair[0].document_id >= pair[1].document_id);
        }
    }
});
