// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Semantic result ranking and rendering over arbitrary snippets and hits.
//!
//! The index can hand back any row and any distance, including NaN and rows
//! past the end of the table. Ranking must skip what it can't use, and the
//! linked snippet HTML must never carry a script tag or a script href.

#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use docket::{rank_hits, Hit, PathlessPolicy, SearchConfig, Snippet, SnippetStore};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    snippets: Vec<(String, Option<String>)>,
    hits: Vec<(u8, f32)>,
    query: String,
    keep_pathless: bool,
}

fuzz_target!(|input: Input| {
    let rows: Vec<Snippet> = input
        .snippets
        .into_iter()
        .take(32)
        .map(|(text, path)| Snippet {
            source_document_id: "2024-01-01".into(),
            text: text.chars().take(500).collect(),
            snippet_type: "item".to_string(),
            source_path: path,
        })
        .collect();
    let table = SnippetStore::new(rows);
    let hits: Vec<Hit> = input
        .hits
        .into_iter()
        .take(64)
        .map(|(row, distance)| Hit::new(usize::from(row), distance))
        .collect();
    let query: String = input.query.chars().take(64).collect();
    let config = SearchConfig {
        pathless_policy: if input.keep_pathless {
            PathlessPolicy::Keep
        } else {
            PathlessPolicy::Drop
        },
        ..SearchConfig::default()
    };

    let results = rank_hits(&table, &hits, &query, &config);

    assert!(results.len() <= hits.len());
    let mut paths = HashSet::new();
    for r in &results {
        assert!(!r.snippet_html.contains("<script"), "script tag leaked");
        assert!(
            !r.snippet_html.to_ascii_lowercase().contains("href=\"javascript:"),
            "script href leaked"
        );
        match r.source_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => assert!(paths.insert(path.to_string()), "duplicate path {path:?}"),
            None => assert!(input.keep_pathless, "pathless result under Drop"),
        }
    }
});
