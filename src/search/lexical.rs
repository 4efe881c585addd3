// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lexical search: literal, case-insensitive, over full documents.
//!
//! For every occurrence of the query on a line, one snippet: the matched line
//! plus `context_lines` lines either side, clamped to the document. Lines end
//! at any of the breaks [`split_lines`] knows, bare `\r` included. Only the
//! matched line is highlighted; context lines pass through as-is. Two hits on
//! the same line give two (identical) snippets, one per occurrence.
//!
//! Snippets are markdown rendered to HTML by [`render_snippet_markdown`], so
//! a snippet can't carry raw HTML out of a document.
//!
//! **Invariant**: results are in descending document id order, and every
//! result carries at least one snippet.

use tracing::{debug, instrument};

use crate::config::DEFAULT_CONTEXT_LINES;
use crate::render::escape_html;
use crate::render::highlight::{insert_markers, strip_markers};
use crate::render::render_snippet_markdown;
use crate::store::DocumentStore;
use crate::types::{Document, LexicalResult};
use crate::util::casefold::FoldedQuery;
use crate::util::lines::split_lines;

/// Search with the default context radius.
pub fn search_lexical(documents: &DocumentStore, query: &str) -> Vec<LexicalResult> {
    search_lexical_with_context(documents, query, DEFAULT_CONTEXT_LINES)
}

/// Search all documents, newest id first.
#[instrument(skip(documents), fields(documents = documents.len()))]
pub fn search_lexical_with_context(
    documents: &DocumentStore,
    query: &str,
    context_lines: usize,
) -> Vec<LexicalResult> {
    let folded = FoldedQuery::new(query);
    if folded.is_empty() {
        return Vec::new();
    }

    let mut matching: Vec<&Document> = documents
        .iter()
        .filter(|doc| folded.is_in(&doc.text))
        .collect();
    // Stable: documents sharing an id keep their table order.
    matching.sort_by(|a, b| b.id.cmp(&a.id));

    let results: Vec<LexicalResult> = matching
        .into_iter()
        .filter_map(|doc| {
            let snippets = document_snippets(&doc.text, &folded, context_lines);
            if snippets.is_empty() {
                // Matched across a line break only.
                return None;
            }
            let id = escape_html(doc.id.as_str()).into_owned();
            Some(LexicalResult {
                document_id: id.clone(),
                snippets,
                full_id: id,
            })
        })
        .collect();

    debug!(results = results.len(), "lexical search done");
    results
}

/// One rendered snippet per occurrence, in text order.
fn document_snippets(text: &str, query: &FoldedQuery, context_lines: usize) -> Vec<String> {
    let lines = split_lines(text);
    let mut snippets = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let occurrences = query.find_all(line).len();
        if occurrences == 0 {
            continue;
        }
        let snippet = render_window(&lines, i, query, context_lines);
        snippets.extend(std::iter::repeat(snippet).take(occurrences));
    }
    snippets
}

/// Render lines `i - radius ..= i + radius` with line `i` highlighted.
fn render_window(lines: &[&str], i: usize, query: &FoldedQuery, radius: usize) -> String {
    let start = i.saturating_sub(radius);
    let end = i.saturating_add(radius).min(lines.len() - 1);

    let window: Vec<String> = (start..=end)
        .map(|j| {
            let line = strip_markers(lines[j]);
            if j == i {
                insert_markers(&line, query)
            } else {
                line.into_owned()
            }
        })
        .collect();

    render_snippet_markdown(&window.join("\n"))
}
