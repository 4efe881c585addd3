// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Highlighting query occurrences.
//!
//! Two flavours, one per engine. The lexical engine inserts *markers* into raw
//! markdown before rendering; the markers are private-use code points that no
//! markdown construct reacts to, and they are swapped for `<mark><b>` only
//! after rendering. The semantic engine escapes as it goes and writes styled
//! `<b>` tags directly, since it never runs a markdown renderer.

use std::borrow::Cow;

use super::escape::escape_html;
use crate::util::casefold::FoldedQuery;

/// Start-of-highlight marker (U+E000, private use area).
pub const HIGHLIGHT_OPEN: char = '\u{E000}';

/// End-of-highlight marker (U+E001, private use area).
pub const HIGHLIGHT_CLOSE: char = '\u{E001}';

/// Inline-styled bold used by the semantic engine.
pub const STYLED_OPEN: &str = r#"<b style="color: #d9480f;">"#;
pub const STYLED_CLOSE: &str = "</b>";

/// Remove any marker code points already present in user text.
///
/// Without this a document could smuggle in its own highlight tags.
pub fn strip_markers(text: &str) -> Cow<'_, str> {
    if text.contains([HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE]) {
        Cow::Owned(text.replace([HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE], "\u{FFFD}"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Wrap every occurrence of `query` in `line` with highlight markers.
///
/// The text itself is untouched: same case, same bytes, markers around it.
pub fn insert_markers(line: &str, query: &FoldedQuery) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut last = 0;
    for range in query.find_all(line) {
        out.push_str(&line[last..range.start]);
        out.push(HIGHLIGHT_OPEN);
        out.push_str(&line[range.clone()]);
        out.push(HIGHLIGHT_CLOSE);
        last = range.end;
    }
    out.push_str(&line[last..]);
    out
}

/// Escape `text` and wrap every occurrence of `query` in styled bold.
pub fn highlight_styled(text: &str, query: &FoldedQuery) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;
    for range in query.find_all(text) {
        out.push_str(&escape_html(&text[last..range.start]));
        out.push_str(STYLED_OPEN);
        out.push_str(&escape_html(&text[range.clone()]));
        out.push_str(STYLED_CLOSE);
        last = range.end;
    }
    out.push_str(&escape_html(&text[last..]));
    out
}
