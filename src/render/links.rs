// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Link handling for both render paths.
//!
//! Agenda documents link out to county PDFs and permit portals. Every link a
//! snippet renders must open in a new tab, and no link may carry a script
//! scheme, since the text comes straight from scraped documents.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use super::escape::escape_html;
use super::highlight::highlight_styled;
use crate::util::casefold::FoldedQuery;

/// Attributes added to every anchor on the lexical path.
pub const EXTERNAL_LINK_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer""#;

/// Schemes that execute instead of navigate.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// `[label](url)` with no nested brackets and no whitespace in the url.
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]\n]+)\]\(([^()\s]+)\)").expect("link pattern is valid")
});

/// Rewrite every `<a ` opening tag to open in a new tab without an opener.
///
/// Operates on renderer output, where user text is already escaped, so a
/// literal `<a ` can only be an anchor the renderer produced.
pub fn force_external_links(html: &str) -> String {
    html.replace("<a ", &format!("<a {} ", EXTERNAL_LINK_ATTRS))
}

/// Replace script-capable URLs with `#`.
///
/// Browsers skip whitespace and control characters inside the scheme and
/// treat it case-insensitively, so both are normalised before the check.
pub fn safe_href(url: &str) -> Cow<'_, str> {
    if is_script_href(url) {
        Cow::Borrowed("#")
    } else {
        Cow::Borrowed(url)
    }
}

/// Does this URL use a scheme that executes script?
pub fn is_script_href(url: &str) -> bool {
    let scheme: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    UNSAFE_SCHEMES.iter().any(|unsafe_scheme| scheme.starts_with(unsafe_scheme))
}

/// Convert markdown link syntax to new-tab anchors, escaping everything else.
///
/// This is deliberately not a markdown renderer: emphasis, headings and
/// lists stay as literal text. When `highlight` is given, its occurrences are
/// wrapped in styled bold, in link labels as well as plain text.
pub fn link_markdown(text: &str, highlight: Option<&FoldedQuery>) -> String {
    let render_text = |segment: &str| -> String {
        match highlight {
            Some(query) => highlight_styled(segment, query),
            None => escape_html(segment).into_owned(),
        }
    };

    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;
    for caps in MARKDOWN_LINK.captures_iter(text) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        out.push_str(&render_text(&text[last..whole.start()]));
        out.push_str(&format!(
            r#"<a href="{}" target="_blank">{}</a>"#,
            escape_html(&safe_href(url.as_str())),
            render_text(label.as_str())
        ));
        last = whole.end();
    }
    out.push_str(&render_text(&text[last..]));
    out
}
