// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Markdown rendering for lexical snippets.
//!
//! Two stages over the parser's event stream, kept separate so each can be
//! tested on its own:
//!
//! 1. [`render_markdown`]: markdown to HTML. Raw HTML in the source is turned
//!    into text, so the renderer escapes it like any other text, and link
//!    destinations with script schemes are replaced by `#`. Highlight markers
//!    never reach a destination or a title.
//! 2. [`restore_whitelisted`]: swap highlight markers in text for real tags
//!    using the fixed [`WHITELIST`] table. Nothing outside that table is ever
//!    unescaped, and image alt text only ever gets the markers removed.
//!
//! [`render_snippet_markdown`] runs both and then forces every anchor to open
//! in a new tab.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use super::highlight::{HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN};
use super::links::{force_external_links, is_script_href};

/// Every markup replacement applied to rendered text, and nothing else.
///
/// | From     | To            | Why             |
/// |----------|---------------|-----------------|
/// | `U+E000` | `<mark><b>`   | highlight start |
/// | `U+E001` | `</b></mark>` | highlight end   |
pub const WHITELIST: &[(char, &str)] = &[
    (HIGHLIGHT_OPEN, "<mark><b>"),
    (HIGHLIGHT_CLOSE, "</b></mark>"),
];

/// Render markdown to HTML with raw HTML escaped and script links disarmed.
pub fn render_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parse(text));
    out
}

fn parse(text: &str) -> impl Iterator<Item = Event<'_>> {
    Parser::new_ext(text, Options::empty()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: disarm(drop_markers(dest_url)),
            title: drop_markers(title),
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: disarm(drop_markers(dest_url)),
            title: drop_markers(title),
            id,
        }),
        other => other,
    })
}

fn disarm(url: CowStr<'_>) -> CowStr<'_> {
    if is_script_href(&url) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

fn is_marker(c: char) -> bool {
    WHITELIST.iter().any(|&(marker, _)| marker == c)
}

fn drop_markers(text: CowStr<'_>) -> CowStr<'_> {
    if text.contains(is_marker) {
        CowStr::from(text.replace(is_marker, ""))
    } else {
        text
    }
}

/// Split `text` on highlight markers, emitting the [`WHITELIST`] tag for each.
fn push_highlighted<'a>(text: &str, out: &mut Vec<Event<'a>>) {
    let mut last = 0;
    for (at, c) in text.char_indices() {
        if let Some(&(_, tag)) = WHITELIST.iter().find(|&&(marker, _)| marker == c) {
            if at > last {
                out.push(Event::Text(CowStr::from(text[last..at].to_string())));
            }
            out.push(Event::InlineHtml(CowStr::Borrowed(tag)));
            last = at + c.len_utf8();
        }
    }
    if last < text.len() {
        out.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}

/// Apply the [`WHITELIST`] table to text events.
///
/// Markers inside an image only ever reach the `alt` attribute, so there they
/// are dropped instead. Code spans keep their `<code>` wrapper around the
/// highlight.
pub fn restore_whitelisted<'a>(events: impl IntoIterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut image_depth = 0usize;
    for event in events {
        match event {
            Event::Start(Tag::Image { .. }) => {
                image_depth += 1;
                out.push(event);
            }
            Event::End(TagEnd::Image) => {
                image_depth = image_depth.saturating_sub(1);
                out.push(event);
            }
            Event::Text(text) | Event::Code(text) if image_depth > 0 => {
                out.push(Event::Text(drop_markers(text)));
            }
            Event::Text(text) if text.contains(is_marker) => push_highlighted(&text, &mut out),
            Event::Code(code) if code.contains(is_marker) => {
                out.push(Event::InlineHtml(CowStr::Borrowed("<code>")));
                push_highlighted(&code, &mut out);
                out.push(Event::InlineHtml(CowStr::Borrowed("</code>")));
            }
            other => out.push(other),
        }
    }
    out
}

/// Full lexical snippet pipeline: render, restore highlights, force new-tab links.
pub fn render_snippet_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, restore_whitelisted(parse(text)).into_iter());
    force_external_links(&out)
}
