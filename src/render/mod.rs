// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning user text into HTML without letting user HTML through.
//!
//! Both engines build their snippet HTML here. The rule is simple: every byte
//! of user text is escaped, and the only markup in the output is markup this
//! module wrote itself. There are exactly two kinds:
//!
//! | Markup     | Lexical path                         | Semantic path                     |
//! |------------|--------------------------------------|-----------------------------------|
//! | Highlight  | `<mark><b>…</b></mark>`              | `<b style="…">…</b>`              |
//! | Links      | markdown links, forced to new tab    | `[text](url)` → `<a … target>`    |
//!
//! The lexical path renders full markdown, so it works in two stages: render
//! with raw HTML neutralised, then restore highlight markers from a fixed
//! whitelist table (see [`markdown::WHITELIST`]). The semantic path never
//! renders markdown at all; it escapes everything and converts link syntax
//! by hand.

pub mod escape;
pub mod highlight;
pub mod links;
pub mod markdown;

pub use escape::escape_html;
pub use highlight::{highlight_styled, insert_markers, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN};
pub use links::{force_external_links, is_script_href, link_markdown, safe_href};
pub use markdown::{render_markdown, render_snippet_markdown, restore_whitelisted};
