// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the docket CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `DOCKET_THEME` first, then `COLORFGBG`, then macOS system appearance, then
//! defaults to dark. Respects `NO_COLOR` and goes plain when stdout isn't a
//! TTY, so piping results into a file gives clean text.
//!
//! Search results carry HTML; [`html_to_terminal`] turns the engines' two
//! kinds of highlight markup into terminal bold and drops the rest.
//!
//! # Theme detection order
//!
//! 1. `DOCKET_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. macOS appearance (via defaults read)
//! 4. Default to dark theme

use std::sync::OnceLock;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("DOCKET_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", where a bg of 7 or 15 means a light background
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.contains("Dark") && output.status.success() {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (255, 215, 0);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (152, 104, 1);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_YELLOW);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, excluding ANSI codes
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        RESET,
        content,
        " ".repeat(pad),
        border,
        RESET
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}├{}{}{}{}┤{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", GRAY(), "─".repeat(BOX_WIDTH), RESET);
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Squared-L2 distance, green when close, red when past the threshold.
pub fn distance_colored(distance: f32, threshold: f32) -> String {
    let text = format!("{:>6.3}", distance);
    if distance <= threshold / 2.0 {
        themed(GREEN, &[], &text)
    } else if distance <= threshold {
        themed(YELLOW, &[], &text)
    } else {
        themed(RED, &[], &text)
    }
}

/// Literal-match badge for semantic results.
pub fn literal_badge(contains_query: bool) -> String {
    if contains_query {
        themed(BRIGHT_YELLOW, &[BOLD], "[literal]")
    } else {
        themed(GRAY, &[DIM], "[semantic]")
    }
}

/// Turn result HTML into terminal text.
///
/// Highlight markup becomes bold yellow, every other tag is dropped, and the
/// five entities the renderer emits are decoded.
pub fn html_to_terminal(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(len) = rest[start..].find('>') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = &rest[start..=start + len];
        if use_colors() {
            if tag == "<mark>" || tag.starts_with("<b ") {
                out.push_str(BOLD);
                out.push_str(&BRIGHT_YELLOW());
            } else if tag == "</mark>" || tag == "</b>" {
                out.push_str(RESET);
            }
        }
        if tag == "</p>" || tag == "<br />" || tag == "</li>" || tag.starts_with("</h") {
            out.push(' ');
        }
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);

    let text = out
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to `max` visible chars, ANSI-aware, appending `…` when cut.
pub fn truncate_visible(s: &str, max: usize) -> String {
    if visible_len(s) <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut in_escape = false;
    let mut seen = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        }
        if in_escape {
            out.push(c);
            if c == 'm' {
                in_escape = false;
            }
            continue;
        }
        if seen + 1 >= max {
            break;
        }
        out.push(c);
        seen += 1;
    }
    out.push('…');
    if use_colors() {
        out.push_str(RESET);
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
