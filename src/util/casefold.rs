// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Case-insensitive substring search over UTF-8 text.
//!
//! Lowercasing a whole line and searching the copy is the obvious approach,
//! and it is wrong: `to_lowercase` can change byte lengths (`İ` becomes two
//! chars), so offsets found in the copy don't line up with the original.
//! Here the haystack is walked in place, lowercasing one char at a time, and
//! the ranges returned always sit on char boundaries of the original text.
//!
//! **Invariant**: every returned range `r` satisfies
//! `haystack.is_char_boundary(r.start) && haystack.is_char_boundary(r.end)`
//! and `r.start < r.end`.

use std::ops::Range;

/// A query, lowercased once and reused for every line it is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedQuery {
    chars: Vec<char>,
}

impl FoldedQuery {
    pub fn new(query: &str) -> Self {
        Self {
            chars: query.chars().flat_map(char::to_lowercase).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Does `haystack` contain the query anywhere?
    pub fn is_in(&self, haystack: &str) -> bool {
        self.find(haystack, 0).is_some()
    }

    /// Next occurrence starting at or after byte `from`.
    ///
    /// `from` past the end, or not on a char boundary, finds nothing.
    pub fn find(&self, haystack: &str, from: usize) -> Option<Range<usize>> {
        if self.chars.is_empty() {
            return None;
        }
        let tail = haystack.get(from..)?;
        tail.char_indices().find_map(|(offset, _)| {
            let start = from + offset;
            self.match_at(haystack, start).map(|end| start..end)
        })
    }

    /// Every non-overlapping occurrence, left to right.
    ///
    /// Each search resumes at the end of the previous match, so `"aa"` in
    /// `"aaaa"` yields two ranges, not three.
    pub fn find_all(&self, haystack: &str) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut from = 0;
        while let Some(range) = self.find(haystack, from) {
            from = range.end;
            ranges.push(range);
        }
        ranges
    }

    /// End byte of a match beginning at `start`, if there is one.
    fn match_at(&self, haystack: &str, start: usize) -> Option<usize> {
        let mut matched = 0;
        for (offset, ch) in haystack[start..].char_indices() {
            // A char whose lowercase form only partly overlaps the query
            // doesn't count: the match has to end on a char boundary.
            for lower in ch.to_lowercase() {
                if self.chars.get(matched) != Some(&lower) {
                    return None;
                }
                matched += 1;
            }
            if matched == self.chars.len() {
                return Some(start + offset + ch.len_utf8());
            }
        }
        None
    }
}

/// Case-insensitive containment, for one-off checks.
pub fn contains_ci(haystack: &str, query: &str) -> bool {
    FoldedQuery::new(query).is_in(haystack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ignores_case() {
        let q = FoldedQuery::new("Quick");
        assert_eq!(q.find("the QUICK fox", 0), Some(4..9));
    }

    #[test]
    fn test_find_from_offset() {
        let q = FoldedQuery::new("ab");
        assert_eq!(q.find("ab ab", 1), Some(3..5));
        assert_eq!(q.find("ab ab", 4), None);
    }

    #[test]
    fn test_find_all_non_overlapping() {
        let q = FoldedQuery::new("aa");
        assert_eq!(q.find_all("aaaa"), vec![0..2, 2..4]);
        assert_eq!(q.find_all("aaa"), vec![0..2]);
    }

    #[test]
    fn test_empty_query_finds_nothing() {
        let q = FoldedQuery::new("");
        assert!(q.is_empty());
        assert!(q.find_all("anything").is_empty());
        assert!(!q.is_in("anything"));
    }

    #[test]
    fn test_ranges_index_original_text() {
        // 'É' is two bytes; the match must be reported in original offsets.
        let q = FoldedQuery::new("café");
        let text = "Le CAFÉ du coin";
        let r = q.find(text, 0).unwrap();
        assert_eq!(&text[r], "CAFÉ");
    }

    #[test]
    fn test_expanding_lowercase_does_not_split_chars() {
        // 'İ' lowercases to "i\u{307}"; a bare "i" must not match half of it.
        let q = FoldedQuery::new("i");
        assert_eq!(q.find("İ", 0), None);
        assert_eq!(q.find("İi", 0), Some(2..3));
    }

    #[test]
    fn test_from_inside_a_char_is_none() {
        let q = FoldedQuery::new("e");
        assert_eq!(q.find("é", 1), None);
    }

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Zoning Variance", "variance"));
        assert!(!contains_ci("Zoning Variance", "permit"));
    }
}
