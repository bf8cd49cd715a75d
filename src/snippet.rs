// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Presentation helpers: content snippets, match highlighting, display dates.
//!
//! All positions here are character positions, never byte offsets, so a
//! snippet window can't split a multi-byte character.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::scoring::parse_date;

const ELLIPSIS: &str = "...";

/// One run of text, either plain or a highlighted match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub marked: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marked: false,
        }
    }

    pub fn marked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marked: true,
        }
    }
}

/// Lowercase a single char without changing the char count.
#[inline]
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// First case-insensitive occurrence of `needle` in `haystack`, as a char index.
fn find_folded(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| {
        window
            .iter()
            .zip(needle)
            .all(|(a, b)| fold(*a) == fold(*b))
    })
}

fn head(chars: &[char], max_len: usize) -> String {
    let mut out: String = chars.iter().take(max_len).collect();
    if chars.len() > max_len {
        out.push_str(ELLIPSIS);
    }
    out
}

/// A window of `content` around the first occurrence of `query`.
///
/// The window opens `lead` characters before the match and runs for `max_len`
/// characters past `match_start + query_len - lead`. Truncated ends get `...`.
/// With no query, or no occurrence, the snippet is the first `max_len`
/// characters.
pub fn extract_snippet(content: &str, query: &str, max_len: usize, lead: usize) -> String {
    if content.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = content.chars().collect();
    let needle: Vec<char> = query.trim().chars().collect();

    let Some(found) = find_folded(&chars, &needle) else {
        return head(&chars, max_len);
    };

    let start = found.saturating_sub(lead);
    let end = (found + needle.len() + max_len.saturating_sub(lead)).min(chars.len());

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// Split `text` into plain and marked segments, marking every
/// case-insensitive occurrence of `query`.
///
/// A blank query or empty text comes back as a single plain segment.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let query = query.trim();
    if query.is_empty() || text.is_empty() {
        return vec![Segment::plain(text)];
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(error = %e, "highlight pattern rejected, rendering plain");
            return vec![Segment::plain(text)];
        }
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::plain(&text[last..m.start()]));
        }
        segments.push(Segment::marked(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::plain(&text[last..]));
    }
    segments
}

/// "Jan 5, 2025" for a parseable ISO-8601 date, the input unchanged otherwise.
pub fn format_display_date(date: &str) -> String {
    match parse_date(date) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => date.to_string(),
    }
}
