// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word splitting and forward (prefix) expansion.

/// Words longer than this are indexed and queried by their first
/// `MAX_TOKEN_CHARS` characters only.
pub const MAX_TOKEN_CHARS: usize = 64;

/// Word boundary detection: anything that is not a letter or digit separates words.
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Split text into lower-cased words, capped at [`MAX_TOKEN_CHARS`].
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(is_word_boundary)
        .filter(|w| !w.is_empty())
        .map(|w| truncate_chars(w, MAX_TOKEN_CHARS).to_lowercase())
}

/// Every non-empty prefix of `word`, shortest first, on char boundaries.
///
/// "rust" yields "r", "ru", "rus", "rust". Indexing all of these is what lets
/// a partially typed query word match a full document word.
pub fn prefixes(word: &str) -> impl Iterator<Item = &str> {
    word.char_indices()
        .map(move |(i, c)| &word[..i + c.len_utf8()])
}

fn truncate_chars(word: &str, max: usize) -> &str {
    match word.char_indices().nth(max) {
        Some((byte, _)) => &word[..byte],
        None => word,
    }
}
