// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate gathering: whole-query lookup, then per-word fallback.
//!
//! The token index requires every query word to match. That is the right
//! first try, but a single stray word ("docker compose tutorial" against a
//! post that never says "tutorial") empties the result. When that happens
//! and the query is long enough to be worth rescuing, each substantial word is
//! looked up on its own and the hits are unioned.

use std::collections::HashSet;

use crate::index::TokenIndex;

/// Caps and thresholds for candidate gathering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateLimits {
    /// Cap for the whole-query lookup.
    pub primary: usize,
    /// Cap per word in the fallback.
    pub per_word: usize,
    /// Fallback needs a query of at least this many characters.
    pub min_query_chars: usize,
    /// Fallback skips words shorter than this.
    pub min_word_chars: usize,
}

impl Default for CandidateLimits {
    fn default() -> Self {
        Self {
            primary: 50,
            per_word: 20,
            min_query_chars: 3,
            min_word_chars: 3,
        }
    }
}

/// Collect candidate positions for a trimmed, lower-cased query.
pub fn gather(index: &TokenIndex, normalized: &str, limits: &CandidateLimits) -> Vec<usize> {
    let primary = index.lookup(normalized, limits.primary);
    if !primary.is_empty() || normalized.chars().count() < limits.min_query_chars {
        return primary;
    }

    let mut seen = HashSet::new();
    let mut union = Vec::new();
    for word in normalized.split_whitespace() {
        if word.chars().count() < limits.min_word_chars {
            continue;
        }
        for position in index.lookup(word, limits.per_word) {
            if seen.insert(position) {
                union.push(position);
            }
        }
    }

    tracing::debug!(
        query = normalized,
        candidates = union.len(),
        "whole-query lookup empty, used per-word fallback"
    );
    union
}
