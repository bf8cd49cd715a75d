// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! Every signal is an integer bonus added to a running score. The constants are
//! part of the ranking contract: tests pin orderings that depend on their exact
//! relative sizes.
//!
//! | Signal                                   | Bonus        |
//! |------------------------------------------|--------------|
//! | title == query                           | 1000         |
//! | title starts with query                  | 500          |
//! | title contains query                     | 300          |
//! | title word == query word (per pair)      | 50           |
//! | title word starts with query word        | 30           |
//! | title word contains query word           | 10           |
//! | description contains query               | 100          |
//! | description contains query word (each)   | 20           |
//! | tags contain query word (each)           | 40           |
//! | content contains query                   | 10           |
//! | content occurrences of query word        | 2 × count    |
//! | published < 30 days ago                  | 5            |
//! | published < 90 days ago                  | 2            |
//!
//! The three whole-title checks are exclusive (highest wins), and so are the
//! three checks for each (query word, title word) pair.

use chrono::{DateTime, Utc};
use regex::Regex;

use super::recency::recency_bonus;
use crate::types::Document;

pub const TITLE_EXACT_SCORE: u64 = 1000;
pub const TITLE_PREFIX_SCORE: u64 = 500;
pub const TITLE_CONTAINS_SCORE: u64 = 300;

pub const TITLE_WORD_EXACT_SCORE: u64 = 50;
pub const TITLE_WORD_PREFIX_SCORE: u64 = 30;
pub const TITLE_WORD_CONTAINS_SCORE: u64 = 10;

pub const DESCRIPTION_CONTAINS_SCORE: u64 = 100;
pub const DESCRIPTION_WORD_SCORE: u64 = 20;

pub const TAG_WORD_SCORE: u64 = 40;

pub const CONTENT_CONTAINS_SCORE: u64 = 10;
pub const CONTENT_OCCURRENCE_SCORE: u64 = 2;

pub const RECENT_30_DAYS_SCORE: u64 = 5;
pub const RECENT_90_DAYS_SCORE: u64 = 2;

/// A query prepared once and scored against many documents.
///
/// Holds the lower-cased query, its whitespace-separated words and one
/// occurrence counter per word, so nothing is re-parsed or re-compiled per
/// document.
#[derive(Debug, Clone)]
pub struct QueryTerms {
    lower: String,
    words: Vec<String>,
    counters: Vec<OccurrenceCounter>,
}

impl QueryTerms {
    pub fn new(query: &str) -> Self {
        let lower = query.trim().to_lowercase();
        let words: Vec<String> = lower.split_whitespace().map(str::to_string).collect();
        let counters = words.iter().map(|w| OccurrenceCounter::new(w)).collect();
        Self {
            lower,
            words,
            counters,
        }
    }

    /// The trimmed, lower-cased query.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

/// Counts non-overlapping occurrences of one query word.
///
/// The word is regex-escaped before compiling, so "c++" or "(draft)" count
/// literally instead of being read as patterns. If compilation still fails
/// (size limits on absurd input) we count substrings directly, which gives the
/// same answer for an escaped literal.
#[derive(Debug, Clone)]
struct OccurrenceCounter {
    word: String,
    pattern: Option<Regex>,
}

impl OccurrenceCounter {
    fn new(word: &str) -> Self {
        let pattern = Regex::new(&regex::escape(word)).ok();
        Self {
            word: word.to_string(),
            pattern,
        }
    }

    fn count(&self, haystack: &str) -> u64 {
        if self.word.is_empty() {
            return 0;
        }
        let n = match &self.pattern {
            Some(re) => re.find_iter(haystack).count(),
            None => haystack.matches(self.word.as_str()).count(),
        };
        n as u64
    }
}

/// Title signals: whole-title tier plus per (query word, title word) pair.
pub fn title_score(title_lower: &str, terms: &QueryTerms) -> u64 {
    let query = terms.lower();
    let mut score = if title_lower == query {
        TITLE_EXACT_SCORE
    } else if title_lower.starts_with(query) {
        TITLE_PREFIX_SCORE
    } else if title_lower.contains(query) {
        TITLE_CONTAINS_SCORE
    } else {
        0
    };

    for q_word in terms.words() {
        for t_word in title_lower.split_whitespace() {
            score += if t_word == q_word {
                TITLE_WORD_EXACT_SCORE
            } else if t_word.starts_with(q_word.as_str()) {
                TITLE_WORD_PREFIX_SCORE
            } else if t_word.contains(q_word.as_str()) {
                TITLE_WORD_CONTAINS_SCORE
            } else {
                0
            };
        }
    }

    score
}

/// Description signals: whole query, then each query word.
pub fn description_score(description_lower: &str, terms: &QueryTerms) -> u64 {
    let mut score = 0;
    if description_lower.contains(terms.lower()) {
        score += DESCRIPTION_CONTAINS_SCORE;
    }
    for word in terms.words() {
        if description_lower.contains(word.as_str()) {
            score += DESCRIPTION_WORD_SCORE;
        }
    }
    score
}

/// Tag signals: each query word found anywhere in the joined tags.
pub fn tag_score(tags_lower: &str, terms: &QueryTerms) -> u64 {
    terms
        .words()
        .iter()
        .filter(|word| tags_lower.contains(word.as_str()))
        .count() as u64
        * TAG_WORD_SCORE
}

/// Content signals: whole query once, then two points per word occurrence.
pub fn content_score(content_lower: &str, terms: &QueryTerms) -> u64 {
    let mut score = 0;
    if content_lower.contains(terms.lower()) {
        score += CONTENT_CONTAINS_SCORE;
    }
    for counter in &terms.counters {
        score = score.saturating_add(counter.count(content_lower) * CONTENT_OCCURRENCE_SCORE);
    }
    score
}

/// Total relevance of `doc` for a prepared query, as of `now`.
///
/// Never fails: every signal degrades to zero on input it cannot read.
pub fn relevance_score(doc: &Document, terms: &QueryTerms, now: DateTime<Utc>) -> u64 {
    let title = doc.title.to_lowercase();
    let description = doc.description.to_lowercase();
    let content = doc.content.to_lowercase();
    let tags = doc.joined_tags();

    title_score(&title, terms)
        + description_score(&description, terms)
        + tag_score(&tags, terms)
        + content_score(&content, terms)
        + recency_bonus(&doc.date, now)
}
