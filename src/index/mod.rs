// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The token index: forward-tokenized inverted index over a collection.
//!
//! Each document is reduced to its searchable text (title, description, tags,
//! content), split into words, and every prefix of every word becomes a key.
//! A query word therefore matches any document word it is a prefix of: "dock"
//! finds "docker", "docked" and "dock".
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSITIONAL**: postings refer to documents by their position in the
//!    collection the index was built from. The index is only meaningful next to
//!    that exact `Vec<Document>`; rebuild it whenever the collection changes.
//! 2. **POSTINGS_SORTED**: each posting list is sorted by document position with
//!    at most one posting per document (the first occurrence).

mod tokenize;

pub use tokenize::{prefixes, tokenize, MAX_TOKEN_CHARS};

use std::collections::HashMap;

use crate::types::Document;

/// Where a token first occurs in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Posting {
    doc: usize,
    /// Word position of the first word carrying this token as a prefix.
    word: usize,
}

/// Prefix-token inverted index.
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    postings: HashMap<String, Vec<Posting>>,
    doc_count: usize,
}

impl TokenIndex {
    /// Build the index for a collection. Linear in the total searchable text
    /// (times the average word length, for the prefixes).
    pub fn build(documents: &[Document]) -> Self {
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();

        for (doc, document) in documents.iter().enumerate() {
            let text = document.searchable_text();
            for (word_pos, word) in tokenize(&text).enumerate() {
                for prefix in prefixes(&word) {
                    let posting = Posting {
                        doc,
                        word: word_pos,
                    };
                    match postings.get_mut(prefix) {
                        Some(list) => {
                            // INVARIANT: POSTINGS_SORTED (documents are visited in order)
                            if list.last().is_none_or(|p| p.doc != doc) {
                                list.push(posting);
                            }
                        }
                        None => {
                            postings.insert(prefix.to_string(), vec![posting]);
                        }
                    }
                }
            }
        }

        let index = Self {
            postings,
            doc_count: documents.len(),
        };
        tracing::debug!(
            documents = index.doc_count,
            tokens = index.token_count(),
            postings = index.posting_count(),
            "token index built"
        );
        index
    }

    /// Positions of documents containing every word of `query` (as a prefix of
    /// one of their words), best first, at most `limit` of them.
    ///
    /// Ordering: documents where the query words show up earlier come first
    /// (sum of first-occurrence word positions), then collection order. This is
    /// only a candidate ordering; the query engine re-ranks everything it gets.
    pub fn lookup(&self, query: &str, limit: usize) -> Vec<usize> {
        let mut terms: Vec<String> = Vec::new();
        for term in tokenize(query) {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        if terms.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut lists: Vec<&[Posting]> = Vec::with_capacity(terms.len());
        for term in &terms {
            match self.postings.get(term.as_str()) {
                Some(list) => lists.push(list),
                // AND semantics: one missing word means no document has them all.
                None => return Vec::new(),
            }
        }
        lists.sort_by_key(|list| list.len());

        let Some((base, rest)) = lists.split_first() else {
            return Vec::new();
        };

        let mut hits: Vec<(usize, usize)> = base
            .iter()
            .filter_map(|posting| {
                let mut rank = posting.word;
                for list in rest {
                    let found = list
                        .binary_search_by_key(&posting.doc, |p| p.doc)
                        .ok()?;
                    rank += list[found].word;
                }
                Some((rank, posting.doc))
            })
            .collect();

        hits.sort_unstable();
        hits.into_iter().take(limit).map(|(_, doc)| doc).collect()
    }

    /// Number of documents the index was built from.
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    /// Number of distinct tokens (prefixes) in the index.
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Total postings across all tokens.
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    /// Largest document position referenced by any posting. Used by contracts.
    pub(crate) fn max_doc_position(&self) -> Option<usize> {
        self.postings
            .values()
            .filter_map(|list| list.last().map(|p| p.doc))
            .max()
    }
}
