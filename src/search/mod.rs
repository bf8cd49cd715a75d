// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query engine: where the rubber meets the road.
//!
//! A `QueryEngine` owns a collection and the token index built from it. A
//! search is four steps:
//!
//! 1. gather candidates from the index (whole query, else per-word fallback)
//! 2. resolve candidate positions back to documents, dropping any that do not
//!    resolve
//! 3. score every candidate
//! 4. stable-sort by score
//!
//! Scoring is infallible, so one odd document can never sink a whole search.

mod candidates;

pub use candidates::{gather, CandidateLimits};

use crate::cache::SearchHistory;
use crate::config::SearchConfig;
use crate::contracts::check_index_matches_collection;
use crate::error::SearchError;
use crate::index::TokenIndex;
use crate::scoring::ranking::{rank, ScoredHit};
use crate::scoring::{relevance_score, Clock, QueryTerms};
use crate::store::KeyValueStore;
use crate::types::Document;

/// A loaded collection plus its token index.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    documents: Vec<Document>,
    index: TokenIndex,
    limits: CandidateLimits,
}

impl QueryEngine {
    /// Build the token index for `documents`. Done once per loaded collection.
    pub fn new(documents: Vec<Document>, limits: CandidateLimits) -> Self {
        let index = TokenIndex::build(&documents);
        check_index_matches_collection(&index, &documents);
        Self {
            documents,
            index,
            limits,
        }
    }

    pub fn from_config(documents: Vec<Document>, config: &SearchConfig) -> Self {
        Self::new(
            documents,
            CandidateLimits {
                primary: config.candidate_limit,
                per_word: config.fallback_word_limit,
                min_query_chars: config.fallback_min_query_chars,
                min_word_chars: config.fallback_min_word_chars,
            },
        )
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    pub fn index(&self) -> &TokenIndex {
        &self.index
    }

    /// The first `n` documents: the collection is newest-first, so these are
    /// the recent-post suggestions.
    pub fn recent(&self, n: usize) -> &[Document] {
        &self.documents[..n.min(self.documents.len())]
    }

    /// Rank the collection against `query`.
    ///
    /// `query` should already be trimmed by the caller; it is trimmed again
    /// here and an empty result is rejected.
    pub fn search(&self, query: &str, clock: &dyn Clock) -> Result<Vec<ScoredHit>, SearchError> {
        let terms = QueryTerms::new(query);
        if terms.lower().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let candidates = gather(&self.index, terms.lower(), &self.limits);
        let now = clock.now();

        let mut hits: Vec<ScoredHit> = candidates
            .into_iter()
            .filter_map(|position| {
                let doc = self.documents.get(position)?;
                Some(ScoredHit {
                    position,
                    score: relevance_score(doc, &terms, now),
                })
            })
            .collect();

        rank(&mut hits);
        Ok(hits)
    }

    /// [`search`](Self::search), recording the raw query in history first.
    ///
    /// History is written even if the search then finds nothing; it records
    /// what the user asked, not what they got.
    pub fn search_with_history<S: KeyValueStore + ?Sized>(
        &self,
        query: &str,
        store: &mut S,
        history: &SearchHistory,
        clock: &dyn Clock,
    ) -> Result<Vec<ScoredHit>, SearchError> {
        history.record(store, query);
        self.search(query, clock)
    }

    /// Ranked documents for `query`, best first.
    pub fn search_documents(
        &self,
        query: &str,
        clock: &dyn Clock,
    ) -> Result<Vec<&Document>, SearchError> {
        let hits = self.search(query, clock)?;
        Ok(self.resolve(&hits))
    }

    /// Map hits back to documents, silently dropping unresolvable positions.
    pub fn resolve(&self, hits: &[ScoredHit]) -> Vec<&Document> {
        hits.iter()
            .filter_map(|hit| self.documents.get(hit.position))
            .collect()
    }
}
