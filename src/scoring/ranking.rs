// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored candidates get sorted.
//!
//! Score descending, and nothing else. Ties keep the order the candidates
//! arrived in (token-index order, or fallback union order), which is why this
//! is a stable sort and not a comparator with id tiebreakers.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate document and its relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredHit {
    /// Position of the document in the collection.
    pub position: usize,
    pub score: u64,
}

/// Compare two hits for ranking: higher score first.
pub fn compare_hits(a: &ScoredHit, b: &ScoredHit) -> Ordering {
    b.score.cmp(&a.score)
}

/// Sort hits best-first, keeping candidate order among equal scores.
pub fn rank(hits: &mut [ScoredHit]) {
    // slice::sort_by is stable
    hits.sort_by(compare_hits);
}
