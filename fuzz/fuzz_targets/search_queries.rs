// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for search query handling.
//!
//! Throws arbitrary byte sequences at the query engine to verify it never
//! panics and never returns invalid results. Regex metacharacters, emoji and
//! null bytes are all fair game.

#![no_main]

use libfuzzer_sys::fuzz_target;
use postsearch::testing::{make_post, FixedClock};
use postsearch::{CandidateLimits, QueryEngine, SearchError};

fuzz_target!(|query: &[u8]| {
    static ENGINE: std::sync::OnceLock<QueryEngine> = std::sync::OnceLock::new();
    let engine = ENGINE.get_or_init(|| {
        let docs = vec![
            make_post("a", "Docker Compose Guide", "Containers", &["docker"], "docker docker compose"),
            make_post("b", "Modern C++ Tips", "RAII", &["c++"], "Prefer unique_ptr (always)."),
            make_post("c", "Ünïcödé Tëxt", "ß and ﬁ ligatures", &["i18n"], "İstanbul straße"),
            make_post("d", "[draft] regex.*", "a|b", &[], "$1 \\d+ ^start end$"),
        ];
        QueryEngine::new(docs, CandidateLimits::default())
    });
    let clock = FixedClock::at(2025, 6, 1);

    let query_str = String::from_utf8_lossy(query);
    let query_str: String = query_str.chars().take(200).collect();

    // INVARIANT 1: search() never panics, and only rejects blank queries
    let hits = match engine.search(&query_str, &clock) {
        Ok(hits) => hits,
        Err(SearchError::EmptyQuery) => {
            assert!(query_str.trim().is_empty());
            return;
        }
    };

    // INVARIANT 2: every position resolves
    assert_eq!(engine.resolve(&hits).len(), hits.len());

    // INVARIANT 3: sorted by score, best first
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    // INVARIANT 4: no duplicate documents
    let mut seen = std::collections::HashSet::new();
    for hit in &hits {
        assert!(seen.insert(hit.position), "duplicate position {}", hit.position);
    }

    // INVARIANT 5: deterministic
    assert_eq!(engine.search(&query_str, &clock).ok(), Some(hits));
});
