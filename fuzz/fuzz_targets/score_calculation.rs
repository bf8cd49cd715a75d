// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for score calculation invariants.
//!
//! Arbitrary documents and queries must score without panicking, the same
//! way every time, and independent of letter case for ASCII input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use postsearch::scoring::{recency_bonus, Clock, TITLE_EXACT_SCORE};
use postsearch::testing::{make_post, FixedClock};
use postsearch::{relevance_score, QueryTerms};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    title: &'a str,
    description: &'a str,
    tag: &'a str,
    content: &'a str,
    date: &'a str,
    query: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let now = FixedClock::at(2025, 6, 1).now();
    let mut doc = make_post("fuzz", input.title, input.description, &[input.tag], input.content);
    doc.date = input.date.to_string();

    let terms = QueryTerms::new(input.query);

    // INVARIANT 1: deterministic
    let score = relevance_score(&doc, &terms, now);
    assert_eq!(score, relevance_score(&doc, &terms, now));

    // INVARIANT 2: recency only ever adds 0, 2 or 5
    assert!(matches!(recency_bonus(&doc.date, now), 0 | 2 | 5));

    // INVARIANT 3: ASCII case does not matter
    if input.query.is_ascii() {
        let upper = QueryTerms::new(&input.query.to_ascii_uppercase());
        assert_eq!(score, relevance_score(&doc, &upper, now));
    }

    // INVARIANT 4: a non-blank query equal to the title hits the exact tier
    if !terms.lower().is_empty() && doc.title.to_lowercase() == terms.lower() {
        assert!(score >= TITLE_EXACT_SCORE);
    }
});
