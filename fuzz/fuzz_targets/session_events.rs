// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the search session state machine.
//!
//! Arbitrary event sequences, including stale and made-up tickets, must
//! never panic and never leave the cursor outside the visible window.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use postsearch::testing::{make_matching_docs, FixedClock};
use postsearch::{Event, Key, MemoryStore, SearchConfig, SearchSession, Ticket};

#[derive(Arbitrary, Debug)]
enum Step {
    Open,
    Close,
    Query(String),
    Debounce(u32),
    LoadOk(u32, u8),
    LoadErr(u32),
    Next,
    Previous,
    Confirm,
    Cancel,
    LoadMore,
    SelectRecent(u8),
    SelectHistory(String),
}

impl Step {
    fn into_event(self) -> Event {
        match self {
            Step::Open => Event::Open,
            Step::Close => Event::Close,
            Step::Query(q) => Event::QueryChanged(q),
            Step::Debounce(t) => Event::DebounceFired { ticket: Ticket::new(t) },
            Step::LoadOk(t, n) => Event::LoadSucceeded {
                ticket: Ticket::new(t),
                documents: make_matching_docs(n as usize % 40, "rust"),
            },
            Step::LoadErr(t) => Event::LoadFailed {
                ticket: Ticket::new(t),
                reason: "fuzz".to_string(),
            },
            Step::Next => Event::Key(Key::Next),
            Step::Previous => Event::Key(Key::Previous),
            Step::Confirm => Event::Key(Key::Confirm),
            Step::Cancel => Event::Key(Key::Cancel),
            Step::LoadMore => Event::LoadMore,
            Step::SelectRecent(i) => Event::SelectRecent(i as usize),
            Step::SelectHistory(h) => Event::SelectHistory(h),
        }
    }
}

fuzz_target!(|steps: Vec<Step>| {
    let mut session = SearchSession::with_clock(
        SearchConfig::default(),
        MemoryStore::with_quota(4096),
        Box::new(FixedClock::at(2025, 6, 1)),
    );

    for step in steps.into_iter().take(64) {
        session.handle(step.into_event());

        let total = session.result_count();
        let window = session.window();
        // INVARIANT: cursor within the visible window
        if total > 0 {
            assert!(window.cursor() < window.visible(total));
        } else {
            assert_eq!(window.cursor(), 0);
        }
        // INVARIANT: a closed dialog holds no query
        if !session.is_open() {
            assert!(session.query().is_empty());
        }
        let _ = session.view();
    }
});
