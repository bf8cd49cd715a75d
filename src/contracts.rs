// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index, collection and session invariants.
//!
//! Debug-mode assertions only: zero-cost in release builds, loud during
//! development and tests.
//!
//! | Contract function                | Invariant                                        |
//! |----------------------------------|--------------------------------------------------|
//! | `check_index_matches_collection` | index positions map 1:1 onto the collection      |
//! | `check_cursor_in_window`         | selection cursor stays inside the visible window |
//! | `check_window_bounds`            | displayed-count never shrinks below a page       |

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

/// The title tiers must stay ordered, and an exact title match must outweigh
/// every description and tag signal a one-word query can collect.
const _: () = {
    use crate::scoring::{
        DESCRIPTION_CONTAINS_SCORE, DESCRIPTION_WORD_SCORE, RECENT_30_DAYS_SCORE,
        RECENT_90_DAYS_SCORE, TAG_WORD_SCORE, TITLE_CONTAINS_SCORE, TITLE_EXACT_SCORE,
        TITLE_PREFIX_SCORE, TITLE_WORD_CONTAINS_SCORE, TITLE_WORD_EXACT_SCORE,
        TITLE_WORD_PREFIX_SCORE,
    };

    assert!(TITLE_EXACT_SCORE > TITLE_PREFIX_SCORE);
    assert!(TITLE_PREFIX_SCORE > TITLE_CONTAINS_SCORE);
    assert!(TITLE_WORD_EXACT_SCORE > TITLE_WORD_PREFIX_SCORE);
    assert!(TITLE_WORD_PREFIX_SCORE > TITLE_WORD_CONTAINS_SCORE);
    assert!(RECENT_30_DAYS_SCORE > RECENT_90_DAYS_SCORE);
    assert!(
        TITLE_EXACT_SCORE - TITLE_PREFIX_SCORE
            > DESCRIPTION_CONTAINS_SCORE + DESCRIPTION_WORD_SCORE + TAG_WORD_SCORE
    );
};

use crate::index::TokenIndex;
use crate::types::Document;

// ============================================================================
// INDEX CONTRACTS
// ============================================================================

/// Check that an index was built from exactly this collection.
///
/// # Panics (debug builds only)
/// Panics if the document counts differ or a posting points past the end.
#[inline]
pub fn check_index_matches_collection(index: &TokenIndex, documents: &[Document]) {
    debug_assert_eq!(
        index.doc_count(),
        documents.len(),
        "Contract violation: token index built from {} documents, collection has {}",
        index.doc_count(),
        documents.len()
    );

    if let Some(max) = index.max_doc_position() {
        debug_assert!(
            max < documents.len(),
            "Contract violation: posting references position {} >= collection len {}",
            max,
            documents.len()
        );
    }
}

// ============================================================================
// SESSION CONTRACTS
// ============================================================================

/// Check the selection cursor against the visible window.
///
/// # Panics (debug builds only)
/// Panics if results are visible and the cursor is past the last visible one.
#[inline]
pub fn check_cursor_in_window(cursor: usize, displayed: usize, results: usize) {
    let visible = displayed.min(results);
    debug_assert!(
        visible == 0 || cursor < visible,
        "Contract violation: cursor {} outside visible window of {}",
        cursor,
        visible
    );
}

/// Check the pagination window.
///
/// # Panics (debug builds only)
/// Panics if the window is smaller than one page, or has grown past the result
/// count (beyond the initial page).
#[inline]
pub fn check_window_bounds(displayed: usize, page_size: usize, results: usize) {
    debug_assert!(
        displayed >= page_size,
        "Contract violation: displayed {} < page size {}",
        displayed,
        page_size
    );
    debug_assert!(
        displayed <= page_size.max(results),
        "Contract violation: displayed {} exceeds max(page, results) {}",
        displayed,
        page_size.max(results)
    );
}
