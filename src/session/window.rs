// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pagination window and selection cursor over a ranked result list.
//!
//! The window never re-sorts or re-runs anything: it only decides how many of
//! the already-ranked results are visible and which one is selected.

use crate::contracts::{check_cursor_in_window, check_window_bounds};

/// How many results are visible, and which one is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultWindow {
    page_size: usize,
    displayed: usize,
    cursor: usize,
}

impl ResultWindow {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            displayed: page_size,
            cursor: 0,
        }
    }

    /// Back to one page, cursor on the first result.
    pub fn reset(&mut self) {
        self.displayed = self.page_size;
        self.cursor = 0;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The displayed-count. Starts at one page even if fewer results exist.
    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of results actually on screen.
    pub fn visible(&self, total: usize) -> usize {
        self.displayed.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.displayed
    }

    pub fn remaining(&self, total: usize) -> usize {
        total.saturating_sub(self.displayed)
    }

    /// Reveal the next page, clamped to `total`. Returns whether anything changed.
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.displayed = (self.displayed + self.page_size).min(total);
        check_window_bounds(self.displayed, self.page_size, total);
        true
    }

    /// Move the cursor down, stopping at the last visible result.
    ///
    /// Returns the new position, or `None` if the cursor did not move.
    pub fn next(&mut self, total: usize) -> Option<usize> {
        let visible = self.visible(total);
        if visible == 0 || self.cursor + 1 >= visible {
            return None;
        }
        self.cursor += 1;
        check_cursor_in_window(self.cursor, self.displayed, total);
        Some(self.cursor)
    }

    /// Move the cursor up, stopping at zero.
    pub fn previous(&mut self) -> Option<usize> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.cursor)
    }
}
