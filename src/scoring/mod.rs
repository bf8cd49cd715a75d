// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! The key insight is that the title dominates everything else. An exact title
//! match is worth 1000, more than any realistic pile of content occurrences, so
//! a post named after the query always leads. Below that the weights step down
//! title → tags → description → content, with a small recency nudge.

mod weights;
pub mod ranking;
mod recency;

pub use weights::*;
pub use recency::{age_in_days, parse_date, recency_bonus, Clock, SystemClock};
