// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dates: parsing, age, and the recency bonus.
//!
//! Dates arrive as strings from the index and are only trusted as far as they
//! parse. Anything unreadable gets no bonus and displays as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::weights::{RECENT_30_DAYS_SCORE, RECENT_90_DAYS_SCORE};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Source of "now" for recency scoring. Injected so tests can pin time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Parse an ISO-8601 date.
///
/// Accepts RFC 3339 timestamps, offset-less timestamps and plain dates. The
/// last two are taken as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Fractional days between `date` and `now`. Negative for future dates.
pub fn age_in_days(date: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - date).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// +5 under 30 days old, +2 under 90, otherwise (or if unparseable) 0.
///
/// Future dates have negative age and count as brand new.
pub fn recency_bonus(date: &str, now: DateTime<Utc>) -> u64 {
    let Some(published) = parse_date(date) else {
        return 0;
    };
    let age = age_in_days(published, now);
    if age < 30.0 {
        RECENT_30_DAYS_SCORE
    } else if age < 90.0 {
        RECENT_90_DAYS_SCORE
    } else {
        0
    }
}
