//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use chrono::{DateTime, TimeZone, Utc};

use crate::error::StoreError;
use crate::scoring::Clock;
use crate::store::KeyValueStore;
use crate::types::Document;

/// A date old enough that no recency bonus applies to it.
pub const OLD_DATE: &str = "2000-01-01T00:00:00.000Z";

/// Create a simple test document with default fields.
///
/// The url is `/blog/{id}` and the date is [`OLD_DATE`], so scores only carry
/// text signals.
pub fn make_doc(id: &str, title: &str) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        date: OLD_DATE.to_string(),
        tags: vec![],
        authors: vec![],
        url: format!("/blog/{}", id),
        content: String::new(),
    }
}

/// Create a test document with every text field set.
pub fn make_post(id: &str, title: &str, description: &str, tags: &[&str], content: &str) -> Document {
    Document {
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        content: content.to_string(),
        ..make_doc(id, title)
    }
}

/// `n` documents titled "Post {i}" that all contain `word` in their content.
pub fn make_matching_docs(n: usize, word: &str) -> Vec<Document> {
    (0..n)
        .map(|i| {
            let mut doc = make_doc(&format!("post-{}", i), &format!("Post {}", i));
            doc.content = format!("entry {} talks about {}", i, word);
            doc
        })
        .collect()
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Midnight UTC on the given day.
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .unwrap_or_default();
        FixedClock(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A store whose every operation fails, like `localStorage` in a locked-down
/// browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }
}
