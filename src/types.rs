// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search collection.
//!
//! A `Document` is one post as served by the index endpoint. The collection is
//! just an ordered `Vec<Document>`: order is publication recency, newest first,
//! and the token index refers to documents by their position in that vector.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Document**: `url` is non-empty. Results navigate there; an empty url
//!   would navigate to the current page and look like a no-op.
//!
//! - **Collection**: `id` is unique. Result lists are keyed by id in the UI,
//!   duplicate ids render as one row.
//!
//! `validate_collection` checks both and is run wherever a collection enters the
//! system from outside (file source, index builder).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Error;

/// One indexable post.
///
/// Field names match the JSON served at the index endpoint, so a collection
/// round-trips through `serde_json` unchanged. Everything but `id` and `url`
/// tolerates being absent, because older generators dropped empty fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO-8601 publication date. Kept as a string: a malformed date only
    /// costs the recency bonus, it never rejects the document.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub url: String,
    /// Plain-text body with markup already stripped.
    #[serde(default)]
    pub content: String,
}

impl Document {
    /// The text the token index sees: title, description, tags and content,
    /// space-joined and lower-cased.
    pub fn searchable_text(&self) -> String {
        [
            self.title.as_str(),
            self.description.as_str(),
            &self.tags.join(" "),
            self.content.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    /// Tags joined with single spaces, lower-cased. Used by tag scoring.
    pub fn joined_tags(&self) -> String {
        self.tags.join(" ").to_lowercase()
    }
}

/// Check the collection-level invariants: unique ids and non-empty urls.
pub fn validate_collection(documents: &[Document]) -> Result<(), Error> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(documents.len());

    for (position, doc) in documents.iter().enumerate() {
        if doc.url.trim().is_empty() {
            return Err(Error::InvalidDocument {
                position,
                reason: format!("document '{}' has an empty url", doc.id),
            });
        }
        if !seen.insert(doc.id.as_str()) {
            return Err(Error::InvalidDocument {
                position,
                reason: format!("duplicate document id '{}'", doc.id),
            });
        }
    }

    Ok(())
}
