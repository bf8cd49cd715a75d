// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tunables for the search engine and session.
//!
//! Every field has a default, so `{}` is a valid config file and hosts only
//! override what they care about. The ranking weights are NOT here: they are
//! part of the ranking contract and live as constants in `scoring`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Bump whenever the shape of `Document` changes. A mismatch invalidates every
/// previously cached collection.
pub const INDEX_VERSION: &str = "1.0";

/// Where the static index resource is served.
pub const DEFAULT_INDEX_URL: &str = "/api/search-index.json";

/// Keys of the three entries the engine keeps in on-device storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageKeys {
    /// Serialized document collection.
    pub index: String,
    /// Version marker written alongside the collection.
    pub version: String,
    /// Serialized search history.
    pub history: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            index: "search_index".to_string(),
            version: "search_index_version".to_string(),
            history: "search_history".to_string(),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Quiet interval before a typed query is dispatched.
    pub debounce_ms: u64,
    /// Results revealed per "load more".
    pub page_size: usize,
    /// Candidate cap for the whole-query lookup.
    pub candidate_limit: usize,
    /// Candidate cap per word in the fallback lookup.
    pub fallback_word_limit: usize,
    /// Fallback runs only for queries with at least this many characters.
    pub fallback_min_query_chars: usize,
    /// Fallback only looks up words with at least this many characters.
    pub fallback_min_word_chars: usize,
    /// Maximum remembered searches.
    pub history_limit: usize,
    /// How many leading collection entries are suggested as recent posts.
    pub recent_posts: usize,
    /// How many history entries the suggestion panel shows.
    pub suggested_searches: usize,
    /// Expected cache version marker.
    pub index_version: String,
    /// Location of the index resource, handed to the host with fetch effects.
    pub index_url: String,
    /// Snippet window size in characters.
    pub snippet_length: usize,
    /// Characters of context kept before the first match in a snippet.
    pub snippet_lead: usize,
    pub storage_keys: StorageKeys,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            page_size: 10,
            candidate_limit: 50,
            fallback_word_limit: 20,
            fallback_min_query_chars: 3,
            fallback_min_word_chars: 3,
            history_limit: 10,
            recent_posts: 5,
            suggested_searches: 5,
            index_version: INDEX_VERSION.to_string(),
            index_url: DEFAULT_INDEX_URL.to_string(),
            snippet_length: 150,
            snippet_lead: 50,
            storage_keys: StorageKeys::default(),
        }
    }
}

impl SearchConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config: SearchConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the session cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("pageSize must be at least 1".to_string()));
        }
        if self.candidate_limit == 0 {
            return Err(Error::Config("candidateLimit must be at least 1".to_string()));
        }
        if self.snippet_lead > self.snippet_length {
            return Err(Error::Config(format!(
                "snippetLead ({}) cannot exceed snippetLength ({})",
                self.snippet_lead, self.snippet_length
            )));
        }
        if self.index_version.is_empty() {
            return Err(Error::Config("indexVersion must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
