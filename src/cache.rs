// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Best-effort persistence: the versioned collection cache and search history.
//!
//! Nothing in here returns an error. A cache read that fails for any reason
//! (storage disabled, corrupt JSON, stale version) is a miss. A write that
//! fails (quota, disabled storage) is dropped. Caching saves a fetch; it is
//! never needed for a correct answer.

use serde::Serialize;

use crate::config::{SearchConfig, StorageKeys};
use crate::store::KeyValueStore;
use crate::types::Document;

/// A collection read back from storage, with the version it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedIndex {
    pub documents: Vec<Document>,
    pub version: String,
}

/// Versioned on-device copy of the document collection.
#[derive(Debug, Clone)]
pub struct IndexCache {
    version: String,
    keys: StorageKeys,
}

impl IndexCache {
    pub fn new(version: impl Into<String>, keys: StorageKeys) -> Self {
        Self {
            version: version.into(),
            keys,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.index_version.clone(), config.storage_keys.clone())
    }

    /// The version marker a stored collection must carry to be used.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// A cache whose entries only match collections from `source`.
    ///
    /// The source identity is folded into the version marker, so a copy
    /// cached from a different source reads back as a version mismatch.
    pub fn scoped(&self, source: &str) -> Self {
        Self::new(format!("{}@{}", self.version, source), self.keys.clone())
    }

    /// Read the cached collection if its version marker equals ours exactly.
    pub fn load<S: KeyValueStore + ?Sized>(&self, store: &S) -> Option<CachedIndex> {
        let version = match store.get(&self.keys.version) {
            Ok(Some(v)) => v,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(error = %e, "cache version unreadable");
                return None;
            }
        };
        if version != self.version {
            tracing::debug!(
                stored = %version,
                expected = %self.version,
                "cache version mismatch"
            );
            return None;
        }

        let raw = store.get(&self.keys.index).ok().flatten()?;
        match serde_json::from_str::<Vec<Document>>(&raw) {
            Ok(documents) => Some(CachedIndex { documents, version }),
            Err(e) => {
                tracing::debug!(error = %e, "cached index failed to parse");
                None
            }
        }
    }

    /// Write the collection and our version marker. Failures are ignored.
    pub fn store<S: KeyValueStore + ?Sized>(&self, store: &mut S, documents: &[Document]) {
        let serialized = match serde_json::to_string(documents) {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!(error = %e, "index not cacheable");
                return;
            }
        };

        // Collection first: if it does not fit, the old version marker must not
        // vouch for whatever is left under the index key.
        if let Err(e) = store.set(&self.keys.index, &serialized) {
            tracing::debug!(error = %e, "index cache write dropped");
            return;
        }
        if let Err(e) = store.set(&self.keys.version, &self.version) {
            tracing::debug!(error = %e, "index cache version write dropped");
        }
    }
}

/// Recently submitted queries, most recent first.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    key: String,
    limit: usize,
}

impl SearchHistory {
    pub fn new(key: impl Into<String>, limit: usize) -> Self {
        Self {
            key: key.into(),
            limit,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.storage_keys.history.clone(), config.history_limit)
    }

    /// Stored queries, most recent first. Unreadable history is empty.
    pub fn entries<S: KeyValueStore + ?Sized>(&self, store: &S) -> Vec<String> {
        store
            .get(&self.key)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default()
    }

    /// Remember a query.
    ///
    /// The query is trimmed and lower-cased, moved to the front, any earlier
    /// case-insensitive duplicate is dropped and the list is capped. Blank
    /// queries are ignored.
    pub fn record<S: KeyValueStore + ?Sized>(&self, store: &mut S, query: &str) {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return;
        }

        let mut updated = Vec::with_capacity(self.limit);
        updated.push(normalized.clone());
        updated.extend(
            self.entries(store)
                .into_iter()
                .filter(|q| q.to_lowercase() != normalized),
        );
        updated.truncate(self.limit);

        self.write(store, &updated);
    }

    pub fn clear<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        if let Err(e) = store.remove(&self.key) {
            tracing::debug!(error = %e, "history clear dropped");
        }
    }

    fn write<S: KeyValueStore + ?Sized, T: Serialize>(&self, store: &mut S, entries: &T) {
        let Ok(serialized) = serde_json::to_string(entries) else {
            return;
        };
        if let Err(e) = store.set(&self.key, &serialized) {
            tracing::debug!(error = %e, "history write dropped");
        }
    }
}
