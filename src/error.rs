// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy.
//!
//! Four enums, one per layer:
//!
//! - [`Error`]: anything that can go wrong loading, validating or generating a
//!   collection. Returned by sources, the builder and config loading.
//! - [`StoreError`]: a key-value store refused a read or write. Callers in the
//!   cache and history layers swallow these; caching is best-effort.
//! - [`SearchError`]: the query engine could not run a lookup at all.
//! - [`SessionError`]: what the user sees. Transient, recoverable by retyping or
//!   reopening the dialog.

use thiserror::Error;

/// Errors from loading, validating or generating a document collection.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The index source could not deliver the collection.
    #[error("failed to fetch search index from {location}: {reason}")]
    Fetch { location: String, reason: String },

    /// A collection violated a document invariant.
    #[error("invalid document at position {position}: {reason}")]
    InvalidDocument { position: usize, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

/// Errors from a [`KeyValueStore`](crate::store::KeyValueStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage is disabled or not present (private browsing, no state dir).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded writing '{key}' ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the query engine itself, as opposed to per-document scoring,
/// which never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("query is empty")]
    EmptyQuery,
}

/// User-visible error state of a search session.
///
/// The display strings are what the dialog renders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Failed to load search index. Please try again later.")]
    IndexLoad { reason: String },

    #[error("An error occurred while searching. Please try again.")]
    SearchFailed { reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
