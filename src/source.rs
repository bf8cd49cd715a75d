// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where collections come from.
//!
//! In a browser the session asks its host to fetch the index and reports back
//! through events. Native callers (the CLI, tests, benches) fetch directly
//! through an [`IndexSource`] and go through the same versioned cache.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::cache::IndexCache;
use crate::error::{Error, Result};
use crate::store::KeyValueStore;
use crate::types::{validate_collection, Document};

/// Something that can produce the document collection.
pub trait IndexSource {
    /// Human-readable location, for logs and errors.
    fn location(&self) -> String;

    /// What a cached copy must have been fetched from to be reused.
    fn identity(&self) -> String {
        self.location()
    }

    fn fetch(&self) -> Result<Vec<Document>>;
}

/// A JSON index file on disk, as written by `postsearch build`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    /// Absolute path plus size and modification time, so both a different
    /// file and a rewritten one miss the cache.
    fn identity(&self) -> String {
        let path = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let location = path.display().to_string();
        let Ok(meta) = fs::metadata(&path) else {
            return location;
        };
        let modified = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        format!("{location}:{}:{modified}", meta.len())
    }

    fn fetch(&self) -> Result<Vec<Document>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| Error::Fetch {
            location: self.location(),
            reason: e.to_string(),
        })?;
        let documents: Vec<Document> = serde_json::from_str(&raw)?;
        validate_collection(&documents)?;
        Ok(documents)
    }
}

/// A collection already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: Vec<Document>,
}

impl StaticSource {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

impl IndexSource for StaticSource {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn fetch(&self) -> Result<Vec<Document>> {
        validate_collection(&self.documents)?;
        Ok(self.documents.clone())
    }
}

/// A collection and whether it came out of the cache.
#[derive(Debug, Clone)]
pub struct LoadedCollection {
    pub documents: Vec<Document>,
    pub from_cache: bool,
}

/// Serve the collection from `cache` if it holds a valid, non-empty copy of
/// the current version fetched from this same source, otherwise fetch from
/// `source` and cache the result.
pub fn load_through_cache<S: KeyValueStore + ?Sized>(
    source: &dyn IndexSource,
    cache: &IndexCache,
    store: &mut S,
) -> Result<LoadedCollection> {
    let cache = cache.scoped(&source.identity());
    if let Some(cached) = cache.load(store) {
        if !cached.documents.is_empty() && validate_collection(&cached.documents).is_ok() {
            tracing::debug!(documents = cached.documents.len(), "collection served from cache");
            return Ok(LoadedCollection {
                documents: cached.documents,
                from_cache: true,
            });
        }
    }

    let documents = source.fetch()?;
    tracing::debug!(
        location = %source.location(),
        documents = documents.len(),
        "collection fetched"
    );
    cache.store(store, &documents);
    Ok(LoadedCollection {
        documents,
        from_cache: false,
    })
}
