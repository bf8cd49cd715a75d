// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Client-side full-text search for a blog.
//!
//! The whole collection is small enough to ship to the reader: it is fetched
//! once, cached on-device under a version marker, indexed in memory by token
//! prefix, and ranked with a fixed relevance table. A search dialog drives it
//! all as an explicit state machine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  types.rs   │────▶│   index/     │────▶│   search/   │
//! │ (Document)  │     │ (TokenIndex, │     │(QueryEngine,│
//! │             │     │  tokenize)   │     │  fallback)  │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        │                                        │
//!        ▼                                        ▼
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  store.rs   │────▶│  cache.rs    │────▶│  session/   │
//! │(KeyValue-   │     │ (IndexCache, │     │(SearchSess- │
//! │  Store)     │     │  History)    │     │ ion, view)  │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                                                 │
//!                                   ┌─────────────┴────────────┐
//!                                   ▼                          ▼
//!                              cli/ (native)              wasm.rs (browser)
//! ```
//!
//! # Usage
//!
//! ```
//! use postsearch::{QueryEngine, CandidateLimits, Document, SystemClock};
//!
//! let docs: Vec<Document> = serde_json::from_str(r#"[
//!     {"id": "compose", "title": "Docker Compose Guide", "url": "/blog/compose"},
//!     {"id": "k8s", "title": "Getting Started with Kubernetes", "url": "/blog/k8s",
//!      "content": "docker docker docker"}
//! ]"#).unwrap();
//!
//! let engine = QueryEngine::new(docs, CandidateLimits::default());
//! let results = engine.search_documents("docker", &SystemClock).unwrap();
//! assert_eq!(results[0].id, "compose");
//! ```

pub mod build;
pub mod cache;
pub mod config;
pub mod contracts;
pub mod error;
pub mod index;
pub mod scoring;
pub mod search;
pub mod session;
pub mod snippet;
pub mod source;
pub mod store;
pub mod testing;
pub mod types;

#[cfg(feature = "wasm")]
mod wasm;

// Re-exports for public API
pub use cache::{CachedIndex, IndexCache, SearchHistory};
pub use config::{SearchConfig, StorageKeys, DEFAULT_INDEX_URL, INDEX_VERSION};
pub use error::{Error, Result, SearchError, SessionError, StoreError};
pub use index::TokenIndex;
pub use scoring::ranking::ScoredHit;
pub use scoring::{relevance_score, Clock, QueryTerms, SystemClock};
pub use search::{CandidateLimits, QueryEngine};
pub use session::{Effect, Event, Key, SearchSession, SessionState, SessionView, Ticket};
pub use snippet::{extract_snippet, format_display_date, highlight, Segment};
pub use source::{load_through_cache, FileSource, IndexSource, LoadedCollection, StaticSource};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{validate_collection, Document};
