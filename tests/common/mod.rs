//! Shared test utilities and fixtures.

#![allow(dead_code)]

use postsearch::testing::FixedClock;
use postsearch::{
    Document, Effect, Event, MemoryStore, SearchConfig, SearchSession, StorageKeys, Ticket,
};

// Re-export canonical test utilities from postsearch::testing
pub use postsearch::testing::{make_doc, make_matching_docs, make_post, FailingStore, OLD_DATE};

/// The instant every fixture session treats as "now".
pub fn clock() -> FixedClock {
    FixedClock::at(2025, 6, 1)
}

// ============================================================================
// COLLECTIONS
// ============================================================================

/// A small blog, newest first, covering the ranking scenarios.
pub fn blog_posts() -> Vec<Document> {
    let mut compose = make_post(
        "docker-compose-guide",
        "Docker Compose Guide",
        "Run multi-container apps locally",
        &["docker", "devops"],
        "Compose files describe services, networks and volumes.",
    );
    compose.date = "2025-05-20T00:00:00.000Z".to_string();

    let mut k8s = make_post(
        "kubernetes-intro",
        "Getting Started with Kubernetes",
        "Pods, deployments and services",
        &["kubernetes"],
        "Before kubernetes we ran docker on every host. A docker image is \
         pushed to a registry, then docker pulls it on the node.",
    );
    k8s.date = "2025-03-01T00:00:00.000Z".to_string();

    let rust = make_post(
        "rust-ownership",
        "Rust Ownership Explained",
        "Borrowing, moves and lifetimes",
        &["rust", "programming"],
        "Ownership is how rust manages memory without a garbage collector.",
    );

    let typescript = make_post(
        "typescript-generics",
        "TypeScript Generics",
        "Reusable types",
        &["typescript", "programming"],
        "Generics let a function work over many types.",
    );

    let cpp = make_post(
        "modern-cpp",
        "Modern C++ Tips",
        "Smart pointers and RAII",
        &["c++"],
        "Prefer unique_ptr over raw new and delete in C++ code.",
    );

    vec![compose, k8s, rust, typescript, cpp]
}

// ============================================================================
// SESSIONS
// ============================================================================

pub fn config() -> SearchConfig {
    SearchConfig::default()
}

pub fn keys() -> StorageKeys {
    StorageKeys::default()
}

/// A closed session over an empty in-memory store.
pub fn session() -> SearchSession<MemoryStore> {
    session_with_store(MemoryStore::new())
}

pub fn session_with_store(store: MemoryStore) -> SearchSession<MemoryStore> {
    SearchSession::with_clock(config(), store, Box::new(clock()))
}

pub fn fetch_ticket(effects: &[Effect]) -> Option<Ticket> {
    effects.iter().find_map(|e| match e {
        Effect::FetchIndex { ticket, .. } => Some(*ticket),
        _ => None,
    })
}

pub fn schedule_ticket(effects: &[Effect]) -> Option<Ticket> {
    effects.iter().find_map(|e| match e {
        Effect::ScheduleSearch { ticket, .. } => Some(*ticket),
        _ => None,
    })
}

/// Open the dialog and complete the index fetch with `documents`.
pub fn open_loaded(documents: Vec<Document>) -> SearchSession<MemoryStore> {
    let mut s = session();
    let ticket = fetch_ticket(&s.handle(Event::Open)).expect("first open fetches");
    s.handle(Event::LoadSucceeded { ticket, documents });
    s
}

/// Type `query` and let the debounce fire.
pub fn type_and_settle(s: &mut SearchSession<MemoryStore>, query: &str) {
    let effects = s.handle(Event::QueryChanged(query.to_string()));
    if let Some(ticket) = schedule_ticket(&effects) {
        s.handle(Event::DebounceFired { ticket });
    }
}

/// Ids of the session's ranked results.
pub fn result_ids(s: &SearchSession<MemoryStore>) -> Vec<String> {
    s.results().iter().map(|d| d.id.clone()).collect()
}
