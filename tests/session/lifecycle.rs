//! Open/close, index loading and cache interplay.

use crate::common::{
    blog_posts, config, fetch_ticket, keys, make_doc, open_loaded, result_ids, schedule_ticket,
    session, session_with_store, type_and_settle,
};
use postsearch::{Effect, Event, IndexCache, MemoryStore, SessionState, INDEX_VERSION};

#[test]
fn test_first_open_requests_index() {
    let mut s = session();
    assert_eq!(s.state(), SessionState::Idle);

    let effects = s.handle(Event::Open);
    assert_eq!(effects[0], Effect::FocusInput);
    assert_eq!(effects[1], Effect::ScrollToTop);
    assert!(fetch_ticket(&effects).is_some());
    assert_eq!(s.state(), SessionState::LoadingIndex);
    assert!(s.is_loading_index());
}

#[test]
fn test_load_caches_collection() {
    let s = open_loaded(blog_posts());
    assert_eq!(s.state(), SessionState::IdleWithIndex);

    let cache = IndexCache::new(INDEX_VERSION, keys());
    let cached = cache.load(s.store()).expect("collection cached after load");
    assert_eq!(cached.documents, blog_posts());
    assert_eq!(cached.version, "1.0");
}

#[test]
fn test_cache_hit_skips_fetch() {
    let mut store = MemoryStore::new();
    IndexCache::new(INDEX_VERSION, keys()).store(&mut store, &blog_posts());

    let mut s = session_with_store(store);
    let effects = s.handle(Event::Open);
    assert!(fetch_ticket(&effects).is_none());
    assert_eq!(s.state(), SessionState::IdleWithIndex);
    assert_eq!(s.recent_posts().len(), 5);
}

#[test]
fn test_stale_cache_version_refetches() {
    let mut store = MemoryStore::new();
    IndexCache::new("0.9", keys()).store(&mut store, &blog_posts());

    let mut s = session_with_store(store);
    assert!(fetch_ticket(&s.handle(Event::Open)).is_some());
}

#[test]
fn test_empty_cached_collection_refetches() {
    let mut store = MemoryStore::new();
    IndexCache::new(INDEX_VERSION, keys()).store(&mut store, &[]);

    let mut s = session_with_store(store);
    assert!(fetch_ticket(&s.handle(Event::Open)).is_some());
}

#[test]
fn test_reopen_resets_query_and_results() {
    let mut s = open_loaded(blog_posts());
    type_and_settle(&mut s, "foo");
    type_and_settle(&mut s, "docker");
    assert!(!result_ids(&s).is_empty());

    s.handle(Event::Close);
    s.handle(Event::QueryChanged("foo".into()));
    let effects = s.handle(Event::Open);

    assert_eq!(s.query(), "");
    assert!(s.results().is_empty());
    assert_eq!(s.window().cursor(), 0);
    assert_eq!(s.window().displayed(), 10);
    assert!(s.error().is_none());
    assert!(fetch_ticket(&effects).is_none(), "index survives close");
}

#[test]
fn test_open_while_open_still_resets() {
    let mut s = open_loaded(blog_posts());
    type_and_settle(&mut s, "docker");
    s.handle(Event::Open);
    assert_eq!(s.query(), "");
    assert!(s.results().is_empty());
}

#[test]
fn test_close_abandons_inflight_load() {
    let mut s = session();
    let ticket = fetch_ticket(&s.handle(Event::Open)).unwrap();
    s.handle(Event::Close);

    s.handle(Event::LoadSucceeded {
        ticket,
        documents: blog_posts(),
    });
    assert!(s.engine().is_none());
    assert_eq!(s.state(), SessionState::Idle);
}

#[test]
fn test_superseded_load_ignored() {
    let mut s = session();
    let first = fetch_ticket(&s.handle(Event::Open)).unwrap();
    s.handle(Event::Close);
    let second = fetch_ticket(&s.handle(Event::Open)).unwrap();
    assert_ne!(first, second);

    s.handle(Event::LoadFailed {
        ticket: first,
        reason: "late failure".into(),
    });
    assert!(s.error().is_none());
    s.handle(Event::LoadSucceeded {
        ticket: second,
        documents: blog_posts(),
    });
    assert_eq!(s.state(), SessionState::IdleWithIndex);
}

#[test]
fn test_load_failure_is_recoverable_by_reopening() {
    let mut s = session();
    let ticket = fetch_ticket(&s.handle(Event::Open)).unwrap();
    s.handle(Event::LoadFailed {
        ticket,
        reason: "HTTP 503".into(),
    });
    assert_eq!(s.state(), SessionState::Error);
    assert_eq!(
        s.view().error.as_deref(),
        Some("Failed to load search index. Please try again later.")
    );

    // No index, no results
    type_and_settle(&mut s, "docker");
    assert!(s.results().is_empty());

    s.handle(Event::Close);
    let retry = fetch_ticket(&s.handle(Event::Open)).expect("reopen retries");
    s.handle(Event::LoadSucceeded {
        ticket: retry,
        documents: blog_posts(),
    });
    assert!(s.error().is_none());
    assert_eq!(s.state(), SessionState::IdleWithIndex);
}

#[test]
fn test_duplicate_ids_fail_the_load() {
    let mut s = session();
    let ticket = fetch_ticket(&s.handle(Event::Open)).unwrap();
    let effects = s.handle(Event::LoadSucceeded {
        ticket,
        documents: vec![make_doc("a", "One"), make_doc("a", "Two")],
    });

    assert!(effects.is_empty());
    assert_eq!(s.state(), SessionState::Error);
    assert!(s.engine().is_none());
    assert_eq!(
        s.view().error.as_deref(),
        Some("Failed to load search index. Please try again later.")
    );
    assert!(IndexCache::new(INDEX_VERSION, keys()).load(s.store()).is_none());
}

#[test]
fn test_empty_url_fails_the_load() {
    let mut s = session();
    let ticket = fetch_ticket(&s.handle(Event::Open)).unwrap();
    let mut doc = make_doc("a", "One");
    doc.url.clear();
    s.handle(Event::LoadSucceeded {
        ticket,
        documents: vec![doc],
    });

    assert_eq!(s.state(), SessionState::Error);
    assert!(s.engine().is_none());
    assert!(IndexCache::new(INDEX_VERSION, keys()).load(s.store()).is_none());
}

#[test]
fn test_invalid_cached_collection_refetches() {
    let mut store = MemoryStore::new();
    IndexCache::new(INDEX_VERSION, keys())
        .store(&mut store, &[make_doc("a", "One"), make_doc("a", "Two")]);

    let mut s = session_with_store(store);
    let ticket = fetch_ticket(&s.handle(Event::Open)).expect("invalid cache is a miss");
    assert!(s.engine().is_none());
    assert_eq!(s.state(), SessionState::LoadingIndex);

    s.handle(Event::LoadSucceeded {
        ticket,
        documents: blog_posts(),
    });
    assert_eq!(s.state(), SessionState::IdleWithIndex);
    let cached = IndexCache::new(INDEX_VERSION, keys()).load(s.store()).unwrap();
    assert_eq!(cached.documents, blog_posts());
}

#[test]
fn test_typing_after_failed_load_stays_in_error() {
    let mut s = session();
    let ticket = fetch_ticket(&s.handle(Event::Open)).unwrap();
    s.handle(Event::LoadFailed {
        ticket,
        reason: "HTTP 503".into(),
    });

    let effects = s.handle(Event::QueryChanged("docker".into()));
    assert!(schedule_ticket(&effects).is_none());
    assert_eq!(s.query(), "docker");
    assert_eq!(s.state(), SessionState::Error);

    let view = s.view();
    assert!(view.error.is_some());
    assert!(!view.status.contains("No results found"), "status: {}", view.status);
}

#[test]
fn test_typing_during_load_searches_after_load() {
    let mut s = session();
    let ticket = fetch_ticket(&s.handle(Event::Open)).unwrap();

    let typed = s.handle(Event::QueryChanged("docker".into()));
    assert_eq!(s.state(), SessionState::LoadingIndex);
    // The early debounce finds no index and does nothing.
    s.handle(Event::DebounceFired {
        ticket: schedule_ticket(&typed).unwrap(),
    });
    assert!(s.results().is_empty());

    let loaded = s.handle(Event::LoadSucceeded {
        ticket,
        documents: blog_posts(),
    });
    assert_eq!(s.state(), SessionState::Searching);
    s.handle(Event::DebounceFired {
        ticket: schedule_ticket(&loaded).unwrap(),
    });
    assert_eq!(result_ids(&s)[0], "docker-compose-guide");
}

#[test]
fn test_custom_index_url() {
    let mut cfg = config();
    cfg.index_url = "/search.json".into();
    let mut s = postsearch::SearchSession::new(cfg, MemoryStore::new());
    let effects = s.handle(Event::Open);
    assert!(effects.contains(&Effect::FetchIndex {
        ticket: fetch_ticket(&effects).unwrap(),
        url: "/search.json".into(),
    }));
}
