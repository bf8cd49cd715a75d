//! Versioned cache behavior against real stores.

use std::fs;
use std::path::Path;

use crate::common::{blog_posts, keys, make_doc, FailingStore};
use postsearch::{
    load_through_cache, Document, FileSource, IndexCache, KeyValueStore, MemoryStore,
    StaticSource, INDEX_VERSION,
};
use tempfile::TempDir;

fn cache() -> IndexCache {
    IndexCache::new(INDEX_VERSION, keys())
}

#[test]
fn test_store_then_load_same_version() {
    let mut store = MemoryStore::new();
    cache().store(&mut store, &blog_posts());

    let cached = cache().load(&store).expect("cache hit");
    assert_eq!(cached.version, INDEX_VERSION);
    assert_eq!(cached.documents, blog_posts());
}

#[test]
fn test_version_mismatch_is_miss() {
    let mut store = MemoryStore::new();
    IndexCache::new("0.9", keys()).store(&mut store, &blog_posts());
    assert!(cache().load(&store).is_none());
}

#[test]
fn test_missing_version_marker_is_miss() {
    let mut store = MemoryStore::new();
    cache().store(&mut store, &blog_posts());
    store.remove(&keys().version).unwrap();
    assert!(cache().load(&store).is_none());
}

#[test]
fn test_corrupt_collection_is_miss() {
    let mut store = MemoryStore::new();
    cache().store(&mut store, &blog_posts());
    store.set(&keys().index, "{not json").unwrap();
    assert!(cache().load(&store).is_none());
}

#[test]
fn test_oversized_collection_leaves_no_marker() {
    let mut store = MemoryStore::with_quota(64);
    cache().store(&mut store, &blog_posts());
    assert!(cache().load(&store).is_none());
    assert_eq!(store.get(&keys().version).unwrap(), None);
}

#[test]
fn test_unavailable_storage_is_miss() {
    cache().store(&mut FailingStore, &blog_posts());
    assert!(cache().load(&FailingStore).is_none());
}

#[test]
fn test_load_through_cache_fetches_once() {
    let source = StaticSource::new(blog_posts());
    let mut store = MemoryStore::new();

    let first = load_through_cache(&source, &cache(), &mut store).unwrap();
    assert!(!first.from_cache);
    let second = load_through_cache(&source, &cache(), &mut store).unwrap();
    assert!(second.from_cache);
    assert_eq!(first.documents, second.documents);
}

fn write_index(path: &Path, documents: &[Document]) {
    fs::write(path, serde_json::to_string(documents).unwrap()).unwrap();
}

#[test]
fn test_different_file_is_not_served_from_cache() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    write_index(&a, &[make_doc("a", "Alpha")]);
    write_index(&b, &[make_doc("b", "Beta")]);
    let mut store = MemoryStore::new();

    let first = load_through_cache(&FileSource::new(&a), &cache(), &mut store).unwrap();
    assert_eq!(first.documents[0].id, "a");

    let second = load_through_cache(&FileSource::new(&b), &cache(), &mut store).unwrap();
    assert!(!second.from_cache);
    assert_eq!(second.documents[0].id, "b");

    let third = load_through_cache(&FileSource::new(&b), &cache(), &mut store).unwrap();
    assert!(third.from_cache);
    assert_eq!(third.documents[0].id, "b");
}

#[test]
fn test_rewritten_file_is_refetched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.json");
    write_index(&path, &[make_doc("a", "Alpha")]);
    let mut store = MemoryStore::new();
    load_through_cache(&FileSource::new(&path), &cache(), &mut store).unwrap();

    write_index(&path, &[make_doc("a", "Alpha"), make_doc("b", "Beta")]);
    let loaded = load_through_cache(&FileSource::new(&path), &cache(), &mut store).unwrap();

    assert!(!loaded.from_cache);
    assert_eq!(loaded.documents.len(), 2);
}
