//! The on-disk store used by the command line.

use crate::common::{blog_posts, clock, config, keys};
use postsearch::{
    FileStore, IndexCache, KeyValueStore, QueryEngine, SearchHistory, INDEX_VERSION,
};
use tempfile::TempDir;

#[test]
fn test_cache_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let cache = IndexCache::new(INDEX_VERSION, keys());
    {
        let mut store = FileStore::open(dir.path()).unwrap();
        cache.store(&mut store, &blog_posts());
    }

    let store = FileStore::open(dir.path()).unwrap();
    let cached = cache.load(&store).expect("cache persisted");
    assert_eq!(cached.documents.len(), 5);
}

#[test]
fn test_history_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let engine = QueryEngine::from_config(blog_posts(), &config());
    let history = SearchHistory::from_config(&config());
    {
        let mut store = FileStore::open(dir.path()).unwrap();
        engine
            .search_with_history("docker", &mut store, &history, &clock())
            .unwrap();
        engine
            .search_with_history("rust", &mut store, &history, &clock())
            .unwrap();
    }

    let mut store = FileStore::open(dir.path()).unwrap();
    assert_eq!(history.entries(&store), vec!["rust", "docker"]);

    history.clear(&mut store);
    let store = FileStore::open(dir.path()).unwrap();
    assert!(history.entries(&store).is_empty());
}

#[test]
fn test_corrupt_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(FileStore::FILE_NAME), "not json at all").unwrap();

    let mut store = FileStore::open(dir.path()).unwrap();
    assert_eq!(store.get("anything").unwrap(), None);
    store.set("key", "value").unwrap();

    let reopened = FileStore::open(dir.path()).unwrap();
    assert_eq!(reopened.get("key").unwrap().as_deref(), Some("value"));
}

#[test]
fn test_open_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("state").join("postsearch");
    let mut store = FileStore::open(&nested).unwrap();
    store.set("k", "v").unwrap();
    assert!(nested.join(FileStore::FILE_NAME).exists());
}
