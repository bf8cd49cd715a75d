//! Per-word fallback when the whole query has no candidates.

use crate::common::{blog_posts, clock, make_doc, make_matching_docs};
use postsearch::{CandidateLimits, QueryEngine, SearchError};

fn engine() -> QueryEngine {
    QueryEngine::new(blog_posts(), CandidateLimits::default())
}

fn ids(engine: &QueryEngine, query: &str) -> Vec<String> {
    engine
        .search_documents(query, &clock())
        .unwrap()
        .into_iter()
        .map(|d| d.id.clone())
        .collect()
}

#[test]
fn test_unknown_word_does_not_sink_query() {
    let results = ids(&engine(), "docker tutorial");
    assert_eq!(results[0], "docker-compose-guide");
    assert!(results.contains(&"kubernetes-intro".to_string()));
}

#[test]
fn test_fallback_unions_distinct_words() {
    let results = ids(&engine(), "rust typescript");
    assert_eq!(results.len(), 2);
    assert!(results.contains(&"rust-ownership".to_string()));
    assert!(results.contains(&"typescript-generics".to_string()));
}

#[test]
fn test_prefix_matching() {
    let results = ids(&engine(), "kube");
    assert_eq!(results, vec!["kubernetes-intro"]);
}

#[test]
fn test_short_words_ignored_in_fallback() {
    // "go" and "js" are too short to be looked up alone
    assert!(ids(&engine(), "go js").is_empty());
}

#[test]
fn test_per_word_cap_applies() {
    let mut docs = make_matching_docs(40, "tokio");
    docs.push(make_doc("other", "Unrelated"));
    let engine = QueryEngine::new(docs, CandidateLimits::default());
    assert_eq!(ids(&engine, "tokio zzzz").len(), 20);
    assert_eq!(ids(&engine, "tokio").len(), 40);
}

#[test]
fn test_primary_cap_applies() {
    let engine = QueryEngine::new(make_matching_docs(80, "tokio"), CandidateLimits::default());
    assert_eq!(ids(&engine, "tokio").len(), 50);
}

#[test]
fn test_blank_query_rejected() {
    assert_eq!(
        engine().search(" \t ", &clock()).unwrap_err(),
        SearchError::EmptyQuery
    );
}
