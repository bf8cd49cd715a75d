//! End-to-end: post sources on disk, built index, search over the result.

use std::fs;
use std::path::Path;

use crate::common::clock;
use postsearch::build::run_build;
use postsearch::scoring::Clock;
use postsearch::{CandidateLimits, Error, FileSource, IndexSource, QueryEngine};
use serde_json::json;
use tempfile::TempDir;

fn write_json(path: &Path, value: serde_json::Value) {
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn write_blog(dir: &Path) {
    write_json(
        &dir.join("manifest.json"),
        json!({
            "version": 1,
            "urlPrefix": "/posts",
            "documents": ["compose.json", "k8s.json", "draft.json"]
        }),
    );
    write_json(
        &dir.join("compose.json"),
        json!({
            "id": "docker-compose-guide",
            "title": "Docker Compose Guide",
            "description": "Run multi-container apps locally",
            "date": "2025-05-20",
            "tags": ["docker", "devops"],
            "body": "<p>Compose files describe <em>services</em>.</p>"
        }),
    );
    write_json(
        &dir.join("k8s.json"),
        json!({
            "id": "kubernetes-intro",
            "title": "Getting Started with Kubernetes",
            "date": "2025-03-01T09:30:00Z",
            "body": "<p>Before kubernetes we ran docker everywhere.</p>"
        }),
    );
    write_json(
        &dir.join("draft.json"),
        json!({
            "id": "unfinished",
            "title": "Docker Secrets",
            "draft": true
        }),
    );
}

#[test]
fn test_build_then_search() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_blog(input.path());
    let output = out.path().join("public").join("search-index.json");

    let summary = run_build(input.path(), &output, clock().now()).unwrap();
    assert_eq!(summary.documents, 2);
    assert_eq!(summary.drafts_skipped, 1);
    assert_eq!(summary.bytes as u64, fs::metadata(&output).unwrap().len());

    let documents = FileSource::new(&output).fetch().unwrap();
    let compose = &documents[0];
    assert_eq!(compose.id, "docker-compose-guide");
    assert_eq!(compose.url, "/posts/docker-compose-guide");
    assert_eq!(compose.date, "2025-05-20T00:00:00.000Z");
    assert_eq!(compose.content, "Compose files describe services .");
    assert_eq!(documents[1].date, "2025-03-01T09:30:00.000Z");

    let engine = QueryEngine::new(documents, CandidateLimits::default());
    let ids: Vec<String> = engine
        .search_documents("docker", &clock())
        .unwrap()
        .into_iter()
        .map(|d| d.id.clone())
        .collect();
    assert_eq!(ids, vec!["docker-compose-guide", "kubernetes-intro"]);
}

#[test]
fn test_missing_post_file_is_fetch_error() {
    let input = TempDir::new().unwrap();
    write_json(
        &input.path().join("manifest.json"),
        json!({"version": 1, "documents": ["ghost.json"]}),
    );
    let err = run_build(input.path(), &input.path().join("out.json"), clock().now()).unwrap_err();
    assert!(matches!(err, Error::Fetch { .. }));
}

#[test]
fn test_unsupported_manifest_version() {
    let input = TempDir::new().unwrap();
    write_json(
        &input.path().join("manifest.json"),
        json!({"version": 7, "documents": []}),
    );
    let err = run_build(input.path(), &input.path().join("out.json"), clock().now()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_empty_manifest_writes_empty_index() {
    let input = TempDir::new().unwrap();
    write_json(
        &input.path().join("manifest.json"),
        json!({"version": 1, "documents": []}),
    );
    let output = input.path().join("out.json");
    let summary = run_build(input.path(), &output, clock().now()).unwrap();
    assert_eq!(summary.documents, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
}
