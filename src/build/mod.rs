// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search-index generation: post sources in, the served JSON collection out.
//!
//! The output is exactly what the index endpoint serves and what
//! [`FileSource`](crate::source::FileSource) reads back: a newest-first array
//! of [`Document`]s with markup stripped from the content.

pub mod document;
pub mod manifest;

use std::cmp::Reverse;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::scoring::parse_date;
use crate::types::{validate_collection, Document};

pub use document::*;
pub use manifest::*;

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub documents: usize,
    pub drafts_skipped: usize,
    pub bytes: usize,
}

/// Read every post listed in the manifest under `input_dir`.
pub fn load_posts(input_dir: &Path, manifest: &InputManifest) -> Result<Vec<PostSource>> {
    manifest
        .documents
        .iter()
        .enumerate()
        .map(|(position, filename)| {
            let path = input_dir.join(filename);
            let content = fs::read_to_string(&path).map_err(|e| Error::Fetch {
                location: path.display().to_string(),
                reason: e.to_string(),
            })?;
            serde_json::from_str::<PostSource>(&content).map_err(|e| Error::InvalidDocument {
                position,
                reason: format!("invalid JSON in {}: {}", filename, e),
            })
        })
        .collect()
}

/// Turn posts into a validated, newest-first collection. Drafts are skipped.
///
/// Posts with unparseable dates sort after every dated post, keeping their
/// relative order.
pub fn build_collection(
    posts: &[PostSource],
    url_prefix: &str,
    built_at: DateTime<Utc>,
) -> Result<Vec<Document>> {
    let mut documents: Vec<Document> = posts
        .iter()
        .filter(|post| !post.draft)
        .map(|post| post.to_document(url_prefix, built_at))
        .collect();

    // sort_by_key is stable: equal dates keep manifest order.
    documents.sort_by_key(|doc| Reverse(parse_date(&doc.date)));
    validate_collection(&documents)?;
    Ok(documents)
}

/// Read `input_dir/manifest.json`, build the collection and write it to
/// `output` as JSON.
pub fn run_build(input_dir: &Path, output: &Path, built_at: DateTime<Utc>) -> Result<BuildSummary> {
    let manifest_path = input_dir.join("manifest.json");
    let manifest_content = fs::read_to_string(&manifest_path).map_err(|e| Error::Fetch {
        location: manifest_path.display().to_string(),
        reason: e.to_string(),
    })?;
    let manifest: InputManifest = serde_json::from_str(&manifest_content)?;
    manifest.validate()?;

    let posts = load_posts(input_dir, &manifest)?;
    let documents = build_collection(&posts, manifest.url_prefix(), built_at)?;
    let drafts_skipped = posts.len() - documents.len();

    if documents.is_empty() {
        tracing::warn!(input = %input_dir.display(), "no publishable posts; writing an empty index");
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(&documents)?;
    fs::write(output, &json)?;

    tracing::debug!(
        documents = documents.len(),
        drafts_skipped,
        bytes = json.len(),
        output = %output.display(),
        "search index written"
    );

    Ok(BuildSummary {
        documents: documents.len(),
        drafts_skipped,
        bytes: json.len(),
    })
}

/// Human-readable byte count.
pub fn format_bytes(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
