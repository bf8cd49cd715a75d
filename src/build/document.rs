// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::sync::OnceLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::parse_date;
use crate::types::Document;

/// One post as authored, before it becomes an index entry.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostSource {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Publication date. Missing dates are stamped with the build time.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    /// Rendered HTML body.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub draft: bool,
}

fn tag_pattern() -> Option<&'static Regex> {
    static TAGS: OnceLock<Option<Regex>> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]+>").ok()).as_ref()
}

/// Replace every markup tag with a space, collapse whitespace runs, trim.
pub fn strip_html(html: &str) -> String {
    let text = match tag_pattern() {
        Some(tags) => tags.replace_all(html, " "),
        None => html.into(),
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `date` as an ISO-8601 timestamp with millisecond precision.
///
/// Unparseable dates are kept as written; they only lose the recency bonus.
pub fn normalize_date(date: Option<&str>, built_at: DateTime<Utc>) -> String {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => match parse_date(raw) {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            None => raw.to_string(),
        },
        None => built_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

impl PostSource {
    /// The index entry for this post, served at `{url_prefix}/{id}`.
    pub fn to_document(&self, url_prefix: &str, built_at: DateTime<Utc>) -> Document {
        Document {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            date: normalize_date(self.date.as_deref(), built_at),
            tags: self.tags.clone(),
            authors: self.authors.clone(),
            url: format!("{}/{}", url_prefix.trim_end_matches('/'), self.id),
            content: strip_html(&self.body),
        }
    }
}
