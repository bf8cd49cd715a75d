// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Render-ready snapshot of a session.
//!
//! Hosts never reach into the session to decide what to draw; they take a
//! [`SessionView`] and render it. Highlighting, snippets, date formatting and
//! the screen-reader announcement are all decided here.

use serde::Serialize;

use super::{SearchSession, SessionState};
use crate::snippet::{extract_snippet, format_display_date, highlight, Segment};
use crate::store::KeyValueStore;
use crate::types::Document;

/// Tags shown per result before collapsing into "+N more".
const VISIBLE_TAGS: usize = 3;

/// One visible search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub id: String,
    pub url: String,
    pub title: Vec<Segment>,
    pub description: Vec<Segment>,
    pub snippet: Vec<Segment>,
    pub date: String,
    pub tags: Vec<String>,
    /// Tags beyond the first three.
    pub more_tags: usize,
    pub selected: bool,
}

/// One recent-post suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPostView {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub date: String,
}

/// Everything a host needs to draw the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub open: bool,
    pub state: SessionState,
    pub query: String,
    pub error: Option<String>,
    /// Live-region announcement for screen readers.
    pub status: String,
    pub results: Vec<ResultView>,
    pub total: usize,
    pub has_more: bool,
    pub remaining: usize,
    /// Shown only while the query is blank.
    pub recent_posts: Vec<RecentPostView>,
    /// Shown only while the query is blank.
    pub recent_searches: Vec<String>,
}

impl SessionView {
    /// Label for the pagination button, if there is anything left to show.
    pub fn load_more_label(&self) -> Option<String> {
        self.has_more
            .then(|| format!("Load more ({} remaining)", self.remaining))
    }
}

impl<S: KeyValueStore> SearchSession<S> {
    /// Snapshot the session for rendering.
    pub fn view(&self) -> SessionView {
        let query = self.query.trim();
        let total = self.result_count();
        let cursor = self.window.cursor();

        let results = self
            .visible_results()
            .into_iter()
            .enumerate()
            .map(|(i, doc)| self.result_view(doc, query, i == cursor))
            .collect();

        let (recent_posts, recent_searches) = if query.is_empty() && !self.is_loading_index() {
            (
                self.recent_posts().iter().map(recent_post_view).collect(),
                self.recent_searches(),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        SessionView {
            open: self.open,
            state: self.state,
            query: self.query.clone(),
            error: self.error.as_ref().map(|e| e.to_string()),
            status: self.announcement(),
            results,
            total,
            has_more: self.window.has_more(total),
            remaining: self.window.remaining(total),
            recent_posts,
            recent_searches,
        }
    }

    fn result_view(&self, doc: &Document, query: &str, selected: bool) -> ResultView {
        let snippet = extract_snippet(
            &doc.content,
            query,
            self.config.snippet_length,
            self.config.snippet_lead,
        );
        ResultView {
            id: doc.id.clone(),
            url: doc.url.clone(),
            title: highlight(&doc.title, query),
            description: highlight(&doc.description, query),
            snippet: highlight(&snippet, query),
            date: format_display_date(&doc.date),
            tags: doc.tags.iter().take(VISIBLE_TAGS).cloned().collect(),
            more_tags: doc.tags.len().saturating_sub(VISIBLE_TAGS),
            selected,
        }
    }

    /// The polite live-region text.
    fn announcement(&self) -> String {
        let mut parts = Vec::new();
        let loading = self.is_loading_index();
        let searching = self.state == SessionState::Searching;

        if loading {
            parts.push("Loading search index...".to_string());
        }
        if searching {
            parts.push("Searching...".to_string());
        }
        if !loading && !searching && self.error.is_none() && !self.query.trim().is_empty() {
            parts.push(match self.result_count() {
                0 => "No results found".to_string(),
                1 => "1 result found".to_string(),
                n => format!("{n} results found"),
            });
        }
        if let Some(doc) = self.selected() {
            parts.push(format!("Selected: {}", doc.title));
        }
        parts.join(" ")
    }
}

fn recent_post_view(doc: &Document) -> RecentPostView {
    RecentPostView {
        id: doc.id.clone(),
        url: doc.url.clone(),
        title: doc.title.clone(),
        description: doc.description.clone(),
        date: format_display_date(&doc.date),
    }
}
