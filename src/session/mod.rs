// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search dialog as an explicit state machine.
//!
//! A [`SearchSession`] consumes discrete [`Event`]s and returns the
//! [`Effect`]s the host must carry out (fetch the index, arm a timer, move
//! focus, scroll, navigate). It performs no I/O of its own besides the
//! injected key-value store, so every ordering and cancellation rule is
//! testable without a browser.
//!
//! # States
//!
//! ```text
//!            Open (cache miss)                LoadSucceeded
//!   Idle ─────────────────────▶ LoadingIndex ───────────────▶ IdleWithIndex
//!     │                              │ LoadFailed                 │  ▲
//!     │ Open (cache hit)             ▼                            │  │ blank query
//!     └─────────────────────────▶  Error                QueryChanged │
//!                                                                 ▼  │
//!                              ResultsShown ◀── DebounceFired ── Searching
//! ```
//!
//! Open/closed is tracked separately from the state above.
//!
//! # INVARIANTS
//!
//! - Every `Open` resets query, results, cursor, window and error.
//! - A completion (load or debounce) carrying a ticket other than the current
//!   one is dropped. Closing the dialog invalidates every outstanding ticket.
//! - A blank query clears results immediately and never schedules a search.
//! - At most one index load is in flight.
//! - The cursor stays within `min(displayed, results) - 1`.

mod view;
mod window;

pub use view::{RecentPostView, ResultView, SessionView};
pub use window::ResultWindow;

use serde::{Deserialize, Serialize};

use crate::cache::{IndexCache, SearchHistory};
use crate::config::SearchConfig;
use crate::error::SessionError;
use crate::scoring::ranking::ScoredHit;
use crate::scoring::{Clock, SystemClock};
use crate::search::QueryEngine;
use crate::store::KeyValueStore;
use crate::types::{validate_collection, Document};

// ============================================================================
// EVENTS AND EFFECTS
// ============================================================================

/// Generation counter tying an asynchronous completion to the request that
/// started it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(u32);

impl Ticket {
    pub fn new(value: u32) -> Self {
        Ticket(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    fn bump(&mut self) -> Ticket {
        self.0 = self.0.wrapping_add(1);
        *self
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    /// No index in memory, nothing in flight.
    Idle,
    LoadingIndex,
    IdleWithIndex,
    /// A search is scheduled and waiting for the debounce to fire.
    Searching,
    ResultsShown,
    Error,
}

/// Keyboard bindings active while the dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    Next,
    Previous,
    Confirm,
    Cancel,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name to a binding.
    pub fn from_dom_key(name: &str) -> Option<Self> {
        match name {
            "ArrowDown" => Some(Key::Next),
            "ArrowUp" => Some(Key::Previous),
            "Enter" => Some(Key::Confirm),
            "Escape" => Some(Key::Cancel),
            _ => None,
        }
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Open,
    Close,
    QueryChanged(String),
    /// The timer armed by [`Effect::ScheduleSearch`] elapsed.
    DebounceFired { ticket: Ticket },
    /// The fetch requested by [`Effect::FetchIndex`] delivered a collection.
    LoadSucceeded {
        ticket: Ticket,
        documents: Vec<Document>,
    },
    LoadFailed { ticket: Ticket, reason: String },
    Key(Key),
    LoadMore,
    /// A click on one of the recent-post suggestions, by position.
    SelectRecent(usize),
    /// A click on one of the recent-search suggestions.
    SelectHistory(String),
}

/// Work the host performs on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    /// Fetch the collection from `url` and report back with the same ticket.
    #[serde(rename_all = "camelCase")]
    FetchIndex { ticket: Ticket, url: String },
    /// Arm (or re-arm) the debounce timer. Any earlier timer is superseded.
    #[serde(rename_all = "camelCase")]
    ScheduleSearch { ticket: Ticket, delay_ms: u64 },
    FocusInput,
    ScrollToTop,
    /// Bring the result at this visible position into view.
    ScrollIntoView { index: usize },
    Navigate { url: String },
    /// Close the dialog surface.
    Dismiss,
}

// ============================================================================
// SESSION
// ============================================================================

/// One search dialog, from first open to page unload.
///
/// The collection and its token index are created lazily on the first open
/// and survive close/open cycles. Query state does not.
pub struct SearchSession<S: KeyValueStore> {
    config: SearchConfig,
    store: S,
    cache: IndexCache,
    history: SearchHistory,
    clock: Box<dyn Clock>,

    engine: Option<QueryEngine>,
    pending_load: Option<Ticket>,
    load_tickets: Ticket,

    open: bool,
    state: SessionState,
    query: String,
    results: Vec<ScoredHit>,
    window: ResultWindow,
    error: Option<SessionError>,
    search_ticket: Ticket,
}

impl<S: KeyValueStore> SearchSession<S> {
    /// A closed session using the wall clock.
    pub fn new(config: SearchConfig, store: S) -> Self {
        Self::with_clock(config, store, Box::new(SystemClock))
    }

    pub fn with_clock(config: SearchConfig, store: S, clock: Box<dyn Clock>) -> Self {
        Self {
            cache: IndexCache::from_config(&config),
            history: SearchHistory::from_config(&config),
            window: ResultWindow::new(config.page_size),
            config,
            store,
            clock,
            engine: None,
            pending_load: None,
            load_tickets: Ticket::default(),
            open: false,
            state: SessionState::Idle,
            query: String::new(),
            results: Vec::new(),
            error: None,
            search_ticket: Ticket::default(),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn window(&self) -> &ResultWindow {
        &self.window
    }

    pub fn engine(&self) -> Option<&QueryEngine> {
        self.engine.as_ref()
    }

    /// Whether a load is in flight.
    pub fn is_loading_index(&self) -> bool {
        self.pending_load.is_some()
    }

    /// All ranked results, not just the visible window.
    pub fn results(&self) -> Vec<&Document> {
        match &self.engine {
            Some(engine) => engine.resolve(&self.results),
            None => Vec::new(),
        }
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// The results inside the pagination window.
    pub fn visible_results(&self) -> Vec<&Document> {
        let mut results = self.results();
        results.truncate(self.window.visible(self.results.len()));
        results
    }

    pub fn selected(&self) -> Option<&Document> {
        let hit = self.results.get(self.window.cursor())?;
        self.engine.as_ref()?.document(hit.position)
    }

    /// Recent-post suggestions: the head of the collection.
    pub fn recent_posts(&self) -> &[Document] {
        match &self.engine {
            Some(engine) => engine.recent(self.config.recent_posts),
            None => &[],
        }
    }

    /// Recent-search suggestions, most recent first.
    pub fn recent_searches(&self) -> Vec<String> {
        let mut entries = self.history.entries(&self.store);
        entries.truncate(self.config.suggested_searches);
        entries
    }

    // ------------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------------

    /// Apply one event and return the effects the host must perform, in order.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Open => self.on_open(),
            Event::Close => {
                self.close();
                Vec::new()
            }
            Event::QueryChanged(query) => self.on_query_changed(query),
            Event::DebounceFired { ticket } => self.on_debounce_fired(ticket),
            Event::LoadSucceeded { ticket, documents } => self.on_load_succeeded(ticket, documents),
            Event::LoadFailed { ticket, reason } => self.on_load_failed(ticket, reason),
            Event::Key(key) => self.on_key(key),
            Event::LoadMore => self.on_load_more(),
            Event::SelectRecent(position) => self.on_select_recent(position),
            Event::SelectHistory(term) => self.on_query_changed(term),
        }
    }

    fn on_open(&mut self) -> Vec<Effect> {
        self.open = true;
        self.reset_query_state();
        let mut effects = vec![Effect::FocusInput, Effect::ScrollToTop];

        if self.engine.is_some() || self.pending_load.is_some() {
            self.state = self.settled_state();
            return effects;
        }

        match self.cache.load(&self.store) {
            Some(cached)
                if !cached.documents.is_empty()
                    && validate_collection(&cached.documents).is_ok() =>
            {
                tracing::debug!(documents = cached.documents.len(), "search index served from cache");
                self.install(cached.documents);
                self.state = SessionState::IdleWithIndex;
            }
            _ => {
                let ticket = self.load_tickets.bump();
                self.pending_load = Some(ticket);
                self.state = SessionState::LoadingIndex;
                effects.push(Effect::FetchIndex {
                    ticket,
                    url: self.config.index_url.clone(),
                });
            }
        }
        effects
    }

    /// Close the dialog, dropping every outstanding completion.
    fn close(&mut self) {
        self.open = false;
        self.reset_query_state();
        if let Some(ticket) = self.pending_load.take() {
            tracing::debug!(ticket = ticket.value(), "index load abandoned on close");
        }
        self.state = self.settled_state();
    }

    fn on_query_changed(&mut self, query: String) -> Vec<Effect> {
        if !self.open {
            tracing::debug!("query change ignored while closed");
            return Vec::new();
        }
        self.query = query;
        let ticket = self.search_ticket.bump();

        if self.query.trim().is_empty() {
            self.results.clear();
            self.window.reset();
            self.state = self.settled_state();
            return Vec::new();
        }

        if self.engine.is_none() && self.pending_load.is_none() {
            // No index and none coming until the dialog is reopened.
            return vec![Effect::ScrollToTop];
        }
        if self.engine.is_some() {
            self.state = SessionState::Searching;
        }
        vec![self.schedule(ticket), Effect::ScrollToTop]
    }

    fn on_debounce_fired(&mut self, ticket: Ticket) -> Vec<Effect> {
        if ticket != self.search_ticket || !self.open {
            tracing::debug!(
                ticket = ticket.value(),
                current = self.search_ticket.value(),
                "stale debounce dropped"
            );
            return Vec::new();
        }
        if self.query.trim().is_empty() {
            return Vec::new();
        }

        let Some(engine) = self.engine.as_ref() else {
            // Index still loading; the load completion reschedules.
            self.results.clear();
            self.window.reset();
            return Vec::new();
        };

        self.error = None;
        let outcome = engine.search_with_history(
            &self.query,
            &mut self.store,
            &self.history,
            self.clock.as_ref(),
        );
        self.window.reset();
        match outcome {
            Ok(hits) => {
                tracing::debug!(query = %self.query, results = hits.len(), "search complete");
                self.results = hits;
                self.state = SessionState::ResultsShown;
            }
            Err(e) => {
                tracing::warn!(query = %self.query, error = %e, "search failed");
                self.results.clear();
                self.error = Some(SessionError::SearchFailed {
                    reason: e.to_string(),
                });
                self.state = SessionState::Error;
            }
        }
        Vec::new()
    }

    fn on_load_succeeded(&mut self, ticket: Ticket, documents: Vec<Document>) -> Vec<Effect> {
        if self.pending_load != Some(ticket) {
            tracing::debug!(ticket = ticket.value(), "stale index load dropped");
            return Vec::new();
        }
        self.pending_load = None;

        if let Err(e) = validate_collection(&documents) {
            return self.fail_load(e.to_string());
        }
        self.cache.store(&mut self.store, &documents);
        self.install(documents);

        if self.query.trim().is_empty() {
            self.state = self.settled_state();
            return Vec::new();
        }
        // Typing during the load must not be lost.
        let ticket = self.search_ticket.bump();
        self.state = SessionState::Searching;
        vec![self.schedule(ticket)]
    }

    fn on_load_failed(&mut self, ticket: Ticket, reason: String) -> Vec<Effect> {
        if self.pending_load != Some(ticket) {
            tracing::debug!(ticket = ticket.value(), "stale index failure dropped");
            return Vec::new();
        }
        self.pending_load = None;
        self.fail_load(reason)
    }

    fn fail_load(&mut self, reason: String) -> Vec<Effect> {
        tracing::warn!(reason = %reason, "search index failed to load");
        self.error = Some(SessionError::IndexLoad { reason });
        self.state = SessionState::Error;
        Vec::new()
    }

    fn on_key(&mut self, key: Key) -> Vec<Effect> {
        if !self.open {
            return Vec::new();
        }
        let total = self.results.len();
        match key {
            Key::Next => self
                .window
                .next(total)
                .map(|index| vec![Effect::ScrollIntoView { index }])
                .unwrap_or_default(),
            Key::Previous => self
                .window
                .previous()
                .map(|index| vec![Effect::ScrollIntoView { index }])
                .unwrap_or_default(),
            Key::Confirm => match self.selected().map(|doc| doc.url.clone()) {
                Some(url) if !url.is_empty() => self.navigate(url),
                _ => Vec::new(),
            },
            Key::Cancel => {
                self.close();
                vec![Effect::Dismiss]
            }
        }
    }

    fn on_load_more(&mut self) -> Vec<Effect> {
        if self.open && self.window.load_more(self.results.len()) {
            tracing::debug!(displayed = self.window.displayed(), "result window extended");
        }
        Vec::new()
    }

    fn on_select_recent(&mut self, position: usize) -> Vec<Effect> {
        if !self.open {
            return Vec::new();
        }
        match self.recent_posts().get(position).map(|doc| doc.url.clone()) {
            Some(url) if !url.is_empty() => self.navigate(url),
            _ => Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn navigate(&mut self, url: String) -> Vec<Effect> {
        self.close();
        vec![Effect::Navigate { url }, Effect::Dismiss]
    }

    fn schedule(&self, ticket: Ticket) -> Effect {
        Effect::ScheduleSearch {
            ticket,
            delay_ms: self.config.debounce_ms,
        }
    }

    fn install(&mut self, documents: Vec<Document>) {
        self.engine = Some(QueryEngine::from_config(documents, &self.config));
    }

    /// Query, results, cursor, window and error back to their initial values.
    /// Bumps the search ticket so any armed debounce goes stale.
    fn reset_query_state(&mut self) {
        self.query.clear();
        self.results.clear();
        self.window.reset();
        self.error = None;
        self.search_ticket.bump();
    }

    /// The state implied by the current flags when no search is active.
    fn settled_state(&self) -> SessionState {
        if self.error.is_some() {
            SessionState::Error
        } else if self.engine.is_some() {
            SessionState::IdleWithIndex
        } else if self.pending_load.is_some() {
            SessionState::LoadingIndex
        } else {
            SessionState::Idle
        }
    }
}

impl<S: KeyValueStore> std::fmt::Debug for SearchSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("open", &self.open)
            .field("state", &self.state)
            .field("query", &self.query)
            .field("results", &self.results.len())
            .field("window", &self.window)
            .field("error", &self.error)
            .field("pending_load", &self.pending_load)
            .finish()
    }
}
