// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the search dialog.
//!
//! `SearchDialog` wraps a [`SearchSession`] whose store is the page's
//! `localStorage` (or anything with `getItem`/`setItem`/`removeItem`). Every
//! event method returns the effects the page must carry out, as a JS array:
//!
//! ```text
//! { type: "fetchIndex", ticket, url }      → fetch, then loadSucceeded/loadFailed
//! { type: "scheduleSearch", ticket, delayMs } → setTimeout, then debounceFired
//! { type: "focusInput" } { type: "scrollToTop" } { type: "scrollIntoView", index }
//! { type: "navigate", url } { type: "dismiss" }
//! ```

use chrono::{DateTime, Utc};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::SearchConfig;
use crate::error::StoreError;
use crate::scoring::Clock;
use crate::session::{Effect, Event, Key, SearchSession, Ticket};
use crate::store::KeyValueStore;
use crate::types::Document;

#[wasm_bindgen]
extern "C" {
    /// Web Storage, duck-typed.
    pub type JsStorage;

    #[wasm_bindgen(method, catch, js_name = getItem)]
    fn get_item(this: &JsStorage, key: &str) -> Result<Option<String>, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setItem)]
    fn set_item(this: &JsStorage, key: &str, value: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = removeItem)]
    fn remove_item(this: &JsStorage, key: &str) -> Result<(), JsValue>;
}

/// `localStorage` behind the [`KeyValueStore`] seam. Absent storage (private
/// mode, sandboxed iframes) fails every call, which the cache treats as a miss.
struct BrowserStore {
    storage: Option<JsStorage>,
}

fn js_error_name(err: &JsValue) -> Option<String> {
    err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.name()))
}

fn store_error(key: &str, value_len: usize, err: JsValue) -> StoreError {
    match js_error_name(&err).as_deref() {
        Some("QuotaExceededError") => StoreError::QuotaExceeded {
            key: key.to_string(),
            needed: value_len,
            available: 0,
        },
        _ => StoreError::Unavailable(format!("{:?}", err)),
    }
}

impl BrowserStore {
    fn storage(&self) -> Result<&JsStorage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("no storage object".to_string()))
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| store_error(key, 0, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| store_error(key, value.len(), e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| store_error(key, 0, e))
    }
}

/// `Date.now()`. `Utc::now()` has no time source on wasm32-unknown-unknown.
struct JsClock;

impl Clock for JsClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }
}

fn effects(effects: Vec<Effect>) -> Result<JsValue, JsValue> {
    to_value(&effects).map_err(Into::into)
}

/// WASM-accessible search dialog controller.
#[wasm_bindgen]
pub struct SearchDialog {
    session: SearchSession<BrowserStore>,
}

#[wasm_bindgen]
impl SearchDialog {
    /// Create a closed dialog.
    ///
    /// `storage` is usually `window.localStorage`; pass `null` when storage is
    /// unavailable. `config` is an optional partial `SearchConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(storage: Option<JsStorage>, config: JsValue) -> Result<SearchDialog, JsValue> {
        let config: SearchConfig = if config.is_undefined() || config.is_null() {
            SearchConfig::default()
        } else {
            from_value(config)?
        };
        config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(SearchDialog {
            session: SearchSession::with_clock(config, BrowserStore { storage }, Box::new(JsClock)),
        })
    }

    pub fn open(&mut self) -> Result<JsValue, JsValue> {
        effects(self.session.handle(Event::Open))
    }

    pub fn close(&mut self) -> Result<JsValue, JsValue> {
        effects(self.session.handle(Event::Close))
    }

    #[wasm_bindgen(js_name = setQuery)]
    pub fn set_query(&mut self, query: String) -> Result<JsValue, JsValue> {
        effects(self.session.handle(Event::QueryChanged(query)))
    }

    #[wasm_bindgen(js_name = debounceFired)]
    pub fn debounce_fired(&mut self, ticket: u32) -> Result<JsValue, JsValue> {
        effects(self.session.handle(Event::DebounceFired {
            ticket: Ticket::new(ticket),
        }))
    }

    /// Hand over the fetched index JSON (already parsed by the page).
    ///
    /// A payload that isn't a document array counts as a failed load.
    #[wasm_bindgen(js_name = loadSucceeded)]
    pub fn load_succeeded(&mut self, ticket: u32, documents: JsValue) -> Result<JsValue, JsValue> {
        let ticket = Ticket::new(ticket);
        let event = match from_value::<Vec<Document>>(documents) {
            Ok(documents) => Event::LoadSucceeded { ticket, documents },
            Err(e) => Event::LoadFailed {
                ticket,
                reason: format!("malformed index: {}", e),
            },
        };
        effects(self.session.handle(event))
    }

    #[wasm_bindgen(js_name = loadFailed)]
    pub fn load_failed(&mut self, ticket: u32, reason: String) -> Result<JsValue, JsValue> {
        effects(self.session.handle(Event::LoadFailed {
            ticket: Ticket::new(ticket),
            reason,
        }))
    }

    /// Feed a `KeyboardEvent.key`. Unbound keys return no effects.
    pub fn key(&mut self, name: &str) -> Result<JsValue, JsValue> {
        match Key::from_dom_key(name) {
            Some(key) => effects(self.session.handle(Event::Key(key))),
            None => effects(Vec::new()),
        }
    }

    #[wasm_bindgen(js_name = loadMore)]
    pub fn load_more(&mut self) -> Result<JsValue, JsValue> {
        effects(self.session.handle(Event::LoadMore))
    }

    #[wasm_bindgen(js_name = selectRecent)]
    pub fn select_recent(&mut self, position: usize) -> Result<JsValue, JsValue> {
        effects(self.session.handle(Event::SelectRecent(position)))
    }

    #[wasm_bindgen(js_name = selectHistory)]
    pub fn select_history(&mut self, term: String) -> Result<JsValue, JsValue> {
        effects(self.session.handle(Event::SelectHistory(term)))
    }

    /// Render-ready snapshot (`SessionView`).
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_value(&self.session.view()).map_err(Into::into)
    }

    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }
}
