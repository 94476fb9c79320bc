//! Browser storage helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`LocalStore`] backs the durable session (`localStorage`). Tab-scoped
//! drafts such as the pending checkout and the last search results live in
//! `sessionStorage` as JSON so they survive the payment provider's full-page
//! redirect but not the tab.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best-effort: a blocked or missing store reads as empty and
//! writes are dropped. Native builds always read empty.

use booking::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const SEARCH_RESULTS_KEY: &str = "searchResults";

/// `window.localStorage` as a [`KeyValueStore`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(feature = "csr")]
fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Raw `sessionStorage` value for `key`.
pub fn load_session_item(key: &str) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        session_storage()?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

/// Store a raw `sessionStorage` value.
pub fn save_session_item(key: &str, value: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = session_storage() {
            let _ = storage.set_item(key, value);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, value);
    }
}

pub fn remove_session_item(key: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = session_storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
    }
}

/// Load a JSON value from `sessionStorage` for `key`.
pub fn load_session_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    serde_json::from_str(&load_session_item(key)?).ok()
}

/// Save a JSON value to `sessionStorage` for `key`.
pub fn save_session_json<T: Serialize>(key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    save_session_item(key, &raw);
}
