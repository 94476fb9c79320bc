//! Application-wide reactive state handed explicitly to every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds one [`AppState`] and passes it down as a prop; nothing reads
//! identity from an ambient context. The session signal is written only by
//! login and logout.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use booking::checkout::CHECKOUT_DRAFT_KEY;
use booking::search::SearchResults;
use booking::{BookingError, Session};
use leptos::prelude::*;

use crate::util::storage::{self, LocalStore};

/// Severity of a dismissible notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A dismissible dialog message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, title: title.into(), message: message.into() }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, title: title.into(), message: message.into() }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, title: title.into(), message: message.into() }
    }

    /// Dialog for a failed flow; paid-but-not-booked gets its own title.
    pub fn from_error(err: &BookingError) -> Self {
        let title = match err {
            BookingError::PaidNotBooked { .. } => "Payment received, reservation pending",
            BookingError::Invalid(_) => "Check the form",
            BookingError::LoginRequired => "Sign in required",
            BookingError::Forbidden => "Permission denied",
            _ => "Something went wrong",
        };
        Self::error(title, err.user_message())
    }
}

/// Signals shared by all pages.
#[derive(Clone, Copy)]
pub struct AppState {
    pub session: RwSignal<Session>,
    pub notice: RwSignal<Option<Notice>>,
    /// Last successful availability search, shown on the results page.
    pub search_results: RwSignal<Option<SearchResults>>,
}

impl AppState {
    /// Restore the persisted identity and any pending results.
    pub fn load() -> Self {
        Self {
            session: RwSignal::new(Session::load(&LocalStore)),
            notice: RwSignal::new(None),
            search_results: RwSignal::new(storage::load_session_json(storage::SEARCH_RESULTS_KEY)),
        }
    }

    pub fn notify(&self, notice: Notice) {
        self.notice.set(Some(notice));
    }

    pub fn fail(&self, err: &BookingError) {
        log::warn!("flow failed: {err}");
        self.notify(Notice::from_error(err));
    }

    pub fn set_search_results(&self, results: Option<SearchResults>) {
        match &results {
            Some(r) => storage::save_session_json(storage::SEARCH_RESULTS_KEY, r),
            None => storage::remove_session_item(storage::SEARCH_RESULTS_KEY),
        }
        self.search_results.set(results);
    }

    /// Clear the identity, any tab-scoped drafts, and durable storage.
    pub fn logout(&self) {
        self.session.update(|s| s.logout(&LocalStore));
        storage::remove_session_item(CHECKOUT_DRAFT_KEY);
        self.set_search_results(None);
    }
}
