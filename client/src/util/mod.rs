//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, downloads, the payment
//! widget SDK) from page and component logic.

pub mod download;
pub mod paypal;
pub mod storage;

use chrono::NaiveDate;

/// Today's date in the browser's local timezone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Navigate the whole page to an external URL (payment provider checkout).
pub fn redirect_to(url: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = url;
    }
}
