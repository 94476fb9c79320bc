//! # client
//!
//! Leptos + WASM browser client for the hotel booking backend.
//!
//! Pages and components render the flows implemented in the `booking` crate;
//! `net::api::GlooApi` carries them over `gloo-net`, and `util` wraps the
//! browser surfaces (storage, downloads, the PayPal button SDK). Browser-only
//! code is gated behind the `csr` feature so the crate also builds and tests
//! natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("hotel client starting against {}", config::api_base_url());
    leptos::mount::mount_to_body(app::App);
}
