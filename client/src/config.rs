//! Build-time client configuration.
//!
//! The backend base URL is baked in at compile time from `HOTEL_API_URL`
//! (the browser has no process environment to read at runtime).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Base URL of the REST backend, without a trailing slash.
pub fn api_base_url() -> String {
    normalize_base_url(option_env!("HOTEL_API_URL"))
}

fn normalize_base_url(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_API_URL);
    trimmed.trim_end_matches('/').to_owned()
}
