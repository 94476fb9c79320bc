//! Top navigation bar with role-appropriate links.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use booking::Role;
use leptos::prelude::*;

use crate::state::app::{AppState, Notice};

/// One link in the navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub href: &'static str,
}

const fn entry(label: &'static str, href: &'static str) -> NavEntry {
    NavEntry { label, href }
}

/// Links shown for a role; `None` means signed out.
pub fn nav_entries(role: Option<Role>) -> Vec<NavEntry> {
    let mut entries = vec![entry("Home", "/")];
    match role {
        None => entries.push(entry("Sign in", "/login")),
        Some(Role::Guest) => entries.push(entry("My reservations", "/reservations")),
        Some(Role::Admin) => {
            entries.push(entry("Rooms", "/admin/rooms"));
            entries.push(entry("New room", "/admin/rooms/new"));
        }
        Some(Role::Analyst) => {
            entries.push(entry("Reservations report", "/analyst"));
            entries.push(entry("Charts", "/analyst/charts"));
        }
    }
    entries
}

#[component]
pub fn Nav(app: AppState) -> impl IntoView {
    let role = move || app.session.with(booking::Session::role);
    let greeting = move || app.session.with(|s| s.display_name().map(|n| format!("Hi, {n}")));

    let on_logout = move |_| {
        app.logout();
        app.notify(Notice::info("Signed out", "You have been signed out."));
    };

    view! {
        <nav class="nav">
            <a class="nav__brand" href="/">"Hotel"</a>
            <ul class="nav__links">
                {move || {
                    nav_entries(role())
                        .into_iter()
                        .map(|e| view! { <li><a class="nav__link" href=e.href>{e.label}</a></li> })
                        .collect_view()
                }}
            </ul>
            <Show when=move || role().is_some()>
                <span class="nav__user">{greeting}</span>
                <a class="btn btn--ghost" href="/" on:click=on_logout>"Sign out"</a>
            </Show>
        </nav>
    }
}
