//! Fallback for unknown routes.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="page page--not-found">
            <h1>"Page not found"</h1>
            <a class="btn" href="/">"Back to home"</a>
        </section>
    }
}
