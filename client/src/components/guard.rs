//! Route guard applying the capability check to a whole page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every gated page wraps its body in [`RequireCapability`] so the redirect
//! and permission-denied behavior is identical across routes: no identity
//! sends the user to `/login`, a role without the capability sees a static
//! notice, and neither case renders the page body (so it issues no requests).

use booking::{Access, Capability};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::app::AppState;

#[component]
pub fn RequireCapability(app: AppState, capability: Capability, children: ChildrenFn) -> impl IntoView {
    let access = Memo::new(move |_| app.session.with(|s| s.access(capability)));

    let navigate = use_navigate();
    Effect::new(move || {
        if access.get() == Access::LoginRequired {
            navigate("/login", NavigateOptions::default());
        }
    });

    move || match access.get() {
        Access::Granted => children().into_any(),
        Access::LoginRequired => view! { <p class="page__empty">"Redirecting to sign in..."</p> }.into_any(),
        Access::Denied => view! {
            <section class="page page--denied">
                <h1>"Permission denied"</h1>
                <p>"You do not have permission to view this page."</p>
                <a class="btn" href="/">"Back to home"</a>
            </section>
        }
        .into_any(),
    }
}
