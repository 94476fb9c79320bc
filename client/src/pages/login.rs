//! Sign-in and registration page.
//!
//! Registration does not sign the user in; on success the form switches to
//! sign-in mode with the email kept.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use booking::model::{Credentials, Registration};
use booking::{BookingError, HotelApi, Role, ValidationErrors};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::field_message::FieldMessage;
use crate::net::api::GlooApi;
use crate::state::app::{AppState, Notice};
use crate::util::storage::LocalStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    Register,
}

/// Validated auth form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthRequest {
    SignIn(Credentials),
    Register(Registration),
}

fn validate_auth_form(mode: AuthMode, email: &str, password: &str, name: &str) -> Result<AuthRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let email = email.trim();
    if email.is_empty() {
        errors.push("email", "This field is required.");
    } else if !email.contains('@') {
        errors.push("email", "Enter a valid email address.");
    }
    if password.is_empty() {
        errors.push("password", "This field is required.");
    }
    let name = name.trim();
    if mode == AuthMode::Register && name.is_empty() {
        errors.push("name", "This field is required.");
    }
    let credentials = Credentials { email: email.to_owned(), password: password.to_owned() };
    errors.into_result(match mode {
        AuthMode::SignIn => AuthRequest::SignIn(credentials),
        AuthMode::Register => AuthRequest::Register(Registration {
            email: credentials.email,
            password: credentials.password,
            name: name.to_owned(),
        }),
    })
}

/// Where a freshly signed-in user lands.
fn landing_for(role: Role) -> &'static str {
    match role {
        Role::Guest => "/",
        Role::Admin => "/admin/rooms",
        Role::Analyst => "/analyst",
    }
}

fn sign_in_error(err: BookingError) -> BookingError {
    match err {
        BookingError::Api(api) if api.is_unauthorized() => {
            BookingError::Api(booking::ApiError::Status { status: 401, message: "Invalid email or password.".to_owned() })
        }
        other => other,
    }
}

#[component]
pub fn LoginPage(app: AppState) -> impl IntoView {
    let navigate = use_navigate();
    let mode = RwSignal::new(AuthMode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let request = match validate_auth_form(
            mode.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &name.get_untracked(),
        ) {
            Ok(request) => request,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(ValidationErrors::default());
        busy.set(true);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let api = GlooApi::from_config();
            match request {
                AuthRequest::SignIn(credentials) => match api.login(&credentials).await {
                    Ok(auth) => {
                        let mut role = Role::Guest;
                        app.session.update(|s| role = s.login(&LocalStore, auth).role);
                        password.set(String::new());
                        navigate(landing_for(role), NavigateOptions::default());
                    }
                    Err(err) => app.fail(&sign_in_error(err.into())),
                },
                AuthRequest::Register(registration) => match api.register(&registration).await {
                    Ok(()) => {
                        log::info!("registered a new account");
                        password.set(String::new());
                        mode.set(AuthMode::SignIn);
                        app.notify(Notice::success("Account created", "You can now sign in."));
                    }
                    Err(err) => app.fail(&err.into()),
                },
            }
            busy.set(false);
        });
    };

    let toggle_mode = move |_| {
        errors.set(ValidationErrors::default());
        mode.update(|m| {
            *m = match m {
                AuthMode::SignIn => AuthMode::Register,
                AuthMode::Register => AuthMode::SignIn,
            };
        });
    };
    let registering = move || mode.get() == AuthMode::Register;

    view! {
        <section class="page page--login">
            <form class="auth-card" on:submit=on_submit novalidate=true>
                <h1>{move || if registering() { "Create account" } else { "Sign in" }}</h1>
                <Show when=registering>
                    <label class="field">
                        <span class="field__label">"Name"</span>
                        <input
                            class="field__input"
                            type="text"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                        <FieldMessage errors field="name"/>
                    </label>
                </Show>
                <label class="field">
                    <span class="field__label">"Email"</span>
                    <input
                        class="field__input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldMessage errors field="email"/>
                </label>
                <label class="field">
                    <span class="field__label">"Password"</span>
                    <input
                        class="field__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <FieldMessage errors field="password"/>
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if registering() { "Register" } else { "Sign in" }}
                </button>
                <button class="btn btn--link" type="button" on:click=toggle_mode>
                    {move || if registering() { "Already have an account? Sign in" } else { "New here? Create an account" }}
                </button>
            </form>
        </section>
    }
}
