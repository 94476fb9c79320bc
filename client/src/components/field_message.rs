//! Inline validation message under a form field.

use booking::ValidationErrors;
use leptos::prelude::*;

#[component]
pub fn FieldMessage(errors: RwSignal<ValidationErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|e| e.get(field).map(str::to_owned)).map(|message| {
            view! { <p class="field__error">{message}</p> }
        })
    }
}
