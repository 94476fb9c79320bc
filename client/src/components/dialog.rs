//! Modal dialogs: the app-wide notice and the destructive-action confirmation.

use booking::Decision;
use leptos::prelude::*;

use crate::state::app::{AppState, NoticeKind};

/// Dismissible notice bound to `app.notice`.
#[component]
pub fn NoticeDialog(app: AppState) -> impl IntoView {
    let dismiss = move |_| app.notice.set(None);
    move || {
        app.notice.get().map(|notice| {
            let kind = match notice.kind {
                NoticeKind::Info => "dialog--info",
                NoticeKind::Success => "dialog--success",
                NoticeKind::Error => "dialog--error",
            };
            view! {
                <div class="dialog-backdrop" on:click=dismiss>
                    <div class=format!("dialog {kind}") role="alertdialog" on:click=move |ev| ev.stop_propagation()>
                        <h2 class="dialog__title">{notice.title}</h2>
                        <p class="dialog__message">{notice.message}</p>
                        <div class="dialog__actions">
                            <button class="btn btn--primary" on:click=dismiss>"OK"</button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

/// "Are you sure?" prompt; renders while `prompt` holds a message.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] prompt: Signal<Option<String>>,
    #[prop(default = "Yes, delete")] confirm_label: &'static str,
    on_decide: Callback<Decision>,
) -> impl IntoView {
    move || {
        prompt.get().map(|message| {
            view! {
                <div class="dialog-backdrop" on:click=move |_| on_decide.run(Decision::Dismissed)>
                    <div class="dialog dialog--warning" role="alertdialog" on:click=move |ev| ev.stop_propagation()>
                        <h2 class="dialog__title">"Are you sure?"</h2>
                        <p class="dialog__message">{message}</p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| on_decide.run(Decision::Dismissed)>
                                "Cancel"
                            </button>
                            <button class="btn btn--danger" on:click=move |_| on_decide.run(Decision::Confirmed)>
                                {confirm_label}
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
