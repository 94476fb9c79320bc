//! Guest reservation list with edit and cancel actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The list is a [`ReservationBook`] held in a signal. Async operations work
//! on a copy and write it back only on success, so a failed request leaves
//! the visible list unchanged.

#[cfg(test)]
#[path = "reservations_test.rs"]
mod reservations_test;

use booking::model::format_money;
use booking::reservations::{Cancellation, ReservationBook};
use booking::{Capability, Decision, Reservation};
use leptos::prelude::*;

use crate::components::dialog::ConfirmDialog;
use crate::components::guard::RequireCapability;
use crate::net::api::GlooApi;
use crate::state::app::{AppState, Notice};

/// Display values for one row of the reservations table.
#[derive(Clone, Debug, PartialEq)]
pub struct ReservationRow {
    pub id: i64,
    pub room: String,
    pub check_in: String,
    pub check_out: String,
    pub nights: i64,
    pub total: String,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id,
            room: format!("{} {}", r.room.room_type.label(), r.room.number),
            check_in: r.start.to_string(),
            check_out: r.end.to_string(),
            nights: r.nights(),
            total: format_money(r.total()),
        }
    }
}

#[component]
pub fn ReservationsPage(app: AppState) -> impl IntoView {
    view! {
        <RequireCapability app capability=Capability::BookRooms>
            <ReservationList app/>
        </RequireCapability>
    }
}

#[component]
fn ReservationList(app: AppState) -> impl IntoView {
    let book = RwSignal::new(ReservationBook::default());
    let loading = RwSignal::new(true);
    let pending_cancel = RwSignal::new(None::<i64>);

    leptos::task::spawn_local(async move {
        let session = app.session.get_untracked();
        let mut next = ReservationBook::default();
        match next.refresh(&GlooApi::from_config(), &session).await {
            Ok(()) => book.set(next),
            Err(err) => app.fail(&err),
        }
        loading.set(false);
    });

    let select = move |id: i64| {
        let selected = book.with_untracked(|b| b.get(id).cloned());
        app.session.update(|s| s.selected_reservation = selected);
    };

    let on_decide = Callback::new(move |decision: Decision| {
        let Some(id) = pending_cancel.get_untracked() else {
            return;
        };
        pending_cancel.set(None);
        leptos::task::spawn_local(async move {
            let session = app.session.get_untracked();
            let mut next = book.get_untracked();
            match next.cancel(&GlooApi::from_config(), &session, id, decision).await {
                Ok(Cancellation::Cancelled) => {
                    book.set(next);
                    app.notify(Notice::success("Reservation cancelled", "Your reservation was cancelled."));
                }
                Ok(Cancellation::Kept) => {}
                Err(err) => app.fail(&err),
            }
        });
    });

    let prompt = Signal::derive(move || {
        pending_cancel
            .get()
            .map(|id| format!("Reservation #{id} will be cancelled. This cannot be undone."))
    });

    view! {
        <section class="page page--reservations">
            <h1>"My reservations"</h1>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Loading reservations..."</p> }>
                <Show
                    when=move || book.with(|b| !b.entries().is_empty())
                    fallback=|| view! { <p class="page__empty">"You have no reservations yet."</p> }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"#"</th>
                                <th>"Room"</th>
                                <th>"Check-in"</th>
                                <th>"Check-out"</th>
                                <th>"Nights"</th>
                                <th>"Total"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || book.with(|b| b.entries().iter().map(ReservationRow::from).collect::<Vec<_>>())
                                key=|row| (row.id, row.check_in.clone(), row.check_out.clone())
                                let:row
                            >
                                <tr>
                                    <td>{row.id}</td>
                                    <td>{row.room}</td>
                                    <td>{row.check_in}</td>
                                    <td>{row.check_out}</td>
                                    <td>{row.nights}</td>
                                    <td>{row.total}</td>
                                    <td class="table__actions">
                                        <a class="btn" href="/reservations/edit" on:click=move |_| select(row.id)>
                                            "Edit"
                                        </a>
                                        <button class="btn btn--danger" on:click=move |_| pending_cancel.set(Some(row.id))>
                                            "Cancel"
                                        </button>
                                    </td>
                                </tr>
                            </For>
                        </tbody>
                    </table>
                </Show>
            </Show>
            <ConfirmDialog prompt confirm_label="Yes, cancel it" on_decide/>
        </section>
    }
}
