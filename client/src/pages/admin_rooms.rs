//! Admin room console: every room with today's occupancy and actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads through [`RoomConsole`]; occupancy is fetched after the list, one
//! room at a time, and cells read "Checking..." until their lookup ends.
//! Each result is merged into the live list, so a room deleted while its
//! lookup is in flight stays deleted.

#[cfg(test)]
#[path = "admin_rooms_test.rs"]
mod admin_rooms_test;

use booking::admin::{Deletion, Occupancy, RoomConsole, lookup_occupancy};
use booking::model::format_money;
use booking::{Capability, Decision};
use leptos::prelude::*;

use crate::components::dialog::ConfirmDialog;
use crate::components::guard::RequireCapability;
use crate::net::api::GlooApi;
use crate::state::app::{AppState, Notice};
use crate::util::today;

/// Text and CSS modifier for an occupancy cell.
fn occupancy_badge(state: Option<Occupancy>) -> (&'static str, &'static str) {
    match state {
        None => ("Checking...", "badge--pending"),
        Some(Occupancy::Occupied) => (Occupancy::Occupied.label(), "badge--occupied"),
        Some(Occupancy::Available) => (Occupancy::Available.label(), "badge--available"),
        Some(Occupancy::Unknown) => (Occupancy::Unknown.label(), "badge--error"),
    }
}

#[component]
pub fn AdminRoomsPage(app: AppState) -> impl IntoView {
    view! {
        <RequireCapability app capability=Capability::ManageRooms>
            <RoomTable app/>
        </RequireCapability>
    }
}

#[component]
fn RoomTable(app: AppState) -> impl IntoView {
    let console = RwSignal::new(RoomConsole::default());
    let loading = RwSignal::new(true);
    let pending_delete = RwSignal::new(None::<(i64, i64)>);

    leptos::task::spawn_local(async move {
        let api = GlooApi::from_config();
        let session = app.session.get_untracked();
        let mut loaded = RoomConsole::default();
        if let Err(err) = loaded.load(&api, &session).await {
            loading.set(false);
            app.fail(&err);
            return;
        }
        let ids = loaded.room_ids();
        console.set(loaded);
        loading.set(false);
        let day = today();
        for id in ids {
            match lookup_occupancy(&api, &session, id, day).await {
                Ok(state) => {
                    console.update(|c| {
                        c.record_occupancy(id, state);
                    });
                }
                Err(err) => {
                    app.fail(&err);
                    return;
                }
            }
        }
    });

    let on_decide = Callback::new(move |decision: Decision| {
        let Some((id, number)) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        leptos::task::spawn_local(async move {
            let session = app.session.get_untracked();
            let mut snapshot = console.get_untracked();
            match snapshot.delete(&GlooApi::from_config(), &session, id, decision).await {
                Ok(Deletion::Deleted) => {
                    console.update(|c| c.forget(id));
                    app.notify(Notice::success("Room deleted", format!("Room {number} was deleted.")));
                }
                Ok(Deletion::Kept) => {}
                Err(err) => app.fail(&err),
            }
        });
    });

    let prompt = Signal::derive(move || {
        pending_delete
            .get()
            .map(|(_, number)| format!("Room {number} will be deleted. This cannot be undone."))
    });

    view! {
        <section class="page page--admin-rooms">
            <header class="page__header">
                <h1>"Rooms"</h1>
                <a class="btn btn--primary" href="/admin/rooms/new">"New room"</a>
            </header>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Loading rooms..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Number"</th>
                            <th>"Type"</th>
                            <th>"Capacity"</th>
                            <th>"Price / night"</th>
                            <th>"Today"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || console.with(|c| c.rooms().to_vec())
                            key=|room| room.id
                            let:room
                        >
                            {
                                let id = room.id;
                                let number = room.number;
                                let badge = move || occupancy_badge(console.with(|c| c.occupancy(id)));
                                view! {
                                    <tr>
                                        <td>{room.number}</td>
                                        <td>{room.room_type.label()}</td>
                                        <td>{room.capacity}</td>
                                        <td>{format_money(room.price_per_night)}</td>
                                        <td>
                                            <span class=move || format!("badge {}", badge().1)>{move || badge().0}</span>
                                        </td>
                                        <td class="table__actions">
                                            <a class="btn" href=format!("/admin/rooms/{id}")>"View"</a>
                                            <a class="btn" href=format!("/admin/rooms/{id}/edit")>"Edit"</a>
                                            <button
                                                class="btn btn--danger"
                                                on:click=move |_| pending_delete.set(Some((id, number)))
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        </For>
                    </tbody>
                </table>
            </Show>
            <ConfirmDialog prompt on_decide/>
        </section>
    }
}
