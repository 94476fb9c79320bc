//! Change the dates of the reservation selected on the list page.
//!
//! The selection lives on the session and is not persisted, so a reload
//! lands on the "nothing selected" view.

#[cfg(test)]
#[path = "edit_reservation_test.rs"]
mod edit_reservation_test;

use booking::model::parse_date;
use booking::reservations::ReservationBook;
use booking::{Capability, DateRange, Reservation, ValidationErrors};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::field_message::FieldMessage;
use crate::components::guard::RequireCapability;
use crate::net::api::GlooApi;
use crate::state::app::{AppState, Notice};

/// Parse the two date inputs into a range.
fn parse_range(start: &str, end: &str) -> Result<DateRange, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    match (parse_date(start), parse_date(end)) {
        (Some(start), Some(end)) => match DateRange::new(start, end) {
            Ok(range) => return Ok(range),
            Err(err) => errors.push(err.field, err.message),
        },
        _ => errors.push("dates", "Choose both dates."),
    }
    Err(errors)
}

#[component]
pub fn EditReservationPage(app: AppState) -> impl IntoView {
    view! {
        <RequireCapability app capability=Capability::BookRooms>
            {move || match app.session.with_untracked(|s| s.selected_reservation.clone()) {
                Some(reservation) => view! { <EditForm app reservation/> }.into_any(),
                None => view! {
                    <section class="page">
                        <p class="page__empty">"No reservation selected. " <a href="/reservations">"Back to my reservations"</a></p>
                    </section>
                }
                .into_any(),
            }}
        </RequireCapability>
    }
}

#[component]
fn EditForm(app: AppState, reservation: Reservation) -> impl IntoView {
    let navigate = use_navigate();
    let start = RwSignal::new(reservation.start.to_string());
    let end = RwSignal::new(reservation.end.to_string());
    let errors = RwSignal::new(ValidationErrors::default());
    let busy = RwSignal::new(false);
    let id = reservation.id;
    let heading = format!("Reservation #{id} · {} {}", reservation.room.room_type.label(), reservation.room.number);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let range = match parse_range(&start.get_untracked(), &end.get_untracked()) {
            Ok(range) => range,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(ValidationErrors::default());
        busy.set(true);
        let navigate = navigate.clone();
        let reservation = reservation.clone();
        leptos::task::spawn_local(async move {
            let session = app.session.get_untracked();
            let mut book = ReservationBook::new(vec![reservation]);
            match book.edit(&GlooApi::from_config(), &session, id, range).await {
                Ok(message) => {
                    app.session.update(|s| s.selected_reservation = None);
                    app.notify(Notice::success("Reservation updated", message));
                    navigate("/reservations", NavigateOptions::default());
                }
                Err(err) => app.fail(&err),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="page page--edit-reservation">
            <h1>"Change dates"</h1>
            <p class="page__subtitle">{heading}</p>
            <form class="form" on:submit=on_submit novalidate=true>
                <label class="field">
                    <span class="field__label">"Check-in"</span>
                    <input
                        class="field__input"
                        type="date"
                        prop:value=move || start.get()
                        on:input=move |ev| start.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field__label">"Check-out"</span>
                    <input
                        class="field__input"
                        type="date"
                        prop:value=move || end.get()
                        on:input=move |ev| end.set(event_target_value(&ev))
                    />
                    <FieldMessage errors field="dates"/>
                </label>
                <div class="form__actions">
                    <a class="btn" href="/reservations">"Back"</a>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Save changes"
                    </button>
                </div>
            </form>
        </section>
    }
}
