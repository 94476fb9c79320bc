//! Availability results for the last search.
//!
//! Choosing a room stores a [`CheckoutDraft`] in `sessionStorage` and opens
//! the checkout page. "Reserve" books the room directly, with no payment
//! step.

#[cfg(test)]
#[path = "results_test.rs"]
mod results_test;

use booking::checkout::{CHECKOUT_DRAFT_KEY, CheckoutDraft};
use booking::model::format_money;
use booking::reservations::ReservationBook;
use booking::search::SearchResults;
use booking::{BookingError, DateRange, HotelApi, Room, Session};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::room_card::RoomCard;
use crate::net::api::GlooApi;
use crate::state::app::{AppState, Notice};
use crate::util::storage;

/// Create a reservation for `room` over `range` without a payment.
async fn reserve_room<A: HotelApi>(
    api: &A,
    session: &Session,
    room: &Room,
    range: DateRange,
) -> Result<(), BookingError> {
    ReservationBook::default().create(api, session, room.id, range).await
}

fn reserved_notice(room: &Room, range: DateRange) -> Notice {
    Notice::success(
        "Reservation created",
        format!("Room {} is reserved from {} to {}.", room.number, range.start(), range.end()),
    )
}

#[component]
pub fn ResultsPage(app: AppState) -> impl IntoView {
    view! {
        <section class="page page--results">
            <h1>"Available rooms"</h1>
            {move || match app.search_results.get() {
                Some(results) => view! { <ResultList app results/> }.into_any(),
                None => view! {
                    <p class="page__empty">"No search yet. " <a href="/">"Search for a room"</a></p>
                }
                .into_any(),
            }}
        </section>
    }
}

#[component]
fn ResultList(app: AppState, results: SearchResults) -> impl IntoView {
    let navigate = use_navigate();
    let range = results.range;
    let nights = range.nights();

    let items = results
        .rooms
        .into_iter()
        .map(|room| {
            #[allow(clippy::cast_precision_loss)]
            let total = format_money(room.price_per_night * nights as f64);
            let draft = CheckoutDraft::new(room.clone(), range);
            let to_checkout = navigate.clone();
            let choose = move |_| {
                log::info!("checkout started for room {}", draft.room.id);
                storage::save_session_item(CHECKOUT_DRAFT_KEY, &draft.to_json());
                to_checkout("/checkout", NavigateOptions::default());
            };
            let reserved = room.clone();
            let to_list = navigate.clone();
            let reserve = move |_| {
                let room = reserved.clone();
                let navigate = to_list.clone();
                leptos::task::spawn_local(async move {
                    let session = app.session.get_untracked();
                    match reserve_room(&GlooApi::from_config(), &session, &room, range).await {
                        Ok(()) => {
                            app.notify(reserved_notice(&room, range));
                            navigate("/reservations", NavigateOptions::default());
                        }
                        Err(err) => app.fail(&err),
                    }
                });
            };
            view! {
                <div class="results__item">
                    <RoomCard room/>
                    <div class="results__actions">
                        <span class="results__total">"Stay total: "{total}</span>
                        <button class="btn btn--primary" on:click=choose>"Book this room"</button>
                        <button class="btn" on:click=reserve>"Reserve"</button>
                    </div>
                </div>
            }
        })
        .collect_view();

    view! {
        <p class="results__summary">{format!("{} to {} · {nights} night(s)", range.start(), range.end())}</p>
        <div class="room-grid">{items}</div>
    }
}
