//! Landing page: availability search form and featured rooms.
//!
//! SYSTEM CONTEXT
//! ==============
//! Submitting the form runs `booking::search::search_availability`. Found
//! rooms are stored on the app state and shown by the results page; a
//! signed-out user is sent to login before any request is made.

use booking::model::parse_date;
use booking::search::{MAX_PARTY_SIZE, SearchForm, SearchOutcome, search_availability};
use booking::{BookingError, HotelApi, ValidationErrors};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::field_message::FieldMessage;
use crate::components::room_card::RoomCard;
use crate::net::api::GlooApi;
use crate::state::app::{AppState, Notice};
use crate::util::today;

#[component]
pub fn HomePage(app: AppState) -> impl IntoView {
    view! {
        <section class="page page--home">
            <header class="hero">
                <h1>"Find your room"</h1>
                <p>"Search availability by dates, guests and room type."</p>
            </header>
            <SearchPanel app/>
            <FeaturedRooms/>
        </section>
    }
}

#[component]
fn SearchPanel(app: AppState) -> impl IntoView {
    let navigate = use_navigate();
    let form = RwSignal::new(SearchForm::new(today()));
    let errors = RwSignal::new(ValidationErrors::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        let session = app.session.get_untracked();
        let navigate = navigate.clone();
        busy.set(true);
        leptos::task::spawn_local(async move {
            let outcome = search_availability(&GlooApi::from_config(), &session, &current).await;
            busy.set(false);
            errors.set(ValidationErrors::default());
            match outcome {
                SearchOutcome::LoginRequired => {
                    app.notify(Notice::info("Sign in required", "Sign in to search for available rooms."));
                    navigate("/login", NavigateOptions::default());
                }
                SearchOutcome::Invalid(invalid) => errors.set(invalid),
                SearchOutcome::NoResults => app.notify(Notice::info(
                    "No rooms available",
                    "No rooms match your search. Try other dates or another room type.",
                )),
                SearchOutcome::Found(results) => {
                    app.set_search_results(Some(results));
                    navigate("/results", NavigateOptions::default());
                }
                SearchOutcome::Failed(err) => app.fail(&BookingError::Api(err)),
            }
        });
    };

    let date_value = move |pick: fn(&SearchForm) -> Option<chrono::NaiveDate>| {
        move || form.with(|f| pick(f).map(|d| d.to_string()).unwrap_or_default())
    };

    view! {
        <form class="search-form" on:submit=on_submit novalidate=true>
            <label class="field">
                <span class="field__label">"Destination"</span>
                <input
                    class="field__input"
                    type="text"
                    placeholder="City"
                    prop:value=move || form.with(|f| f.destination.clone())
                    on:input=move |ev| form.update(|f| f.destination = event_target_value(&ev))
                />
                <FieldMessage errors field="destination"/>
            </label>
            <label class="field">
                <span class="field__label">"Guests"</span>
                <select
                    class="field__input"
                    on:change=move |ev| form.update(|f| f.set_party_size(event_target_value(&ev).parse().ok()))
                >
                    <option value="" selected=move || form.with(|f| f.party_size.is_none())>"Select"</option>
                    {(1..=MAX_PARTY_SIZE)
                        .map(|n| {
                            view! {
                                <option value=n.to_string() selected=move || form.with(|f| f.party_size == Some(n))>
                                    {n.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <FieldMessage errors field="party_size"/>
            </label>
            <label class="field">
                <span class="field__label">"Room type"</span>
                <select
                    class="field__input"
                    on:change=move |ev| form.update(|f| f.room_type = booking::RoomType::parse(&event_target_value(&ev)))
                >
                    {move || {
                        form.with(SearchForm::room_type_options)
                            .iter()
                            .map(|t| {
                                let t = *t;
                                view! {
                                    <option value=t.as_str() selected=move || form.with(|f| f.room_type == Some(t))>
                                        {t.label()}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
                <FieldMessage errors field="room_type"/>
            </label>
            <label class="field">
                <span class="field__label">"Check-in"</span>
                <input
                    class="field__input"
                    type="date"
                    prop:value=date_value(|f| f.start)
                    on:input=move |ev| form.update(|f| f.start = parse_date(&event_target_value(&ev)))
                />
            </label>
            <label class="field">
                <span class="field__label">"Check-out"</span>
                <input
                    class="field__input"
                    type="date"
                    prop:value=date_value(|f| f.end)
                    on:input=move |ev| form.update(|f| f.end = parse_date(&event_target_value(&ev)))
                />
                <FieldMessage errors field="dates"/>
            </label>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Searching..." } else { "Search" }}
            </button>
        </form>
    }
}

#[component]
fn FeaturedRooms() -> impl IntoView {
    let rooms = LocalResource::new(|| async { GlooApi::from_config().list_rooms().await });

    view! {
        <section class="featured">
            <h2>"Featured rooms"</h2>
            <Suspense fallback=move || view! { <p class="page__loading">"Loading rooms..."</p> }>
                {move || {
                    rooms
                        .get()
                        .map(|result| match result {
                            Ok(rooms) if rooms.is_empty() => {
                                view! { <p class="page__empty">"No rooms to show yet."</p> }.into_any()
                            }
                            Ok(rooms) => view! {
                                <div class="room-grid">
                                    {rooms
                                        .into_iter()
                                        .map(|room| {
                                            let href = format!("/rooms/{}", room.id);
                                            view! { <RoomCard room href/> }
                                        })
                                        .collect_view()}
                                </div>
                            }
                            .into_any(),
                            Err(err) => {
                                log::warn!("featured rooms failed: {err}");
                                view! { <p class="page__error">{err.user_message()}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}
