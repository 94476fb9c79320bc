//! Public room details (`GET /cuartos/get/{id}`).

#[cfg(test)]
#[path = "room_detail_test.rs"]
mod room_detail_test;

use booking::HotelApi;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::room_card::RoomCard;
use crate::net::api::GlooApi;

/// Numeric `:id` route parameter.
pub fn route_id(raw: Option<String>) -> Option<i64> {
    raw?.trim().parse().ok().filter(|id: &i64| *id >= 0)
}

#[component]
pub fn RoomDetailPage() -> impl IntoView {
    let params = use_params_map();
    let room = LocalResource::new(move || {
        let id = route_id(params.with(|p| p.get("id")));
        async move {
            match id {
                Some(id) => Some(GlooApi::from_config().room(id).await),
                None => None,
            }
        }
    });

    view! {
        <section class="page page--room">
            <Suspense fallback=move || view! { <p class="page__loading">"Loading room..."</p> }>
                {move || {
                    room.get()
                        .map(|loaded| match loaded {
                            Some(Ok(room)) => view! { <RoomCard room/> }.into_any(),
                            Some(Err(err)) => {
                                log::warn!("room lookup failed: {err}");
                                view! { <p class="page__error">{err.user_message()}</p> }.into_any()
                            }
                            None => view! { <p class="page__error">"Unknown room."</p> }.into_any(),
                        })
                }}
            </Suspense>
            <a class="btn" href="/">"Search availability"</a>
        </section>
    }
}
