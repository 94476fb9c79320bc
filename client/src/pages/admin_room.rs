//! Admin view of one room (`GET /cuartos/{id}`).

use booking::Capability;
use booking::admin::view_room;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::guard::RequireCapability;
use crate::components::room_card::RoomCard;
use crate::net::api::GlooApi;
use crate::pages::room_detail::route_id;
use crate::state::app::AppState;

#[component]
pub fn AdminRoomPage(app: AppState) -> impl IntoView {
    view! {
        <RequireCapability app capability=Capability::ManageRooms>
            <AdminRoomView app/>
        </RequireCapability>
    }
}

#[component]
fn AdminRoomView(app: AppState) -> impl IntoView {
    let params = use_params_map();
    let room = LocalResource::new(move || {
        let id = route_id(params.with(|p| p.get("id")));
        let session = app.session.get();
        async move {
            match id {
                Some(id) => Some(view_room(&GlooApi::from_config(), &session, id).await),
                None => None,
            }
        }
    });

    view! {
        <section class="page page--admin-room">
            <Suspense fallback=move || view! { <p class="page__loading">"Loading room..."</p> }>
                {move || {
                    room.get()
                        .map(|loaded| match loaded {
                            Some(Ok(room)) => {
                                let edit = format!("/admin/rooms/{}/edit", room.id);
                                view! {
                                    <RoomCard room/>
                                    <div class="form__actions">
                                        <a class="btn" href="/admin/rooms">"Back"</a>
                                        <a class="btn btn--primary" href=edit>"Edit"</a>
                                    </div>
                                }
                                .into_any()
                            }
                            Some(Err(err)) => {
                                log::warn!("admin room lookup failed: {err}");
                                view! { <p class="page__error">{err.user_message()}</p> }.into_any()
                            }
                            None => view! { <p class="page__error">"Unknown room."</p> }.into_any(),
                        })
                }}
            </Suspense>
        </section>
    }
}
