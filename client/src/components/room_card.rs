//! Card summarizing one room, used by the featured list and room details.

use booking::Room;
use booking::model::format_money;
use leptos::prelude::*;

pub const FALLBACK_IMAGE: &str = "/img/default-room.jpg";

#[component]
pub fn RoomCard(room: Room, #[prop(optional)] href: Option<String>) -> impl IntoView {
    let image = if room.image_url.trim().is_empty() { FALLBACK_IMAGE.to_owned() } else { room.image_url.clone() };
    let title = format!("{} room {}", room.room_type.label(), room.number);
    let guests = if room.capacity == 1 { "1 guest".to_owned() } else { format!("{} guests", room.capacity) };
    view! {
        <article class="room-card">
            <img class="room-card__image" src=image alt=title.clone()/>
            <div class="room-card__body">
                <h3 class="room-card__title">{title}</h3>
                <p class="room-card__meta">{guests}" · "{format_money(room.price_per_night)}" / night"</p>
                <p class="room-card__description">{room.description}</p>
                {href.map(|href| view! { <a class="btn btn--primary" href=href>"View room"</a> })}
            </div>
        </article>
    }
}
