use booking::model::AuthResponse;
use booking::{ApiError, MemoryStore, RoomType};
use chrono::NaiveDate;
use futures::executor::block_on;

use super::*;
use crate::state::app::NoticeKind;

fn room() -> Room {
    Room {
        id: 4,
        number: 204,
        room_type: RoomType::Double,
        capacity: 2,
        price_per_night: 850.0,
        description: "Garden view".to_owned(),
        image_url: String::new(),
    }
}

fn stay() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
        NaiveDate::from_ymd_opt(2026, 11, 5).unwrap(),
    )
    .unwrap()
}

#[test]
fn reserving_requires_sign_in() {
    let api = GlooApi::new("http://localhost:8080");
    let result = block_on(reserve_room(&api, &Session::default(), &room(), stay()));
    assert_eq!(result, Err(BookingError::LoginRequired));
}

#[test]
fn reserve_surfaces_transport_failure() {
    let api = GlooApi::new("http://localhost:8080");
    let mut session = Session::default();
    session.login(&MemoryStore::default(), AuthResponse { token: "tok".to_owned(), name: None, role: None });
    let result = block_on(reserve_room(&api, &session, &room(), stay()));
    assert!(matches!(result, Err(BookingError::Api(ApiError::Transport(_)))));
}

#[test]
fn reserved_notice_names_room_and_dates() {
    let notice = reserved_notice(&room(), stay());
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.title, "Reservation created");
    assert_eq!(notice.message, "Room 204 is reserved from 2026-11-02 to 2026-11-05.");
}
