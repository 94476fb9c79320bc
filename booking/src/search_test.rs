use futures::executor::block_on;

use super::*;
use crate::fake_api::{FakeApi, date, session_with_role};

fn filled_form() -> SearchForm {
    let mut form = SearchForm::new(date("2025-06-01"));
    form.destination = "Cancún Centro".to_owned();
    form.set_party_size(Some(2));
    form
}

// =============================================================
// Room type options
// =============================================================

#[test]
fn options_follow_party_size() {
    assert_eq!(room_type_options(Some(1)), [RoomType::Simple, RoomType::Double, RoomType::Suite]);
    assert_eq!(room_type_options(Some(2)), [RoomType::Double, RoomType::Triple, RoomType::Suite]);
    for size in 3..=MAX_PARTY_SIZE {
        assert_eq!(room_type_options(Some(size)), [RoomType::Triple, RoomType::Suite]);
    }
    assert_eq!(room_type_options(None), room_type_options(Some(1)));
}

#[test]
fn party_size_change_resets_incompatible_room_type() {
    let mut form = SearchForm::new(date("2025-06-01"));
    form.room_type = Some(RoomType::Simple);
    form.set_party_size(Some(2));
    assert_eq!(form.room_type, Some(RoomType::Double));
    form.set_party_size(Some(4));
    assert_eq!(form.room_type, Some(RoomType::Triple));
}

#[test]
fn party_size_change_keeps_compatible_room_type() {
    let mut form = SearchForm::new(date("2025-06-01"));
    form.room_type = Some(RoomType::Suite);
    for size in [1, 2, 3, 10] {
        form.set_party_size(Some(size));
        assert_eq!(form.room_type, Some(RoomType::Suite));
    }
}

// =============================================================
// Validation
// =============================================================

#[test]
fn valid_form_builds_query_pairs() {
    let query = filled_form().validate().unwrap();
    assert_eq!(
        query.query_pairs(),
        [
            ("tipo", "doble".to_owned()),
            ("capacidad", "2".to_owned()),
            ("inicio", "2025-06-01".to_owned()),
            ("fin", "2025-06-06".to_owned()),
        ]
    );
}

#[test]
fn destination_must_be_letters_and_spaces() {
    let mut form = filled_form();
    form.destination = "   ".to_owned();
    assert_eq!(form.validate().unwrap_err().get("destination"), Some("This field is required."));
    form.destination = "Hotel 42".to_owned();
    assert_eq!(
        form.validate().unwrap_err().get("destination"),
        Some("Only letters and spaces are allowed.")
    );
}

#[test]
fn party_size_outside_range_is_rejected() {
    let mut form = filled_form();
    form.party_size = Some(11);
    assert!(form.validate().unwrap_err().get("party_size").is_some());
    form.party_size = None;
    assert_eq!(form.validate().unwrap_err().get("party_size"), Some("Select the number of guests."));
}

#[test]
fn room_type_not_offered_is_rejected() {
    let mut form = filled_form();
    form.room_type = Some(RoomType::Simple);
    assert!(form.validate().unwrap_err().get("room_type").is_some());
}

#[test]
fn inverted_dates_are_rejected() {
    let mut form = filled_form();
    form.start = Some(date("2025-06-10"));
    form.end = Some(date("2025-06-09"));
    assert!(form.validate().unwrap_err().get("dates").is_some());
    form.end = None;
    assert_eq!(form.validate().unwrap_err().get("dates"), Some("Select check-in and check-out dates."));
}

// =============================================================
// search_availability
// =============================================================

#[test]
fn unauthenticated_search_issues_no_request() {
    let api = FakeApi::new();
    let outcome = block_on(search_availability(&api, &Session::default(), &filled_form()));
    assert_eq!(outcome, SearchOutcome::LoginRequired);
    assert!(api.calls().is_empty());
}

#[test]
fn unauthenticated_check_precedes_validation() {
    let api = FakeApi::new();
    let outcome = block_on(search_availability(&api, &Session::default(), &SearchForm::new(date("2025-06-01"))));
    assert_eq!(outcome, SearchOutcome::LoginRequired);
}

#[test]
fn invalid_form_issues_no_request() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut form = filled_form();
    form.destination.clear();
    assert!(matches!(block_on(search_availability(&api, &session, &form)), SearchOutcome::Invalid(_)));
    assert!(api.calls().is_empty());
}

#[test]
fn matching_rooms_are_found() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let SearchOutcome::Found(results) = block_on(search_availability(&api, &session, &filled_form())) else {
        panic!("expected rooms");
    };
    assert_eq!(results.rooms.len(), 1);
    assert_eq!(results.rooms[0].id, 2);
    assert_eq!(results.range.nights(), 5);
}

#[test]
fn empty_result_is_informational() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut form = filled_form();
    form.set_party_size(Some(3));
    assert_eq!(block_on(search_availability(&api, &session, &form)), SearchOutcome::NoResults);
}

#[test]
fn repeated_failed_search_yields_same_outcome() {
    let api = FakeApi::new();
    api.fail("available_rooms");
    let session = session_with_role(None);
    let form = filled_form();
    let first = block_on(search_availability(&api, &session, &form));
    let second = block_on(search_availability(&api, &session, &form));
    assert!(matches!(first, SearchOutcome::Failed(_)));
    assert_eq!(first, second);
    assert_eq!(api.calls(), vec!["available_rooms", "available_rooms"]);
}
