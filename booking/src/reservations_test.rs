use futures::executor::block_on;

use super::*;
use crate::fake_api::{FakeApi, date, session_with_role};

fn stay(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end)).unwrap()
}

fn seeded(api: &FakeApi, session: &Session) -> ReservationBook {
    let mut book = ReservationBook::default();
    block_on(book.create(api, session, 1, stay("2025-07-01", "2025-07-04"))).unwrap();
    block_on(book.create(api, session, 2, stay("2025-08-10", "2025-08-12"))).unwrap();
    book
}

// =============================================================
// Auth gate
// =============================================================

#[test]
fn every_operation_requires_a_token() {
    let api = FakeApi::new();
    let session = Session::default();
    let mut book = ReservationBook::default();
    let range = stay("2025-07-01", "2025-07-02");

    assert_eq!(block_on(book.refresh(&api, &session)), Err(BookingError::LoginRequired));
    assert_eq!(block_on(book.create(&api, &session, 1, range)), Err(BookingError::LoginRequired));
    assert_eq!(block_on(book.edit(&api, &session, 1, range)), Err(BookingError::LoginRequired));
    assert_eq!(
        block_on(book.cancel(&api, &session, 1, Decision::Confirmed)),
        Err(BookingError::LoginRequired)
    );
    assert!(api.calls().is_empty());
}

// =============================================================
// Create / refresh
// =============================================================

#[test]
fn create_appends_echoed_reservation() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let book = seeded(&api, &session);
    assert_eq!(book.entries().len(), 2);
    assert_eq!(book.entries()[0].room.id, 1);
    assert_eq!(book.entries()[0].nights(), 3);
    assert!((book.entries()[0].total() - 1500.0).abs() < f64::EPSILON);
}

#[test]
fn create_without_echo_refetches_list() {
    let api = FakeApi::new();
    api.echo_created.set(false);
    let session = session_with_role(None);
    let mut book = ReservationBook::default();
    block_on(book.create(&api, &session, 3, stay("2025-07-01", "2025-07-02"))).unwrap();
    assert_eq!(api.calls(), vec!["create_reservation", "my_reservations"]);
    assert_eq!(book.entries().len(), 1);
}

#[test]
fn failed_refresh_keeps_previous_list() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut book = seeded(&api, &session);
    api.fail("my_reservations");
    assert!(matches!(block_on(book.refresh(&api, &session)), Err(BookingError::Api(_))));
    assert_eq!(book.entries().len(), 2);
}

#[test]
fn refresh_recovers_after_backend_failure() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut book = seeded(&api, &session);
    api.fail("my_reservations");
    assert!(block_on(book.refresh(&api, &session)).is_err());
    api.recover("my_reservations");
    block_on(book.refresh(&api, &session)).unwrap();
    assert_eq!(book.entries().len(), 2);
}

#[test]
fn create_succeeds_when_refetch_fails() {
    let api = FakeApi::new();
    api.echo_created.set(false);
    api.fail("my_reservations");
    let session = session_with_role(None);
    let mut book = ReservationBook::default();
    assert_eq!(block_on(book.create(&api, &session, 3, stay("2025-07-01", "2025-07-02"))), Ok(()));
    assert!(book.entries().is_empty());
    assert_eq!(api.reservations.borrow().len(), 1);
}

// =============================================================
// Edit
// =============================================================

#[test]
fn edit_replaces_dates_of_one_entry() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut book = seeded(&api, &session);
    let id = book.entries()[0].id;
    let message = block_on(book.edit(&api, &session, id, stay("2025-07-02", "2025-07-06"))).unwrap();
    assert_eq!(message, "Reservation updated");
    let entry = book.get(id).unwrap();
    assert_eq!((entry.start, entry.end), (date("2025-07-02"), date("2025-07-06")));
    assert_eq!(book.entries()[1].start, date("2025-08-10"));
}

#[test]
fn failed_edit_leaves_list_untouched() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut book = seeded(&api, &session);
    let before = book.clone();
    api.fail("update_reservation");
    let id = book.entries()[0].id;
    assert!(block_on(book.edit(&api, &session, id, stay("2025-09-01", "2025-09-02"))).is_err());
    assert_eq!(book, before);
}

// =============================================================
// Cancel
// =============================================================

#[test]
fn dismissed_cancel_sends_nothing() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut book = seeded(&api, &session);
    let calls_before = api.calls().len();
    let id = book.entries()[0].id;
    assert_eq!(block_on(book.cancel(&api, &session, id, Decision::Dismissed)), Ok(Cancellation::Kept));
    assert_eq!(api.calls().len(), calls_before);
    assert_eq!(book.entries().len(), 2);
}

#[test]
fn confirmed_cancel_removes_exactly_one_entry() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut book = seeded(&api, &session);
    let id = book.entries()[0].id;
    assert_eq!(block_on(book.cancel(&api, &session, id, Decision::Confirmed)), Ok(Cancellation::Cancelled));
    assert_eq!(book.entries().len(), 1);
    assert!(book.get(id).is_none());
}

#[test]
fn failed_cancel_keeps_entry() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut book = seeded(&api, &session);
    api.fail("cancel_reservation");
    let id = book.entries()[0].id;
    assert!(block_on(book.cancel(&api, &session, id, Decision::Confirmed)).is_err());
    assert!(book.get(id).is_some());
}

// =============================================================
// Listing round trip
// =============================================================

#[test]
fn created_reservation_is_listed_until_cancelled() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut book = ReservationBook::default();
    block_on(book.create(&api, &session, 2, stay("2025-09-01", "2025-09-03"))).unwrap();
    let id = book.entries()[0].id;

    let mut listed = ReservationBook::default();
    block_on(listed.refresh(&api, &session)).unwrap();
    assert!(listed.get(id).is_some());

    block_on(book.cancel(&api, &session, id, Decision::Confirmed)).unwrap();

    let mut relisted = ReservationBook::default();
    block_on(relisted.refresh(&api, &session)).unwrap();
    assert!(relisted.get(id).is_none());
    assert!(relisted.entries().is_empty());
}
