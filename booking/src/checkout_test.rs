use futures::executor::block_on;

use super::*;
use crate::error::ApiError;
use crate::fake_api::{FakeApi, date, room, session_with_role};
use crate::model::RoomType;

fn draft(start: &str, end: &str) -> CheckoutDraft {
    CheckoutDraft { room: room(2, RoomType::Double, 2, 850.0), start: date(start), end: date(end) }
}

fn wallet(reference: &str) -> CapturedPayment {
    CapturedPayment { method: PaymentMethod::EmbeddedWallet, reference: reference.to_owned() }
}

fn quoted(start: &str, end: &str) -> Checkout {
    let mut checkout = Checkout::new(draft(start, end));
    checkout.quote().unwrap();
    checkout
}

// =============================================================
// Draft + quote
// =============================================================

#[test]
fn draft_survives_session_storage_round_trip() {
    let d = draft("2025-07-01", "2025-07-04");
    let raw = d.to_json();
    assert!(raw.contains("\"cuarto\""));
    assert!(raw.contains("\"fechaInicio\":\"2025-07-01\""));
    assert_eq!(CheckoutDraft::from_json(&raw), Some(d));
}

#[test]
fn incomplete_draft_is_rejected() {
    assert_eq!(CheckoutDraft::from_json("{\"fechaInicio\":\"2025-07-01\"}"), None);
    assert_eq!(CheckoutDraft::from_json("not json"), None);
}

#[test]
fn quote_multiplies_nights_by_price() {
    let mut checkout = Checkout::new(draft("2025-07-01", "2025-07-04"));
    let quote = checkout.quote().unwrap();
    assert_eq!(quote.nights, 3);
    assert!((quote.total - 2550.0).abs() < f64::EPSILON);
    assert_eq!(checkout.phase(), &CheckoutPhase::AwaitingPayment { quote, method: None });
}

#[test]
fn zero_night_stay_fails_before_any_provider_call() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut checkout = Checkout::new(draft("2025-07-01", "2025-07-01"));
    assert_eq!(checkout.quote(), Err(BookingError::InvalidStay));
    assert_eq!(checkout.phase(), &CheckoutPhase::Failed(BookingError::InvalidStay));
    assert!(block_on(checkout.start_hosted_payment(&api, &session)).is_err());
    assert!(checkout.wallet_order(&session).is_err());
    assert!(api.calls().is_empty());
}

#[test]
fn quote_is_computed_once() {
    let mut checkout = quoted("2025-07-01", "2025-07-02");
    assert!(matches!(checkout.quote(), Err(BookingError::InvalidTransition(_))));
}

// =============================================================
// Payment methods
// =============================================================

#[test]
fn hosted_preference_describes_the_stay() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    let url = block_on(checkout.start_hosted_payment(&api, &session)).unwrap();
    assert_eq!(url, "https://pay.example/checkout?pref=1");
    let quote = match checkout.phase() {
        CheckoutPhase::AwaitingPayment { quote, method } => {
            assert_eq!(*method, Some(PaymentMethod::HostedRedirect));
            *quote
        }
        other => panic!("unexpected phase {other:?}"),
    };
    let pref = checkout.preference(&quote);
    assert_eq!(pref.title, "Cuarto doble con 3 días de estancia");
    assert_eq!(pref.quantity, 3);
}

#[test]
fn hosted_preference_failure_fails_attempt() {
    let api = FakeApi::new();
    api.fail("create_payment_preference");
    let session = session_with_role(None);
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    assert!(matches!(block_on(checkout.start_hosted_payment(&api, &session)), Err(BookingError::Api(_))));
    assert!(matches!(checkout.phase(), CheckoutPhase::Failed(BookingError::Api(_))));
}

#[test]
fn wallet_order_matches_provider_shape() {
    let session = session_with_role(None);
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    let order = checkout.wallet_order(&session).unwrap();
    let unit = &order["purchase_units"][0];
    assert_eq!(unit["description"], "Cuarto doble - 3 noches");
    assert_eq!(unit["amount"]["currency_code"], "MXN");
    assert_eq!(unit["amount"]["value"], "2550.00");
}

#[test]
fn single_night_description_is_singular() {
    let session = session_with_role(None);
    let mut checkout = quoted("2025-07-01", "2025-07-02");
    let order = checkout.wallet_order(&session).unwrap();
    assert_eq!(order["purchase_units"][0]["description"], "Cuarto doble - 1 noche");
}

#[test]
fn payment_methods_are_mutually_exclusive() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    checkout.wallet_order(&session).unwrap();
    assert_eq!(
        block_on(checkout.start_hosted_payment(&api, &session)),
        Err(BookingError::PaymentInProgress("PayPal"))
    );
    let hosted = CapturedPayment { method: PaymentMethod::HostedRedirect, reference: "1".to_owned() };
    assert!(matches!(
        block_on(checkout.confirm(&api, &session, hosted)),
        Err(BookingError::PaymentInProgress(_))
    ));
    assert!(api.calls().is_empty());
}

#[test]
fn cancelled_wallet_releases_the_attempt() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    checkout.wallet_order(&session).unwrap();
    assert_eq!(checkout.claimed_method(), Some(PaymentMethod::EmbeddedWallet));

    assert!(!checkout.payment_cancelled(PaymentMethod::HostedRedirect));
    assert!(checkout.payment_cancelled(PaymentMethod::EmbeddedWallet));
    assert_eq!(checkout.claimed_method(), None);
    assert!(matches!(checkout.phase(), CheckoutPhase::AwaitingPayment { method: None, .. }));

    assert!(block_on(checkout.start_hosted_payment(&api, &session)).is_ok());
    assert_eq!(checkout.claimed_method(), Some(PaymentMethod::HostedRedirect));
}

#[test]
fn cancel_after_failure_changes_nothing() {
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    let session = session_with_role(None);
    checkout.wallet_order(&session).unwrap();
    checkout.payment_failed("popup blocked");
    assert!(!checkout.payment_cancelled(PaymentMethod::EmbeddedWallet));
    assert!(matches!(checkout.phase(), CheckoutPhase::Failed(BookingError::PaymentFailed(_))));
}

#[test]
fn unauthenticated_checkout_contacts_no_provider() {
    let api = FakeApi::new();
    let session = Session::default();
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    assert_eq!(block_on(checkout.start_hosted_payment(&api, &session)), Err(BookingError::LoginRequired));
    assert_eq!(checkout.wallet_order(&session), Err(BookingError::LoginRequired));
    assert!(api.calls().is_empty());
}

#[test]
fn provider_error_fails_attempt() {
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    let err = checkout.payment_failed("popup closed");
    assert_eq!(err, BookingError::PaymentFailed("popup closed".to_owned()));
    assert_eq!(checkout.phase(), &CheckoutPhase::Failed(err));
}

// =============================================================
// Confirmation
// =============================================================

#[test]
fn confirm_creates_reservation_and_receipt() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    checkout.wallet_order(&session).unwrap();
    let receipt = block_on(checkout.confirm(&api, &session, wallet("ORDER-1"))).unwrap();
    assert_eq!(receipt.reservation_id, Some(100));
    assert_eq!(receipt.room_number, 102);
    assert_eq!(receipt.nights, 3);
    assert_eq!(receipt.payment_method, PaymentMethod::EmbeddedWallet);
    assert_eq!(checkout.phase(), &CheckoutPhase::Done(receipt));
    assert_eq!(api.reservations.borrow().len(), 1);
}

#[test]
fn hosted_return_feeds_the_same_confirmation() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    let captured = hosted_return([("status", "approved"), ("payment_id", "555")]).unwrap();
    let receipt = block_on(checkout.confirm(&api, &session, captured)).unwrap();
    assert_eq!(receipt.payment_method, PaymentMethod::HostedRedirect);
    assert_eq!(receipt.payment_reference, "555");
}

#[test]
fn reservation_failure_after_capture_is_paid_not_booked() {
    let api = FakeApi::new();
    api.fail("create_reservation");
    let session = session_with_role(None);
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    let err = block_on(checkout.confirm(&api, &session, wallet("ORDER-2"))).unwrap_err();
    assert_eq!(
        err,
        BookingError::PaidNotBooked {
            payment_ref: "ORDER-2".to_owned(),
            source: ApiError::from_status(500, "boom"),
        }
    );
    assert!(err.user_message().contains("ORDER-2"));
    assert_eq!(checkout.phase(), &CheckoutPhase::Failed(err));
    // No automatic retry and no refund call.
    assert_eq!(api.calls(), vec!["create_reservation"]);
}

#[test]
fn done_attempt_cannot_confirm_again() {
    let api = FakeApi::new();
    let session = session_with_role(None);
    let mut checkout = quoted("2025-07-01", "2025-07-04");
    block_on(checkout.confirm(&api, &session, wallet("ORDER-3"))).unwrap();
    assert!(matches!(
        block_on(checkout.confirm(&api, &session, wallet("ORDER-3"))),
        Err(BookingError::InvalidTransition(_))
    ));
    assert_eq!(api.reservations.borrow().len(), 1);
}

// =============================================================
// hosted_return
// =============================================================

#[test]
fn hosted_return_accepts_collection_aliases() {
    let captured = hosted_return([("collection_status", "approved"), ("collection_id", "42")]).unwrap();
    assert_eq!(captured.reference, "42");
}

#[test]
fn hosted_return_rejects_unapproved_payments() {
    assert_eq!(
        hosted_return([("status", "rejected"), ("payment_id", "1")]),
        Err(BookingError::PaymentFailed("payment rejected".to_owned()))
    );
    assert!(hosted_return([("status", "approved"), ("payment_id", "null")]).is_err());
    assert!(hosted_return(Vec::<(String, String)>::new()).is_err());
}
