//! Checkout: turn a chosen room and stay into a paid, confirmed reservation.
//!
//! DESIGN
//! ======
//! The flow is a linear state machine:
//!
//! ```text
//! Idle -> ComputingTotal -> AwaitingPayment -> ConfirmingReservation -> Done
//!              |                  |                     |
//!              +------------------+---------------------+--> Failed
//! ```
//!
//! Exactly one payment method may claim an attempt. Both methods converge on
//! [`Checkout::confirm`]: the embedded wallet calls it after its client-side
//! capture, and the hosted provider's return URL is decoded by
//! [`hosted_return`] and fed into the same step. A reservation failure after
//! capture is terminal and reported as [`BookingError::PaidNotBooked`]; it is
//! never retried and no refund is requested.

#[cfg(test)]
#[path = "checkout_test.rs"]
mod checkout_test;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::HotelApi;
use crate::error::BookingError;
use crate::model::{DateRange, NewReservation, PaymentPreference, Room, stay_nights};
use crate::receipt::Receipt;
use crate::session::Session;

pub const PAYMENT_CURRENCY: &str = "MXN";

/// Session-storage key holding the serialized [`CheckoutDraft`].
pub const CHECKOUT_DRAFT_KEY: &str = "checkoutData";

/// Room and dates chosen on the results page, kept across the hosted
/// provider's full-page redirect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckoutDraft {
    #[serde(rename = "cuarto")]
    pub room: Room,
    #[serde(rename = "fechaInicio")]
    pub start: NaiveDate,
    #[serde(rename = "fechaFin")]
    pub end: NaiveDate,
}

impl CheckoutDraft {
    #[must_use]
    pub fn new(room: Room, range: DateRange) -> Self {
        Self { room, start: range.start(), end: range.end() }
    }

    /// Decode a stored draft; anything incomplete is `None`.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Stay cost for one checkout attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quote {
    pub nights: i64,
    pub price_per_night: f64,
    pub total: f64,
}

impl Quote {
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidStay`] for zero or negative nights.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(price_per_night: f64, start: NaiveDate, end: NaiveDate) -> Result<Self, BookingError> {
        let nights = stay_nights(start, end);
        if nights <= 0 {
            return Err(BookingError::InvalidStay);
        }
        Ok(Self { nights, price_per_night, total: price_per_night * nights as f64 })
    }
}

/// Payment provider integration used for an attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Full-page redirect to the provider's hosted checkout (Mercado Pago).
    HostedRedirect,
    /// Provider buttons embedded in the page (PayPal).
    EmbeddedWallet,
}

impl PaymentMethod {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::HostedRedirect => "Mercado Pago",
            Self::EmbeddedWallet => "PayPal",
        }
    }
}

/// Proof of a captured payment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedPayment {
    pub method: PaymentMethod,
    pub reference: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CheckoutPhase {
    Idle,
    ComputingTotal,
    AwaitingPayment { quote: Quote, method: Option<PaymentMethod> },
    ConfirmingReservation { quote: Quote, payment: CapturedPayment },
    Done(Receipt),
    Failed(BookingError),
}

/// One checkout attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkout {
    draft: CheckoutDraft,
    phase: CheckoutPhase,
}

impl Checkout {
    #[must_use]
    pub fn new(draft: CheckoutDraft) -> Self {
        Self { draft, phase: CheckoutPhase::Idle }
    }

    #[must_use]
    pub fn draft(&self) -> &CheckoutDraft {
        &self.draft
    }

    #[must_use]
    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// Compute the stay cost and wait for a payment method.
    ///
    /// # Errors
    ///
    /// [`BookingError::InvalidStay`] moves the attempt to `Failed` before any
    /// provider is contacted; calling twice is an invalid transition.
    pub fn quote(&mut self) -> Result<Quote, BookingError> {
        if self.phase != CheckoutPhase::Idle {
            return Err(BookingError::InvalidTransition("compute a total"));
        }
        self.phase = CheckoutPhase::ComputingTotal;
        match Quote::compute(self.draft.room.price_per_night, self.draft.start, self.draft.end) {
            Ok(quote) => {
                self.phase = CheckoutPhase::AwaitingPayment { quote, method: None };
                Ok(quote)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Body of the hosted provider's payment preference.
    #[must_use]
    pub fn preference(&self, quote: &Quote) -> PaymentPreference {
        PaymentPreference {
            title: format!(
                "Cuarto {} con {} días de estancia",
                self.draft.room.room_type.as_str(),
                quote.nights
            ),
            quantity: quote.nights,
            unit_price: quote.price_per_night,
        }
    }

    /// Request the hosted checkout URL; the caller navigates the whole page
    /// to it.
    ///
    /// # Errors
    ///
    /// `LoginRequired` without a token, `PaymentInProgress` when the wallet
    /// already owns the attempt, or `Api` when the preference request fails
    /// (which also fails the attempt).
    pub async fn start_hosted_payment<A: HotelApi>(
        &mut self,
        api: &A,
        session: &Session,
    ) -> Result<String, BookingError> {
        session.require_token()?;
        let quote = self.claim(PaymentMethod::HostedRedirect)?;
        match api.create_payment_preference(&self.preference(&quote)).await {
            Ok(url) => {
                log::info!("redirecting to hosted checkout for {} nights", quote.nights);
                Ok(url)
            }
            Err(err) => {
                log::warn!("payment preference failed: {err}");
                Err(self.fail(err.into()))
            }
        }
    }

    /// Order payload handed to the embedded wallet's `createOrder` callback.
    ///
    /// # Errors
    ///
    /// `LoginRequired` without a token, or `PaymentInProgress` when the
    /// hosted redirect already owns the attempt.
    pub fn wallet_order(&mut self, session: &Session) -> Result<serde_json::Value, BookingError> {
        session.require_token()?;
        let quote = self.claim(PaymentMethod::EmbeddedWallet)?;
        let plural = if quote.nights > 1 { "s" } else { "" };
        Ok(serde_json::json!({
            "purchase_units": [{
                "description": format!(
                    "Cuarto {} - {} noche{plural}",
                    self.draft.room.room_type.as_str(),
                    quote.nights
                ),
                "amount": {
                    "currency_code": PAYMENT_CURRENCY,
                    "value": format!("{:.2}", quote.total),
                },
            }],
        }))
    }

    /// Method that owns the attempt while it waits for or confirms a payment.
    #[must_use]
    pub fn claimed_method(&self) -> Option<PaymentMethod> {
        match &self.phase {
            CheckoutPhase::AwaitingPayment { method, .. } => *method,
            CheckoutPhase::ConfirmingReservation { payment, .. } => Some(payment.method),
            _ => None,
        }
    }

    /// The guest closed `method`'s flow without paying: release the claim so
    /// either method can be chosen again. Returns `false` when `method` did
    /// not own a waiting attempt.
    pub fn payment_cancelled(&mut self, method: PaymentMethod) -> bool {
        match &mut self.phase {
            CheckoutPhase::AwaitingPayment { method: owner, .. } if *owner == Some(method) => {
                *owner = None;
                log::info!("{} payment cancelled by guest", method.label());
                true
            }
            _ => false,
        }
    }

    /// Record a provider-side failure before capture.
    pub fn payment_failed(&mut self, reason: impl Into<String>) -> BookingError {
        let reason = reason.into();
        log::warn!("payment failed: {reason}");
        self.fail(BookingError::PaymentFailed(reason))
    }

    /// Create the reservation for a captured payment.
    ///
    /// # Errors
    ///
    /// `LoginRequired`, `InvalidTransition` or `PaymentInProgress` when the
    /// attempt cannot be confirmed; [`BookingError::PaidNotBooked`] when the
    /// reservation request fails after capture.
    pub async fn confirm<A: HotelApi>(
        &mut self,
        api: &A,
        session: &Session,
        payment: CapturedPayment,
    ) -> Result<Receipt, BookingError> {
        let token = session.require_token()?;
        let quote = self.claim(payment.method)?;
        let range = match DateRange::new(self.draft.start, self.draft.end) {
            Ok(range) => range,
            Err(_) => return Err(self.fail(BookingError::InvalidStay)),
        };
        self.phase = CheckoutPhase::ConfirmingReservation { quote, payment: payment.clone() };

        let request = NewReservation { room_id: self.draft.room.id, range };
        match api.create_reservation(token, &request).await {
            Ok(created) => {
                let receipt = Receipt {
                    reservation_id: created.map(|r| r.id),
                    room_number: self.draft.room.number,
                    room_type: self.draft.room.room_type,
                    start: range.start(),
                    end: range.end(),
                    nights: quote.nights,
                    price_per_night: quote.price_per_night,
                    total: quote.total,
                    payment_method: payment.method,
                    payment_reference: payment.reference,
                };
                log::info!("checkout complete for room {}", self.draft.room.id);
                self.phase = CheckoutPhase::Done(receipt.clone());
                Ok(receipt)
            }
            Err(source) => {
                log::error!("payment {} captured but reservation failed: {source}", payment.reference);
                Err(self.fail(BookingError::PaidNotBooked { payment_ref: payment.reference, source }))
            }
        }
    }

    /// Let `method` own the attempt and return its quote.
    fn claim(&mut self, method: PaymentMethod) -> Result<Quote, BookingError> {
        match &mut self.phase {
            CheckoutPhase::AwaitingPayment { quote, method: owner } => match *owner {
                Some(current) if current != method => Err(BookingError::PaymentInProgress(current.label())),
                _ => {
                    *owner = Some(method);
                    Ok(*quote)
                }
            },
            _ => Err(BookingError::InvalidTransition("take a payment")),
        }
    }

    fn fail(&mut self, err: BookingError) -> BookingError {
        self.phase = CheckoutPhase::Failed(err.clone());
        err
    }
}

/// Decode the hosted provider's return query (`status`, `payment_id`).
///
/// # Errors
///
/// [`BookingError::PaymentFailed`] unless the payment is approved and carries
/// a reference.
pub fn hosted_return<I, K, V>(params: I) -> Result<CapturedPayment, BookingError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut status = None;
    let mut reference = None;
    for (key, value) in params {
        let value = value.as_ref().trim();
        match key.as_ref() {
            "status" | "collection_status" if status.is_none() => status = Some(value.to_owned()),
            "payment_id" | "collection_id" if reference.is_none() && !value.is_empty() && value != "null" => {
                reference = Some(value.to_owned());
            }
            _ => {}
        }
    }
    match (status.as_deref(), reference) {
        (Some("approved"), Some(reference)) => Ok(CapturedPayment { method: PaymentMethod::HostedRedirect, reference }),
        (Some("approved"), None) => Err(BookingError::PaymentFailed("approved payment has no reference".to_owned())),
        (Some(other), _) if !other.is_empty() => Err(BookingError::PaymentFailed(format!("payment {other}"))),
        _ => Err(BookingError::PaymentFailed("payment was not completed".to_owned())),
    }
}
