//! Error taxonomy shared by every booking flow.
//!
//! DESIGN
//! ======
//! Validation failures are collected per field so forms can render them
//! inline. Transport failures keep the server's message for display. The
//! remaining variants cover authorization gaps and the partial-success case
//! where a payment was captured but the reservation was not created.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

/// Failure talking to the REST backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from a raw response body.
    ///
    /// Empty bodies fall back to a generic message so dialogs never go blank.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = body.trim().trim_matches('"').trim();
        let message = if message.is_empty() {
            format!("request failed with status {status}")
        } else {
            message.to_owned()
        };
        Self::Status { status, message }
    }

    /// Message suitable for a user-facing dialog.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the server. Try again later.".to_owned(),
            Self::Status { message, .. } => message.clone(),
            Self::Decode(_) => "The server sent an unexpected response.".to_owned(),
        }
    }

    /// Whether the backend rejected the credentials or token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

/// A single form field that failed validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// All field errors collected from one form submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Return `value` when no errors were recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(err: FieldError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
            first = false;
        }
        Ok(())
    }
}

/// Error returned by the booking flows.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BookingError {
    /// Form input was rejected before any request was sent.
    #[error("{0}")]
    Invalid(ValidationErrors),
    /// No auth token is present.
    #[error("sign in to continue")]
    LoginRequired,
    /// Signed in, but the role lacks the capability.
    #[error("you do not have permission to view this page")]
    Forbidden,
    /// Transport or backend failure.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The stay has zero or negative nights.
    #[error("the end date must be after the start date")]
    InvalidStay,
    /// The payment provider reported a failure before capture.
    #[error("payment failed: {0}")]
    PaymentFailed(String),
    /// A different payment method already owns this checkout attempt.
    #[error("a {0} payment is already in progress for this checkout")]
    PaymentInProgress(&'static str),
    /// The checkout is not in a state that accepts this step.
    #[error("checkout cannot {0} in its current state")]
    InvalidTransition(&'static str),
    /// Payment was captured but the reservation could not be created.
    #[error("payment {payment_ref} was captured but the reservation could not be created: {source}")]
    PaidNotBooked { payment_ref: String, source: ApiError },
    /// The analyst report could not be parsed.
    #[error("could not read report: {0}")]
    Report(String),
}

impl From<ValidationErrors> for BookingError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}

impl BookingError {
    /// Message suitable for a user-facing dialog.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::PaidNotBooked { payment_ref, .. } => format!(
                "Your payment ({payment_ref}) went through, but the reservation could not be created. \
                 Contact the front desk with this reference."
            ),
            other => other.to_string(),
        }
    }
}
