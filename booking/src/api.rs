//! Transport seam between the booking flows and the REST backend.
//!
//! ARCHITECTURE
//! ============
//! Flows are generic over [`HotelApi`] so the browser (`gloo-net`), the CLI
//! (`reqwest`) and in-memory tests share one implementation of every rule.
//! Tokens are passed per call; implementations hold only the base URL.
//!
//! The response-body helpers here cover the endpoints whose payloads are not
//! plain JSON records (redirect URLs, booleans, free-text messages).

#![allow(async_fn_in_trait)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use chrono::NaiveDate;

use crate::error::ApiError;
use crate::model::{
    AuthResponse, Credentials, DateRange, NewReservation, PaymentPreference, Registration,
    Reservation, Room, RoomDraft,
};
use crate::search::AvailabilityQuery;

/// Every backend call the client makes.
pub trait HotelApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    /// `GET /cuartos/listar`
    async fn list_rooms(&self) -> Result<Vec<Room>, ApiError>;

    /// `GET /cuartos/get/{id}`
    async fn room(&self, id: i64) -> Result<Room, ApiError>;

    /// `GET /cuartos/disponibles`
    async fn available_rooms(
        &self,
        token: &str,
        query: &AvailabilityQuery,
    ) -> Result<Vec<Room>, ApiError>;

    /// `GET /cuartos/admin/todos`
    async fn admin_rooms(&self, token: &str) -> Result<Vec<Room>, ApiError>;

    /// `GET /cuartos/{id}`
    async fn admin_room(&self, token: &str, id: i64) -> Result<Room, ApiError>;

    /// `GET /cuartos/admin/ocupado?cuartoId&fecha`
    async fn room_occupied(&self, token: &str, room_id: i64, day: NaiveDate) -> Result<bool, ApiError>;

    async fn create_room(&self, token: &str, draft: &RoomDraft) -> Result<(), ApiError>;

    async fn update_room(&self, token: &str, id: i64, draft: &RoomDraft) -> Result<(), ApiError>;

    async fn delete_room(&self, token: &str, id: i64) -> Result<(), ApiError>;

    /// `POST /reservaciones`; `None` when the body is not a reservation record.
    async fn create_reservation(
        &self,
        token: &str,
        request: &NewReservation,
    ) -> Result<Option<Reservation>, ApiError>;

    /// `GET /reservaciones/mias`
    async fn my_reservations(&self, token: &str) -> Result<Vec<Reservation>, ApiError>;

    /// `PUT /reservaciones/editar/{id}`; returns the server's message.
    async fn update_reservation(&self, token: &str, id: i64, range: &DateRange) -> Result<String, ApiError>;

    /// `DELETE /reservaciones/{id}`
    async fn cancel_reservation(&self, token: &str, id: i64) -> Result<(), ApiError>;

    /// `POST /pagos/crear-preferencia`; returns the hosted checkout URL.
    async fn create_payment_preference(&self, preference: &PaymentPreference) -> Result<String, ApiError>;

    /// `GET /analyst/reservaciones/download`; raw CSV text.
    async fn reservations_csv(&self, token: &str) -> Result<String, ApiError>;
}

/// Extract the hosted checkout URL from a payment-preference response.
///
/// The backend answers with either a bare URL, a JSON string, or an object
/// carrying `url` / `init_point`.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when no http(s) URL can be found.
pub fn parse_redirect_url(body: &str) -> Result<String, ApiError> {
    let body = body.trim();
    let candidate = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(url)) => url,
        Ok(serde_json::Value::Object(map)) => ["url", "init_point", "initPoint"]
            .iter()
            .find_map(|k| map.get(*k).and_then(|v| v.as_str()).map(str::to_owned))
            .unwrap_or_default(),
        _ => body.to_owned(),
    };
    if candidate.starts_with("https://") || candidate.starts_with("http://") {
        Ok(candidate)
    } else {
        Err(ApiError::Decode(format!("no checkout URL in `{body}`")))
    }
}

/// Decode a `true`/`false` occupancy answer.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] for anything but a JSON boolean.
pub fn parse_occupied(body: &str) -> Result<bool, ApiError> {
    match body.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ApiError::Decode(format!("expected boolean, got `{other}`"))),
    }
}

/// Decode the created reservation when the backend echoes one.
#[must_use]
pub fn parse_created_reservation(body: &str) -> Option<Reservation> {
    serde_json::from_str(body).ok()
}

/// Free-text success message, falling back when the body is empty.
#[must_use]
pub fn message_or(body: &str, fallback: &str) -> String {
    let message = body.trim().trim_matches('"').trim();
    if message.is_empty() { fallback.to_owned() } else { message.to_owned() }
}
