//! `reqwest` implementation of [`HotelApi`] for the terminal client.
//!
//! Mirrors the browser transport: bearer token per call, non-2xx bodies
//! surfaced as [`ApiError::Status`], response-shape quirks decoded by the
//! shared helpers in `booking::api`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use booking::ApiError;
use booking::api::{HotelApi, parse_created_reservation, parse_occupied, parse_redirect_url};
use booking::endpoints;
use booking::model::{
    AuthResponse, Credentials, DateRange, NewReservation, PaymentPreference, Registration, Reservation, Room,
    RoomDraft,
};
use booking::search::AvailabilityQuery;
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::Value;

/// REST client bound to one backend base URL.
#[derive(Clone, Debug)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path.
    fn url(&self, path: &str) -> String {
        endpoints::join(&self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&'static str, String)],
        body: Option<Value>,
    ) -> Result<String, ApiError> {
        let mut request = self.client.request(method.clone(), self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        if status.is_success() {
            tracing::debug!(%method, path, status = status.as_u16(), "request ok");
            Ok(text)
        } else {
            tracing::warn!(%method, path, status = status.as_u16(), "request failed");
            Err(ApiError::from_status(status.as_u16(), &text))
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, ApiError> {
        decode(&self.send(Method::GET, path, token, &[], None).await?)
    }

    async fn post<B: serde::Serialize>(&self, path: &str, token: Option<&str>, body: &B) -> Result<String, ApiError> {
        self.send(Method::POST, path, token, &[], Some(encode(body)?)).await
    }

    async fn put<B: serde::Serialize>(&self, path: &str, token: &str, body: &B) -> Result<String, ApiError> {
        self.send(Method::PUT, path, Some(token), &[], Some(encode(body)?)).await
    }

    async fn delete(&self, path: &str, token: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, Some(token), &[], None).await.map(|_| ())
    }
}

fn encode<B: serde::Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl HotelApi for ReqwestApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        decode(&self.post(endpoints::LOGIN, None, credentials).await?)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.post(endpoints::REGISTER, None, registration).await.map(|_| ())
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, ApiError> {
        self.get(endpoints::ROOMS, None).await
    }

    async fn room(&self, id: i64) -> Result<Room, ApiError> {
        self.get(&endpoints::room(id), None).await
    }

    async fn available_rooms(&self, token: &str, query: &AvailabilityQuery) -> Result<Vec<Room>, ApiError> {
        decode(&self.send(Method::GET, endpoints::AVAILABLE_ROOMS, Some(token), &query.query_pairs(), None).await?)
    }

    async fn admin_rooms(&self, token: &str) -> Result<Vec<Room>, ApiError> {
        self.get(endpoints::ADMIN_ROOMS, Some(token)).await
    }

    async fn admin_room(&self, token: &str, id: i64) -> Result<Room, ApiError> {
        self.get(&endpoints::admin_room(id), Some(token)).await
    }

    async fn room_occupied(&self, token: &str, room_id: i64, day: NaiveDate) -> Result<bool, ApiError> {
        let query = [("cuartoId", room_id.to_string()), ("fecha", day.to_string())];
        parse_occupied(&self.send(Method::GET, endpoints::ADMIN_OCCUPIED, Some(token), &query, None).await?)
    }

    async fn create_room(&self, token: &str, draft: &RoomDraft) -> Result<(), ApiError> {
        self.post(endpoints::ADMIN_CREATE_ROOM, Some(token), draft).await.map(|_| ())
    }

    async fn update_room(&self, token: &str, id: i64, draft: &RoomDraft) -> Result<(), ApiError> {
        self.put(&endpoints::admin_update_room(id), token, draft).await.map(|_| ())
    }

    async fn delete_room(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::admin_delete_room(id), token).await
    }

    async fn create_reservation(&self, token: &str, request: &NewReservation) -> Result<Option<Reservation>, ApiError> {
        Ok(parse_created_reservation(&self.post(endpoints::RESERVATIONS, Some(token), request).await?))
    }

    async fn my_reservations(&self, token: &str) -> Result<Vec<Reservation>, ApiError> {
        self.get(endpoints::MY_RESERVATIONS, Some(token)).await
    }

    async fn update_reservation(&self, token: &str, id: i64, range: &DateRange) -> Result<String, ApiError> {
        self.put(&endpoints::update_reservation(id), token, range).await
    }

    async fn cancel_reservation(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::cancel_reservation(id), token).await
    }

    async fn create_payment_preference(&self, preference: &PaymentPreference) -> Result<String, ApiError> {
        parse_redirect_url(&self.post(endpoints::PAYMENT_PREFERENCE, None, preference).await?)
    }

    async fn reservations_csv(&self, token: &str) -> Result<String, ApiError> {
        self.send(Method::GET, endpoints::REPORT_DOWNLOAD, Some(token), &[], None).await
    }
}
