//! `gloo-net` implementation of [`HotelApi`].
//!
//! Client-side (csr): real HTTP calls via `gloo-net` with a bearer token on
//! every authenticated request.
//! Native builds (tests): every call fails with a transport error, since the
//! endpoints are only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] carrying the server's body
//! text, so dialogs show the backend's own message. Nothing here panics.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use booking::api::{HotelApi, parse_created_reservation, parse_occupied, parse_redirect_url};
use booking::endpoints;
use booking::model::{
    AuthResponse, Credentials, DateRange, NewReservation, PaymentPreference, Registration,
    Reservation, Room, RoomDraft,
};
use booking::search::AvailabilityQuery;
use booking::ApiError;
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// REST client bound to one backend base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlooApi {
    base_url: String,
}

impl GlooApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Client for the compiled-in backend URL.
    pub fn from_config() -> Self {
        Self::new(crate::config::api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and return the body of a 2xx response.
    async fn send(
        &self,
        verb: Verb,
        path: &str,
        token: Option<&str>,
        query: &[(&'static str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<String, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let url = endpoints::join(&self.base_url, path);
            let mut builder = match verb {
                Verb::Get => Request::get(&url),
                Verb::Post => Request::post(&url),
                Verb::Put => Request::put(&url),
                Verb::Delete => Request::delete(&url),
            };
            if let Some(token) = token {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            if !query.is_empty() {
                builder = builder.query(query.iter().map(|(k, v)| (*k, v.as_str())));
            }
            let sent = match body {
                Some(body) => builder.json(&body).map_err(transport)?.send().await,
                None => builder.send().await,
            };
            let response = sent.map_err(transport)?;
            let text = response.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
            if response.ok() {
                Ok(text)
            } else {
                log::warn!("{verb:?} {path} -> {}", response.status());
                Err(ApiError::from_status(response.status(), &text))
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (verb, path, token, query, body);
            Err(ApiError::Transport("not available outside the browser".to_owned()))
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, ApiError> {
        decode(&self.send(Verb::Get, path, token, &[], None).await?)
    }

    async fn post<B: Serialize>(&self, path: &str, token: Option<&str>, body: &B) -> Result<String, ApiError> {
        self.send(Verb::Post, path, token, &[], Some(encode(body)?)).await
    }

    async fn put<B: Serialize>(&self, path: &str, token: &str, body: &B) -> Result<String, ApiError> {
        self.send(Verb::Put, path, Some(token), &[], Some(encode(body)?)).await
    }

    async fn delete(&self, path: &str, token: &str) -> Result<(), ApiError> {
        self.send(Verb::Delete, path, Some(token), &[], None).await.map(|_| ())
    }
}

#[cfg(feature = "csr")]
fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl HotelApi for GlooApi {
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
        let body = self
            .send(Verb::Get, endpoints::AVAILABLE_ROOMS, Some(token), &query.query_pairs(), None)
            .await?;
        decode(&body)
    }

    async fn admin_rooms(&self, token: &str) -> Result<Vec<Room>, ApiError> {
        self.get(endpoints::ADMIN_ROOMS, Some(token)).await
    }

    async fn admin_room(&self, token: &str, id: i64) -> Result<Room, ApiError> {
        self.get(&endpoints::admin_room(id), Some(token)).await
    }

    async fn room_occupied(&self, token: &str, room_id: i64, day: NaiveDate) -> Result<bool, ApiError> {
        let query = [("cuartoId", room_id.to_string()), ("fecha", day.to_string())];
        let body = self.send(Verb::Get, endpoints::ADMIN_OCCUPIED, Some(token), &query, None).await?;
        parse_occupied(&body)
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
        let body = self.post(endpoints::RESERVATIONS, Some(token), request).await?;
        Ok(parse_created_reservation(&body))
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
        self.send(Verb::Get, endpoints::REPORT_DOWNLOAD, Some(token), &[], None).await
    }
}
