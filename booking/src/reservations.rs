//! The signed-in user's reservation list and its mutations.
//!
//! Every mutation is applied locally only after the backend confirms it, so a
//! failed request leaves the list exactly as it was.

#[cfg(test)]
#[path = "reservations_test.rs"]
mod reservations_test;

use crate::api::{HotelApi, message_or};
use crate::error::BookingError;
use crate::model::{DateRange, Decision, NewReservation, Reservation};
use crate::session::Session;

/// Outcome of a cancellation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cancellation {
    Cancelled,
    /// The user dismissed the confirmation; nothing was sent.
    Kept,
}

/// Local snapshot of `GET /reservaciones/mias`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReservationBook {
    entries: Vec<Reservation>,
}

impl ReservationBook {
    #[must_use]
    pub fn new(entries: Vec<Reservation>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[Reservation] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Reservation> {
        self.entries.iter().find(|r| r.id == id)
    }

    /// Replace the list with the backend's current one.
    ///
    /// # Errors
    ///
    /// [`BookingError::LoginRequired`] without a token; [`BookingError::Api`]
    /// when the request fails.
    pub async fn refresh<A: HotelApi>(&mut self, api: &A, session: &Session) -> Result<(), BookingError> {
        let token = session.require_token()?;
        self.entries = api.my_reservations(token).await?;
        log::debug!("loaded {} reservations", self.entries.len());
        Ok(())
    }

    /// Reserve `room_id` for `range`.
    ///
    /// When the backend does not echo the created record the list is
    /// re-fetched instead.
    ///
    /// # Errors
    ///
    /// As [`Self::refresh`].
    pub async fn create<A: HotelApi>(
        &mut self,
        api: &A,
        session: &Session,
        room_id: i64,
        range: DateRange,
    ) -> Result<(), BookingError> {
        let token = session.require_token()?;
        let request = NewReservation { room_id, range };
        match api.create_reservation(token, &request).await? {
            Some(created) => {
                log::info!("reservation {} created for room {room_id}", created.id);
                self.entries.push(created);
            }
            None => {
                log::info!("reservation created for room {room_id}");
                match api.my_reservations(token).await {
                    Ok(entries) => self.entries = entries,
                    Err(err) => log::warn!("reservation list refresh after create failed: {err}"),
                }
            }
        }
        Ok(())
    }

    /// Move reservation `id` to `range`; returns the backend's message.
    ///
    /// # Errors
    ///
    /// As [`Self::refresh`].
    pub async fn edit<A: HotelApi>(
        &mut self,
        api: &A,
        session: &Session,
        id: i64,
        range: DateRange,
    ) -> Result<String, BookingError> {
        let token = session.require_token()?;
        let body = api.update_reservation(token, id, &range).await?;
        if let Some(entry) = self.entries.iter_mut().find(|r| r.id == id) {
            entry.start = range.start();
            entry.end = range.end();
        }
        log::info!("reservation {id} moved to {}..{}", range.start(), range.end());
        Ok(message_or(&body, "Reservation updated."))
    }

    /// Cancel reservation `id` once the user confirmed.
    ///
    /// # Errors
    ///
    /// As [`Self::refresh`]. A dismissed prompt is not an error.
    pub async fn cancel<A: HotelApi>(
        &mut self,
        api: &A,
        session: &Session,
        id: i64,
        decision: Decision,
    ) -> Result<Cancellation, BookingError> {
        let token = session.require_token()?;
        if decision == Decision::Dismissed {
            return Ok(Cancellation::Kept);
        }
        api.cancel_reservation(token, id).await?;
        self.entries.retain(|r| r.id != id);
        log::info!("reservation {id} cancelled");
        Ok(Cancellation::Cancelled)
    }
}
