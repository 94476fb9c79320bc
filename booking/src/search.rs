//! Availability search: form rules and the single catalog read.
//!
//! DESIGN
//! ======
//! The room types offered depend on party size, and changing the party size
//! snaps an incompatible room-type selection back to the first valid option.
//! The search itself is stateless: identical inputs always give the same
//! outcome, and failures are never retried.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::HotelApi;
use crate::error::{ApiError, ValidationErrors};
use crate::model::{DateRange, Room, RoomType};
use crate::session::Session;

pub const MAX_PARTY_SIZE: u8 = 10;

const SINGLE_OPTIONS: [RoomType; 3] = [RoomType::Simple, RoomType::Double, RoomType::Suite];
const PAIR_OPTIONS: [RoomType; 3] = [RoomType::Double, RoomType::Triple, RoomType::Suite];
const GROUP_OPTIONS: [RoomType; 2] = [RoomType::Triple, RoomType::Suite];

/// Room types offered for a party size. Unset behaves like a single guest.
#[must_use]
pub fn room_type_options(party_size: Option<u8>) -> &'static [RoomType] {
    match party_size {
        None | Some(0 | 1) => &SINGLE_OPTIONS,
        Some(2) => &PAIR_OPTIONS,
        Some(_) => &GROUP_OPTIONS,
    }
}

/// Keep `current` if it is offered for `party_size`, else the first option.
#[must_use]
pub fn reconcile_room_type(party_size: Option<u8>, current: Option<RoomType>) -> RoomType {
    let options = room_type_options(party_size);
    match current {
        Some(t) if options.contains(&t) => t,
        _ => options[0],
    }
}

/// Validated parameters of `GET /cuartos/disponibles`.
#[derive(Clone, Debug, PartialEq)]
pub struct AvailabilityQuery {
    pub room_type: RoomType,
    pub party_size: u8,
    pub range: DateRange,
}

impl AvailabilityQuery {
    /// `tipo`, `capacidad`, `inicio`, `fin` with dates as `YYYY-MM-DD`.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("tipo", self.room_type.as_str().to_owned()),
            ("capacidad", self.party_size.to_string()),
            ("inicio", self.range.start().to_string()),
            ("fin", self.range.end().to_string()),
        ]
    }
}

/// Raw state of the search form.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchForm {
    pub destination: String,
    pub party_size: Option<u8>,
    pub room_type: Option<RoomType>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SearchForm {
    /// Empty form with the default five-night window starting `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let range = DateRange::default_from(today);
        Self {
            destination: String::new(),
            party_size: None,
            room_type: Some(reconcile_room_type(None, None)),
            start: Some(range.start()),
            end: Some(range.end()),
        }
    }

    /// Change the party size and reset an incompatible room type.
    pub fn set_party_size(&mut self, party_size: Option<u8>) {
        self.party_size = party_size;
        self.room_type = Some(reconcile_room_type(party_size, self.room_type));
    }

    #[must_use]
    pub fn room_type_options(&self) -> &'static [RoomType] {
        room_type_options(self.party_size)
    }

    /// # Errors
    ///
    /// Returns every failing field; nothing is sent while any field fails.
    pub fn validate(&self) -> Result<AvailabilityQuery, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let destination = self.destination.trim();
        if destination.is_empty() {
            errors.push("destination", "This field is required.");
        } else if !destination.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
            errors.push("destination", "Only letters and spaces are allowed.");
        }

        let party_size = match self.party_size {
            None => {
                errors.push("party_size", "Select the number of guests.");
                None
            }
            Some(n) if (1..=MAX_PARTY_SIZE).contains(&n) => Some(n),
            Some(_) => {
                errors.push("party_size", format!("Guests must be between 1 and {MAX_PARTY_SIZE}."));
                None
            }
        };

        let room_type = match self.room_type {
            None => {
                errors.push("room_type", "Select a room type.");
                None
            }
            Some(t) if self.room_type_options().contains(&t) => Some(t),
            Some(t) => {
                errors.push("room_type", format!("A {} room is not offered for this party size.", t.label()));
                None
            }
        };

        let range = match (self.start, self.end) {
            (Some(start), Some(end)) => match DateRange::new(start, end) {
                Ok(range) => Some(range),
                Err(err) => {
                    errors.push(err.field, err.message);
                    None
                }
            },
            _ => {
                errors.push("dates", "Select check-in and check-out dates.");
                None
            }
        };

        match (party_size, room_type, range) {
            (Some(party_size), Some(room_type), Some(range)) if errors.is_empty() => {
                Ok(AvailabilityQuery { room_type, party_size, range })
            }
            _ => Err(errors),
        }
    }
}

/// Rooms found for a date range; carried to the results view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub rooms: Vec<Room>,
    pub range: DateRange,
}

/// What the user sees after submitting the search form.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// Not signed in; nothing was sent.
    LoginRequired,
    /// Field errors; nothing was sent.
    Invalid(ValidationErrors),
    /// Informational: the search succeeded with no matches.
    NoResults,
    Found(SearchResults),
    /// Error dialog: the request failed.
    Failed(ApiError),
}

/// Run one availability search.
pub async fn search_availability<A: HotelApi>(api: &A, session: &Session, form: &SearchForm) -> SearchOutcome {
    let Some(token) = session.token() else {
        log::info!("search submitted without a session; redirecting to login");
        return SearchOutcome::LoginRequired;
    };
    let query = match form.validate() {
        Ok(query) => query,
        Err(errors) => return SearchOutcome::Invalid(errors),
    };
    match api.available_rooms(token, &query).await {
        Ok(rooms) if rooms.is_empty() => SearchOutcome::NoResults,
        Ok(rooms) => SearchOutcome::Found(SearchResults { rooms, range: query.range }),
        Err(err) => {
            log::warn!("availability search failed: {err}");
            SearchOutcome::Failed(err)
        }
    }
}
