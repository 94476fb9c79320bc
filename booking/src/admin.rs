//! Admin room console: room CRUD and today's occupancy per room.
//!
//! Every operation checks [`Capability::ManageRooms`] before touching the
//! network, so a guest or analyst never issues an admin request.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::api::HotelApi;
use crate::error::{BookingError, ValidationErrors};
use crate::model::{Decision, Room, RoomDraft, RoomType};
use crate::role::Capability;
use crate::session::Session;

pub const MAX_CAPACITY: u32 = 10;

/// Occupancy of one room for one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    Occupied,
    Available,
    /// The occupancy lookup failed.
    Unknown,
}

impl Occupancy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Occupied => "Occupied",
            Self::Available => "Available",
            Self::Unknown => "Error",
        }
    }
}

/// Outcome of a room deletion request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// The confirmation was dismissed; nothing was sent.
    Kept,
}

/// Room list with per-room occupancy for the console table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomConsole {
    rooms: Vec<Room>,
    occupancy: BTreeMap<i64, Occupancy>,
}

impl RoomConsole {
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// `None` while the lookup for `room_id` has not finished.
    #[must_use]
    pub fn occupancy(&self, room_id: i64) -> Option<Occupancy> {
        self.occupancy.get(&room_id).copied()
    }

    /// # Errors
    ///
    /// `LoginRequired`/`Forbidden` without the capability, `Api` on failure.
    pub async fn load<A: HotelApi>(&mut self, api: &A, session: &Session) -> Result<(), BookingError> {
        let token = session.require(Capability::ManageRooms)?;
        self.rooms = api.admin_rooms(token).await?;
        self.occupancy.retain(|id, _| self.rooms.iter().any(|r| r.id == *id));
        log::debug!("room console loaded {} rooms", self.rooms.len());
        Ok(())
    }

    /// Look up `day`'s occupancy for every room, one request at a time.
    /// A failed lookup marks only that room as [`Occupancy::Unknown`].
    ///
    /// # Errors
    ///
    /// `LoginRequired`/`Forbidden` without the capability.
    pub async fn refresh_occupancy<A: HotelApi>(
        &mut self,
        api: &A,
        session: &Session,
        day: NaiveDate,
    ) -> Result<(), BookingError> {
        session.require(Capability::ManageRooms)?;
        for id in self.room_ids() {
            let state = lookup_occupancy(api, session, id, day).await?;
            self.record_occupancy(id, state);
        }
        Ok(())
    }

    #[must_use]
    pub fn room_ids(&self) -> Vec<i64> {
        self.rooms.iter().map(|r| r.id).collect()
    }

    /// Store a finished lookup. Returns `false` and stores nothing when the
    /// room has left the list since the lookup started.
    pub fn record_occupancy(&mut self, room_id: i64, state: Occupancy) -> bool {
        if !self.rooms.iter().any(|r| r.id == room_id) {
            return false;
        }
        self.occupancy.insert(room_id, state);
        true
    }

    /// Delete room `id` once the admin confirmed.
    ///
    /// # Errors
    ///
    /// `LoginRequired`/`Forbidden` without the capability, `Api` on failure.
    pub async fn delete<A: HotelApi>(
        &mut self,
        api: &A,
        session: &Session,
        id: i64,
        decision: Decision,
    ) -> Result<Deletion, BookingError> {
        let token = session.require(Capability::ManageRooms)?;
        if decision == Decision::Dismissed {
            return Ok(Deletion::Kept);
        }
        api.delete_room(token, id).await?;
        self.forget(id);
        log::info!("room {id} deleted");
        Ok(Deletion::Deleted)
    }

    /// Drop room `id` and its occupancy from the list.
    pub fn forget(&mut self, id: i64) {
        self.rooms.retain(|r| r.id != id);
        self.occupancy.remove(&id);
    }
}

/// `day`'s occupancy of one room. A failed request reads as
/// [`Occupancy::Unknown`].
///
/// # Errors
///
/// `LoginRequired`/`Forbidden` without the capability.
pub async fn lookup_occupancy<A: HotelApi>(
    api: &A,
    session: &Session,
    room_id: i64,
    day: NaiveDate,
) -> Result<Occupancy, BookingError> {
    let token = session.require(Capability::ManageRooms)?;
    Ok(match api.room_occupied(token, room_id, day).await {
        Ok(true) => Occupancy::Occupied,
        Ok(false) => Occupancy::Available,
        Err(err) => {
            log::warn!("occupancy lookup for room {room_id} failed: {err}");
            Occupancy::Unknown
        }
    })
}

/// Whether the shared room form creates or edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomFormMode {
    Create,
    Edit(i64),
}

/// Raw text of the room create/edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomForm {
    pub number: String,
    pub room_type: String,
    pub capacity: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
}

impl From<&Room> for RoomForm {
    fn from(room: &Room) -> Self {
        Self {
            number: room.number.to_string(),
            room_type: room.room_type.as_str().to_owned(),
            capacity: room.capacity.to_string(),
            price: room.price_per_night.to_string(),
            description: room.description.clone(),
            image_url: room.image_url.clone(),
        }
    }
}

const REQUIRED: &str = "This field is required.";

impl RoomForm {
    /// # Errors
    ///
    /// Returns every failing field: number must be a whole number ≥ 0,
    /// capacity 1 to 10, price ≥ 0, and type, description and image URL are
    /// required.
    pub fn validate(&self) -> Result<RoomDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let number = match self.number.trim() {
            "" => {
                errors.push("number", REQUIRED);
                None
            }
            raw => match raw.parse::<i64>() {
                Ok(n) if n >= 0 => Some(n),
                _ => {
                    errors.push("number", "Room number must be zero or more.");
                    None
                }
            },
        };

        let room_type = RoomType::parse(&self.room_type);
        if room_type.is_none() {
            errors.push("room_type", "Select a room type.");
        }

        let capacity = match self.capacity.trim() {
            "" => {
                errors.push("capacity", REQUIRED);
                None
            }
            raw => match raw.parse::<u32>() {
                Ok(n) if (1..=MAX_CAPACITY).contains(&n) => Some(n),
                _ => {
                    errors.push("capacity", format!("Capacity must be between 1 and {MAX_CAPACITY}."));
                    None
                }
            },
        };

        let price = match self.price.trim() {
            "" => {
                errors.push("price", REQUIRED);
                None
            }
            raw => match raw.parse::<f64>() {
                Ok(p) if p.is_finite() && p >= 0.0 => Some(p),
                _ => {
                    errors.push("price", "Price must be zero or more.");
                    None
                }
            },
        };

        let description = self.description.trim();
        if description.is_empty() {
            errors.push("description", "A description is required.");
        }
        let image_url = self.image_url.trim();
        if image_url.is_empty() {
            errors.push("image_url", "An image URL is required.");
        }

        match (number, room_type, capacity, price) {
            (Some(number), Some(room_type), Some(capacity), Some(price)) if errors.is_empty() => Ok(RoomDraft {
                number,
                room_type,
                capacity,
                price_per_night: price,
                description: description.to_owned(),
                image_url: image_url.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

/// Fetch a room and pre-populate the edit form.
///
/// # Errors
///
/// `LoginRequired`/`Forbidden` without the capability, `Api` on failure.
pub async fn load_room_for_edit<A: HotelApi>(api: &A, session: &Session, id: i64) -> Result<RoomForm, BookingError> {
    view_room(api, session, id).await.map(|room| RoomForm::from(&room))
}

/// Admin read of a single room.
///
/// # Errors
///
/// `LoginRequired`/`Forbidden` without the capability, `Api` on failure.
pub async fn view_room<A: HotelApi>(api: &A, session: &Session, id: i64) -> Result<Room, BookingError> {
    let token = session.require(Capability::ManageRooms)?;
    Ok(api.admin_room(token, id).await?)
}

/// Validate and submit the room form; returns the success message.
///
/// # Errors
///
/// `LoginRequired`/`Forbidden` without the capability, `Invalid` for field
/// errors (nothing sent), `Api` on failure.
pub async fn save_room<A: HotelApi>(
    api: &A,
    session: &Session,
    mode: RoomFormMode,
    form: &RoomForm,
) -> Result<&'static str, BookingError> {
    let token = session.require(Capability::ManageRooms)?;
    let draft = form.validate()?;
    match mode {
        RoomFormMode::Create => {
            api.create_room(token, &draft).await?;
            log::info!("room {} created", draft.number);
            Ok("Room created.")
        }
        RoomFormMode::Edit(id) => {
            api.update_room(token, id, &draft).await?;
            log::info!("room {id} updated");
            Ok("Room updated.")
        }
    }
}
