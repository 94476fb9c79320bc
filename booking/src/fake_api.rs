//! In-memory backend for flow tests.
//!
//! Records every call by name so tests can assert that gated flows never
//! reach the network, and lets a test force individual calls to fail.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::api::HotelApi;
use crate::error::ApiError;
use crate::model::{
    AuthResponse, Credentials, DateRange, NewReservation, PaymentPreference, Registration,
    Reservation, Room, RoomDraft, RoomType, parse_date,
};
use crate::search::AvailabilityQuery;
use crate::session::{MemoryStore, Session};

pub fn date(raw: &str) -> NaiveDate {
    parse_date(raw).unwrap()
}

pub fn room(id: i64, room_type: RoomType, capacity: u32, price: f64) -> Room {
    Room {
        id,
        number: 100 + id,
        room_type,
        capacity,
        price_per_night: price,
        description: format!("Room {id}"),
        image_url: format!("https://img.example/{id}.jpg"),
    }
}

pub fn session_with_role(role: Option<&str>) -> Session {
    let mut session = Session::default();
    session.login(
        &MemoryStore::default(),
        AuthResponse { token: "tok".to_owned(), name: Some("Ana".to_owned()), role: role.map(str::to_owned) },
    );
    session
}

pub struct FakeApi {
    pub rooms: RefCell<Vec<Room>>,
    pub reservations: RefCell<Vec<Reservation>>,
    pub occupied: RefCell<BTreeSet<i64>>,
    pub csv: RefCell<String>,
    pub echo_created: Cell<bool>,
    calls: RefCell<Vec<&'static str>>,
    failing: RefCell<BTreeSet<&'static str>>,
    next_id: Cell<i64>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            rooms: RefCell::new(vec![
                room(1, RoomType::Simple, 1, 500.0),
                room(2, RoomType::Double, 2, 850.0),
                room(3, RoomType::Suite, 4, 1500.0),
            ]),
            reservations: RefCell::new(Vec::new()),
            occupied: RefCell::new(BTreeSet::new()),
            csv: RefCell::new(String::new()),
            echo_created: Cell::new(true),
            calls: RefCell::new(Vec::new()),
            failing: RefCell::new(BTreeSet::new()),
            next_id: Cell::new(100),
        }
    }

    pub fn fail(&self, call: &'static str) {
        self.failing.borrow_mut().insert(call);
    }

    pub fn recover(&self, call: &'static str) {
        self.failing.borrow_mut().remove(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        if self.failing.borrow().contains(call) {
            Err(ApiError::from_status(500, "boom"))
        } else {
            Ok(())
        }
    }

    fn next_id(&self) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn find_room(&self, id: i64) -> Result<Room, ApiError> {
        self.rooms
            .borrow()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, "room not found"))
    }
}

fn room_from_draft(id: i64, draft: &RoomDraft) -> Room {
    Room {
        id,
        number: draft.number,
        room_type: draft.room_type,
        capacity: draft.capacity,
        price_per_night: draft.price_per_night,
        description: draft.description.clone(),
        image_url: draft.image_url.clone(),
    }
}

impl HotelApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.record("login")?;
        if credentials.password != "secret" {
            return Err(ApiError::from_status(401, "invalid credentials"));
        }
        Ok(AuthResponse { token: "tok".to_owned(), name: Some("Ana".to_owned()), role: None })
    }

    async fn register(&self, _registration: &Registration) -> Result<(), ApiError> {
        self.record("register")
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, ApiError> {
        self.record("list_rooms")?;
        Ok(self.rooms.borrow().clone())
    }

    async fn room(&self, id: i64) -> Result<Room, ApiError> {
        self.record("room")?;
        self.find_room(id)
    }

    async fn available_rooms(&self, _token: &str, query: &AvailabilityQuery) -> Result<Vec<Room>, ApiError> {
        self.record("available_rooms")?;
        Ok(self
            .rooms
            .borrow()
            .iter()
            .filter(|r| r.room_type == query.room_type && r.capacity >= u32::from(query.party_size))
            .cloned()
            .collect())
    }

    async fn admin_rooms(&self, _token: &str) -> Result<Vec<Room>, ApiError> {
        self.record("admin_rooms")?;
        Ok(self.rooms.borrow().clone())
    }

    async fn admin_room(&self, _token: &str, id: i64) -> Result<Room, ApiError> {
        self.record("admin_room")?;
        self.find_room(id)
    }

    async fn room_occupied(&self, _token: &str, room_id: i64, _day: NaiveDate) -> Result<bool, ApiError> {
        self.record("room_occupied")?;
        if room_id < 0 {
            return Err(ApiError::Transport("offline".to_owned()));
        }
        Ok(self.occupied.borrow().contains(&room_id))
    }

    async fn create_room(&self, _token: &str, draft: &RoomDraft) -> Result<(), ApiError> {
        self.record("create_room")?;
        let id = self.next_id();
        self.rooms.borrow_mut().push(room_from_draft(id, draft));
        Ok(())
    }

    async fn update_room(&self, _token: &str, id: i64, draft: &RoomDraft) -> Result<(), ApiError> {
        self.record("update_room")?;
        let mut rooms = self.rooms.borrow_mut();
        let slot = rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::from_status(404, "room not found"))?;
        *slot = room_from_draft(id, draft);
        Ok(())
    }

    async fn delete_room(&self, _token: &str, id: i64) -> Result<(), ApiError> {
        self.record("delete_room")?;
        self.rooms.borrow_mut().retain(|r| r.id != id);
        Ok(())
    }

    async fn create_reservation(&self, _token: &str, request: &NewReservation) -> Result<Option<Reservation>, ApiError> {
        self.record("create_reservation")?;
        let reservation = Reservation {
            id: self.next_id(),
            room: self.find_room(request.room_id)?,
            start: request.range.start(),
            end: request.range.end(),
            user: None,
        };
        self.reservations.borrow_mut().push(reservation.clone());
        Ok(self.echo_created.get().then_some(reservation))
    }

    async fn my_reservations(&self, _token: &str) -> Result<Vec<Reservation>, ApiError> {
        self.record("my_reservations")?;
        Ok(self.reservations.borrow().clone())
    }

    async fn update_reservation(&self, _token: &str, id: i64, range: &DateRange) -> Result<String, ApiError> {
        self.record("update_reservation")?;
        let mut reservations = self.reservations.borrow_mut();
        let slot = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::from_status(404, "reservation not found"))?;
        slot.start = range.start();
        slot.end = range.end();
        Ok("Reservation updated".to_owned())
    }

    async fn cancel_reservation(&self, _token: &str, id: i64) -> Result<(), ApiError> {
        self.record("cancel_reservation")?;
        let mut reservations = self.reservations.borrow_mut();
        let before = reservations.len();
        reservations.retain(|r| r.id != id);
        if reservations.len() == before {
            return Err(ApiError::from_status(404, "reservation not found"));
        }
        Ok(())
    }

    async fn create_payment_preference(&self, _preference: &PaymentPreference) -> Result<String, ApiError> {
        self.record("create_payment_preference")?;
        Ok("https://pay.example/checkout?pref=1".to_owned())
    }

    async fn reservations_csv(&self, _token: &str) -> Result<String, ApiError> {
        self.record("reservations_csv")?;
        Ok(self.csv.borrow().clone())
    }
}
