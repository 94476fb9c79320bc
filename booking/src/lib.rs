//! Domain logic for the hotel booking client.
//!
//! This crate is UI-framework agnostic so both the Leptos browser client and
//! the terminal CLI drive the same search, reservation, checkout, room console
//! and reporting flows. Transport is abstracted behind [`api::HotelApi`];
//! identity is always passed in explicitly as a [`session::Session`].

pub mod admin;
pub mod api;
pub mod checkout;
pub mod endpoints;
pub mod error;
pub mod model;
pub mod receipt;
pub mod report;
pub mod reservations;
pub mod role;
pub mod search;
pub mod session;

#[cfg(test)]
mod fake_api;

pub use api::HotelApi;
pub use error::{ApiError, BookingError, FieldError, ValidationErrors};
pub use model::{DateRange, Decision, Reservation, Room, RoomType};
pub use role::{Access, Capability, Role};
pub use session::{Identity, KeyValueStore, MemoryStore, Session};
