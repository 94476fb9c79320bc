//! Networking: the browser transport for the booking flows.

pub mod api;
