//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (loading, submitting, routing
//! after success) and delegates rendering details to `components`. Gated
//! pages wrap their body in `RequireCapability` so the body, and the
//! requests it makes, only exist once access is granted.

pub mod admin_room;
pub mod admin_rooms;
pub mod analyst_charts;
pub mod analyst_table;
pub mod checkout;
pub mod edit_reservation;
pub mod home;
pub mod login;
pub mod not_found;
pub mod reservations;
pub mod results;
pub mod room_detail;
pub mod room_form;
