//! Access tiers and the single capability check every gated view uses.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use serde::{Deserialize, Serialize};

/// Access tier of the signed-in identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Guest,
    Admin,
    Analyst,
}

impl Role {
    /// Map the backend's `rol` string; anything unrecognized is a guest.
    #[must_use]
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_ascii_uppercase()).as_deref() {
            Some("ADMIN") => Self::Admin,
            Some("ANALYST") => Self::Analyst,
            _ => Self::Guest,
        }
    }

    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Guest => "GUEST",
            Self::Admin => "ADMIN",
            Self::Analyst => "ANALYST",
        }
    }

    #[must_use]
    pub fn can(self, capability: Capability) -> bool {
        matches!(
            (self, capability),
            (Self::Guest, Capability::BookRooms)
                | (Self::Admin, Capability::ManageRooms)
                | (Self::Analyst, Capability::ViewReports)
        )
    }
}

/// Operation families gated by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Search, reserve, pay, and manage own reservations.
    BookRooms,
    /// Room console: create, edit, delete rooms and see occupancy.
    ManageRooms,
    /// Reservation reports and charts.
    ViewReports,
}

/// Result of checking a capability against the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// No identity; send the user to the login view.
    LoginRequired,
    /// Signed in with a role that lacks the capability.
    Denied,
}

/// Decide access for an optional role.
#[must_use]
pub fn access_for(role: Option<Role>, capability: Capability) -> Access {
    match role {
        None => Access::LoginRequired,
        Some(role) if role.can(capability) => Access::Granted,
        Some(_) => Access::Denied,
    }
}
