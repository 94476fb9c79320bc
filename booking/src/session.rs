//! Session identity and its durable key-value persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is written only by explicit login/logout and read by every
//! gated view and operation. It is passed around as a value; callers own the
//! storage backend (browser `localStorage`, a JSON file, or memory in tests).

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::BookingError;
use crate::model::{AuthResponse, Reservation};
use crate::role::{Access, Capability, Role, access_for};

pub const TOKEN_KEY: &str = "token";
pub const NAME_KEY: &str = "nombre";
pub const ROLE_KEY: &str = "rol";

/// Durable string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Signed-in identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub token: String,
    pub display_name: Option<String>,
    pub role: Role,
}

/// Current identity plus the reservation picked for editing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub identity: Option<Identity>,
    /// Transient; never persisted.
    pub selected_reservation: Option<Reservation>,
}

impl Session {
    /// Restore the identity from durable storage. Blank tokens count as absent.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let identity = store
            .get(TOKEN_KEY)
            .filter(|t| !t.trim().is_empty())
            .map(|token| Identity {
                token,
                display_name: store.get(NAME_KEY).filter(|n| !n.trim().is_empty()),
                role: Role::from_wire(store.get(ROLE_KEY).as_deref()),
            });
        Self { identity, selected_reservation: None }
    }

    /// Persist a successful login and make it the current identity.
    pub fn login(&mut self, store: &impl KeyValueStore, auth: AuthResponse) -> &Identity {
        let role = Role::from_wire(auth.role.as_deref());
        store.set(TOKEN_KEY, &auth.token);
        match auth.name.as_deref() {
            Some(name) => store.set(NAME_KEY, name),
            None => store.remove(NAME_KEY),
        }
        store.set(ROLE_KEY, role.as_wire());
        log::info!("signed in as {role:?}");
        self.selected_reservation = None;
        self.identity.insert(Identity { token: auth.token, display_name: auth.name, role })
    }

    /// Forget the identity both in memory and in storage.
    pub fn logout(&mut self, store: &impl KeyValueStore) {
        store.remove(TOKEN_KEY);
        store.remove(NAME_KEY);
        store.remove(ROLE_KEY);
        self.identity = None;
        self.selected_reservation = None;
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.token.as_str()).filter(|t| !t.is_empty())
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.token().and(self.identity.as_ref()).map(|i| i.role)
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.identity.as_ref().and_then(|i| i.display_name.as_deref())
    }

    #[must_use]
    pub fn access(&self, capability: Capability) -> Access {
        access_for(self.role(), capability)
    }

    /// Token for any authenticated call.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::LoginRequired`] when no token is present.
    pub fn require_token(&self) -> Result<&str, BookingError> {
        self.token().ok_or(BookingError::LoginRequired)
    }

    /// Token for a call gated on `capability`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::LoginRequired`] without a token and
    /// [`BookingError::Forbidden`] when the role lacks the capability.
    pub fn require(&self, capability: Capability) -> Result<&str, BookingError> {
        match self.access(capability) {
            Access::Granted => self.require_token(),
            Access::LoginRequired => Err(BookingError::LoginRequired),
            Access::Denied => Err(BookingError::Forbidden),
        }
    }
}
