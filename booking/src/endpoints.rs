//! REST paths consumed from the backend.
//!
//! Both transports (`gloo-net` in the browser, `reqwest` in the CLI) join
//! these onto the configured base URL, so path drift is caught in one place.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const ROOMS: &str = "/cuartos/listar";
pub const AVAILABLE_ROOMS: &str = "/cuartos/disponibles";
pub const ADMIN_ROOMS: &str = "/cuartos/admin/todos";
pub const ADMIN_OCCUPIED: &str = "/cuartos/admin/ocupado";
pub const ADMIN_CREATE_ROOM: &str = "/cuartos/admin/crear";
pub const RESERVATIONS: &str = "/reservaciones";
pub const MY_RESERVATIONS: &str = "/reservaciones/mias";
pub const PAYMENT_PREFERENCE: &str = "/pagos/crear-preferencia";
pub const REPORT_DOWNLOAD: &str = "/analyst/reservaciones/download";

/// Public room details.
#[must_use]
pub fn room(id: i64) -> String {
    format!("/cuartos/get/{id}")
}

/// Authenticated room read used by the admin console.
#[must_use]
pub fn admin_room(id: i64) -> String {
    format!("/cuartos/{id}")
}

#[must_use]
pub fn admin_update_room(id: i64) -> String {
    format!("/cuartos/admin/editar/{id}")
}

#[must_use]
pub fn admin_delete_room(id: i64) -> String {
    format!("/cuartos/admin/eliminar/{id}")
}

#[must_use]
pub fn update_reservation(id: i64) -> String {
    format!("/reservaciones/editar/{id}")
}

#[must_use]
pub fn cancel_reservation(id: i64) -> String {
    format!("{RESERVATIONS}/{id}")
}

/// Join a path onto a base URL, tolerating a trailing slash on the base.
#[must_use]
pub fn join(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}
