//! Wire records exchanged verbatim with the REST backend.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON (`numero`, `tipo`, `fechaInicio`, ...)
//! through serde renames, while Rust code uses English names. The client
//! holds no authoritative state; these are plain snapshots.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FieldError;

/// Kind of room; wire values are `simple`, `doble`, `triple` and `suite`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "simple")]
    Simple,
    #[serde(rename = "doble", alias = "double")]
    Double,
    #[serde(rename = "triple")]
    Triple,
    #[serde(rename = "suite")]
    Suite,
}

impl RoomType {
    pub const ALL: [Self; 4] = [Self::Simple, Self::Double, Self::Triple, Self::Suite];

    /// Backend value used in payloads and query strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Double => "doble",
            Self::Triple => "triple",
            Self::Suite => "suite",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Double => "Double",
            Self::Triple => "Triple",
            Self::Suite => "Suite",
        }
    }

    /// Parse a backend value or label, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "doble" | "double" => Some(Self::Double),
            "triple" => Some(Self::Triple),
            "suite" => Some(Self::Suite),
            _ => None,
        }
    }
}

/// A bookable room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    #[serde(rename = "numero")]
    pub number: i64,
    #[serde(rename = "tipo")]
    pub room_type: RoomType,
    #[serde(rename = "capacidad")]
    pub capacity: u32,
    #[serde(rename = "precio")]
    pub price_per_night: f64,
    #[serde(rename = "descripcion", default, deserialize_with = "string_or_null")]
    pub description: String,
    #[serde(rename = "imagenUrl", default, deserialize_with = "string_or_null")]
    pub image_url: String,
}

/// Create/edit payload for a room; everything but the id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomDraft {
    #[serde(rename = "numero")]
    pub number: i64,
    #[serde(rename = "tipo")]
    pub room_type: RoomType,
    #[serde(rename = "capacidad")]
    pub capacity: u32,
    #[serde(rename = "precio")]
    pub price_per_night: f64,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "imagenUrl")]
    pub image_url: String,
}

/// Inclusive start, exclusive end; `start < end` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "fechaInicio")]
    start: NaiveDate,
    #[serde(rename = "fechaFin")]
    end: NaiveDate,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns a `dates` field error unless `start < end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FieldError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(FieldError::new("dates", "The end date must be after the start date."))
        }
    }

    /// Default search window: today through five days from now.
    #[must_use]
    pub fn default_from(today: NaiveDate) -> Self {
        let end = today.checked_add_days(Days::new(5)).unwrap_or(NaiveDate::MAX);
        Self { start: today, end }
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn nights(&self) -> i64 {
        stay_nights(self.start, self.end)
    }
}

/// Number of nights between two dates: `ceil((end - start) / 1 day)`.
///
/// Dates carry no time of day, so the difference is always whole days and the
/// ceiling is exact. Zero or negative means the stay is invalid.
#[must_use]
pub fn stay_nights(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// A booking of one room for a date range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    #[serde(rename = "cuarto")]
    pub room: Room,
    #[serde(rename = "fechaInicio", deserialize_with = "lenient_date")]
    pub start: NaiveDate,
    #[serde(rename = "fechaFin", deserialize_with = "lenient_date")]
    pub end: NaiveDate,
    /// Owner reference as sent by the backend; opaque to the client.
    #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

impl Reservation {
    #[must_use]
    pub fn nights(&self) -> i64 {
        stay_nights(self.start, self.end)
    }

    /// Stay cost at the room's current nightly price.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total(&self) -> f64 {
        self.room.price_per_night * self.nights() as f64
    }
}

/// Body of `POST /reservaciones`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewReservation {
    #[serde(rename = "cuartoId")]
    pub room_id: i64,
    #[serde(flatten)]
    pub range: DateRange,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Response of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "rol", default)]
    pub role: Option<String>,
}

/// Body of `POST /pagos/crear-preferencia` for the hosted checkout.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentPreference {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "precio")]
    pub unit_price: f64,
}

/// Outcome of a destructive-action confirmation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Dismissed,
}

/// Parse a `YYYY-MM-DD` date, tolerating a trailing time component.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Format an amount as `$1,234.50`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date `{raw}`")))
}
