//! Plain-text receipt produced when a checkout completes.

#[cfg(test)]
#[path = "receipt_test.rs"]
mod receipt_test;

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::checkout::PaymentMethod;
use crate::model::{RoomType, format_money};

/// Summary of a paid, confirmed stay.
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    pub reservation_id: Option<i64>,
    pub room_number: i64,
    pub room_type: RoomType,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nights: i64,
    pub price_per_night: f64,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
}

impl Receipt {
    /// Render the receipt as a downloadable text document.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::from("Hotel reservation receipt\n=========================\n");
        if let Some(id) = self.reservation_id {
            let _ = writeln!(out, "Reservation:   #{id}");
        }
        let _ = writeln!(out, "Room:          {} ({})", self.room_number, self.room_type.label());
        let _ = writeln!(out, "Check-in:      {}", self.start);
        let _ = writeln!(out, "Check-out:     {}", self.end);
        let _ = writeln!(out, "Nights:        {}", self.nights);
        let _ = writeln!(out, "Nightly rate:  {}", format_money(self.price_per_night));
        let _ = writeln!(out, "Total:         {}", format_money(self.total));
        let _ = writeln!(out, "Paid with:     {}", self.payment_method.label());
        let _ = writeln!(out, "Payment ref:   {}", self.payment_reference);
        out
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        format!("receipt-room-{}-{}.txt", self.room_number, self.start)
    }
}
