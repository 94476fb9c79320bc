//! Plain-text rendering of booking records for the terminal.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use booking::admin::Occupancy;
use booking::model::format_money;
use booking::report::ReportSummary;
use booking::{Reservation, Room};

pub fn room_line(room: &Room) -> String {
    format!(
        "#{:<4} room {:<5} {:<7} {:>2} guest(s)  {}/night",
        room.id,
        room.number,
        room.room_type.label(),
        room.capacity,
        format_money(room.price_per_night)
    )
}

pub fn room_with_occupancy(room: &Room, occupancy: Option<Occupancy>) -> String {
    let state = occupancy.map_or("-", Occupancy::label);
    format!("{}  [{state}]", room_line(room))
}

pub fn reservation_line(reservation: &Reservation) -> String {
    format!(
        "#{:<4} {} {:<5} {} -> {}  {} night(s)  {}",
        reservation.id,
        reservation.room.room_type.label(),
        reservation.room.number,
        reservation.start,
        reservation.end,
        reservation.nights(),
        format_money(reservation.total())
    )
}

pub fn summary_lines(summary: &ReportSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Reservations: {}", summary.reservations),
        format!("Revenue:      {}", format_money(summary.revenue)),
        "By room type:".to_owned(),
    ];
    for (room_type, count) in &summary.count_by_type {
        let revenue = summary.revenue_by_type.get(room_type).copied().unwrap_or(0.0);
        let average = summary.average_for(room_type).unwrap_or(0.0);
        lines.push(format!(
            "  {room_type:<12} {count:>4}  {}  avg {}",
            format_money(revenue),
            format_money(average)
        ));
    }
    lines.push("By month:".to_owned());
    for (month, revenue) in &summary.revenue_by_month {
        lines.push(format!("  {month}  {}", format_money(*revenue)));
    }
    lines
}
