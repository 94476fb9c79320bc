use booking::RoomType;
use booking::report::Report;
use chrono::NaiveDate;

use super::*;

fn room() -> Room {
    Room {
        id: 5,
        number: 12,
        room_type: RoomType::Triple,
        capacity: 3,
        price_per_night: 980.0,
        description: "Corner".to_owned(),
        image_url: String::new(),
    }
}

#[test]
fn room_line_shows_type_capacity_and_price() {
    let line = room_line(&room());
    assert!(line.starts_with("#5"), "{line}");
    assert!(line.contains("Triple"));
    assert!(line.contains("3 guest(s)"));
    assert!(line.ends_with("$980.00/night"));
}

#[test]
fn occupancy_is_bracketed() {
    assert!(room_with_occupancy(&room(), Some(Occupancy::Occupied)).ends_with("[Occupied]"));
    assert!(room_with_occupancy(&room(), None).ends_with("[-]"));
}

#[test]
fn reservation_line_has_stay_total() {
    let reservation = Reservation {
        id: 40,
        room: room(),
        start: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2026, 7, 3).unwrap(),
        user: None,
    };
    let line = reservation_line(&reservation);
    assert!(line.contains("2026-07-01 -> 2026-07-03"), "{line}");
    assert!(line.contains("2 night(s)"));
    assert!(line.ends_with("$1,960.00"));
}

#[test]
fn summary_lists_types_then_months() {
    let report = Report::parse("Tipo,Precio,Fecha Inicio\nsuite,$300,2026-04-02\nsimple,$100,2026-03-09\n").unwrap();
    let lines = summary_lines(&report.summary());
    assert_eq!(lines[0], "Reservations: 2");
    assert_eq!(lines[1], "Revenue:      $400.00");
    assert!(lines[3].trim_start().starts_with("simple"));
    assert!(lines[4].trim_start().starts_with("suite"));
    assert_eq!(lines[5], "By month:");
    assert_eq!(lines[6], "  2026-03  $100.00");
    assert_eq!(lines[7], "  2026-04  $300.00");
}
