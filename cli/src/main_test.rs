use super::*;

#[test]
fn only_explicit_yes_confirms() {
    assert_eq!(decision_from_answer("y\n"), Decision::Confirmed);
    assert_eq!(decision_from_answer(" YES "), Decision::Confirmed);
    assert_eq!(decision_from_answer("\n"), Decision::Dismissed);
    assert_eq!(decision_from_answer("nope"), Decision::Dismissed);
}

#[test]
fn yes_flag_skips_the_prompt() {
    assert_eq!(confirm(true, "unused").unwrap(), Decision::Confirmed);
}

#[test]
fn room_fields_overlay_only_given_values() {
    let mut form = RoomForm { number: "10".to_owned(), price: "500".to_owned(), ..RoomForm::default() };
    RoomFields { price: Some("650".to_owned()), capacity: Some("2".to_owned()), ..RoomFields::default() }.apply(&mut form);
    assert_eq!(form.number, "10");
    assert_eq!(form.price, "650");
    assert_eq!(form.capacity, "2");
}

#[test]
fn room_type_accepts_wire_and_english_names() {
    assert_eq!(parse_room_type("doble"), Ok(RoomType::Double));
    assert_eq!(parse_room_type("Suite"), Ok(RoomType::Suite));
    assert!(parse_room_type("penthouse").is_err());
}

#[test]
fn reversed_stay_is_a_usage_error() {
    let stay = StayArgs {
        from: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
        to: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
    };
    assert!(matches!(stay_range(&stay), Err(CliError::Usage(_))));
}

#[test]
fn search_arguments_parse() {
    let cli = Cli::try_parse_from([
        "hotel-cli",
        "--base-url",
        "http://api.test",
        "search",
        "--destination",
        "Cancun",
        "--guests",
        "2",
        "--type",
        "triple",
        "--from",
        "2026-09-01",
        "--to",
        "2026-09-04",
    ])
    .unwrap();
    assert_eq!(cli.base_url, "http://api.test");
    let Command::Search(args) = cli.command else {
        panic!("expected search");
    };
    assert_eq!(args.guests, 2);
    assert_eq!(args.room_type, Some(RoomType::Triple));
    assert_eq!(args.to, NaiveDate::from_ymd_opt(2026, 9, 4).unwrap());
}

#[test]
fn cancel_requires_an_id() {
    assert!(Cli::try_parse_from(["hotel-cli", "reservations", "cancel"]).is_err());
}
