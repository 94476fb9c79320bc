use super::*;

#[test]
fn numeric_ids_parse() {
    assert_eq!(route_id(Some("42".to_owned())), Some(42));
    assert_eq!(route_id(Some(" 7 ".to_owned())), Some(7));
}

#[test]
fn missing_or_bad_ids_are_rejected() {
    assert_eq!(route_id(None), None);
    assert_eq!(route_id(Some("abc".to_owned())), None);
    assert_eq!(route_id(Some("-3".to_owned())), None);
}
