use super::*;

#[test]
fn view_parse_falls_back_to_front() {
    assert_eq!(View::parse_lenient("back"), View::Back);
    assert_eq!(View::parse_lenient(" BACK "), View::Back);
    assert_eq!(View::parse_lenient("front"), View::Front);
    assert_eq!(View::parse_lenient("side"), View::Front);
    assert_eq!(View::parse_lenient(""), View::Front);
}

#[test]
fn view_deserialize_is_lenient() {
    let v: View = serde_json::from_str("\"back\"").unwrap();
    assert_eq!(v, View::Back);
    let v: View = serde_json::from_str("\"sideways\"").unwrap();
    assert_eq!(v, View::Front);
    let v: View = serde_json::from_str("null").unwrap();
    assert_eq!(v, View::Front);
    let v: View = serde_json::from_str("3").unwrap();
    assert_eq!(v, View::Front);
}

#[test]
fn slot_key_format_and_parse() {
    let k = Slot::Top.key(View::Front);
    assert_eq!(k.to_string(), "top_front");
    assert_eq!(SlotKey::parse("shoes_back"), Some(Slot::Shoes.key(View::Back)));
    assert_eq!(SlotKey::parse("top_side"), None);
    assert_eq!(SlotKey::parse("cape_front"), None);
    assert_eq!(SlotKey::parse("top"), None);
    assert_eq!(SlotKey::parse("Top_front"), None);
}

#[test]
fn slot_key_serializes_as_string() {
    let k = Slot::Earring.key(View::Back);
    assert_eq!(serde_json::to_string(&k).unwrap(), "\"earring_back\"");
    let back: SlotKey = serde_json::from_str("\"earring_back\"").unwrap();
    assert_eq!(back, k);
    assert!(serde_json::from_str::<SlotKey>("\"nope\"").is_err());
}

#[test]
fn every_slot_roundtrips_by_name() {
    for s in Slot::ALL {
        assert_eq!(Slot::from_name(s.as_str()), Some(s));
    }
}

#[test]
fn anchor_is_always_center() {
    assert_eq!(Anchor::parse_lenient("top-left"), Anchor::Center);
    assert_eq!(Anchor::Center.pivot(20.0, 10.0), Vec2::new(10.0, 5.0));
}
