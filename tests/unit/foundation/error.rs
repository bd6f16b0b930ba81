use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(DressError::input("x").to_string().contains("input error:"));
    assert!(
        DressError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        DressError::Serde("x".to_string())
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn decode_error_names_the_slot() {
    let err = DressError::decode("top_front", "bad png");
    assert_eq!(err.slot(), Some("top_front"));
    let msg = err.to_string();
    assert!(msg.contains("top_front"));
    assert!(msg.contains("bad png"));
    assert_eq!(DressError::input("x").slot(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DressError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: DressError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, DressError::Serde(_)));
}
