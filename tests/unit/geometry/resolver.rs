use super::*;
use crate::foundation::core::Point;

fn record(v: serde_json::Value) -> RawTransformRecord {
    v.as_object().unwrap().clone()
}

fn assert_close(a: Point, b: Point) {
    assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
}

#[test]
fn absent_record_is_all_defaults() {
    let t = resolve(None);
    assert_eq!(t, Transform::default());
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.opacity, 1.0);
    assert_eq!(t.anchor, Anchor::Center);
}

#[test]
fn present_fields_pass_through_and_missing_default() {
    let raw = record(serde_json::json!({ "x": 400, "y": 300.5, "o": 0.25 }));
    let t = resolve(Some(&raw));
    assert_eq!(t.offset_x, 400.0);
    assert_eq!(t.offset_y, 300.5);
    assert_eq!(t.opacity, 0.25);
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.rotation_degrees, 0.0);
}

#[test]
fn numeric_strings_are_accepted() {
    let raw = record(serde_json::json!({ "x": " 12.5 ", "s": "2", "r": "-45" }));
    let t = resolve(Some(&raw));
    assert_eq!(t.offset_x, 12.5);
    assert_eq!(t.scale, 2.0);
    assert_eq!(t.rotation_degrees, -45.0);
}

#[test]
fn garbage_fields_degrade_to_defaults() {
    let raw = record(serde_json::json!({
        "x": "left",
        "y": null,
        "s": { "v": 2 },
        "r": [90],
        "o": true,
        "anchor": 7
    }));
    assert_eq!(resolve(Some(&raw)), Transform::default());
}

#[test]
fn non_finite_strings_degrade_to_defaults() {
    let raw = record(serde_json::json!({ "x": "NaN", "y": "inf", "r": "-infinity" }));
    let t = resolve(Some(&raw));
    assert_eq!(t.offset_x, 0.0);
    assert_eq!(t.offset_y, 0.0);
    assert_eq!(t.rotation_degrees, 0.0);
}

#[test]
fn non_positive_scale_falls_back_and_opacity_clamps() {
    let raw = record(serde_json::json!({ "s": 0, "o": 1.7 }));
    let t = resolve(Some(&raw));
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.opacity, 1.0);

    let raw = record(serde_json::json!({ "s": -3, "o": -0.2 }));
    let t = resolve(Some(&raw));
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.opacity, 0.0);
}

#[test]
fn unknown_anchor_resolves_to_center() {
    let raw = record(serde_json::json!({ "anchor": "bottom-left" }));
    assert_eq!(resolve(Some(&raw)).anchor, Anchor::Center);
}

#[test]
fn placement_maps_center_to_offset() {
    let t = Transform {
        offset_x: 40.0,
        offset_y: 30.0,
        scale: 2.0,
        ..Transform::default()
    };
    let a = t.placement(20.0, 20.0);
    assert_close(a * Point::new(10.0, 10.0), Point::new(40.0, 30.0));
    assert_close(a * Point::new(0.0, 0.0), Point::new(20.0, 10.0));
    assert_close(a * Point::new(20.0, 20.0), Point::new(60.0, 50.0));
}

#[test]
fn rotation_pivots_clockwise_around_placement_point() {
    let t = Transform {
        offset_x: 100.0,
        offset_y: 100.0,
        rotation_degrees: 90.0,
        ..Transform::default()
    };
    let a = t.placement(20.0, 10.0);
    // Center stays on the placement point.
    assert_close(a * Point::new(10.0, 5.0), Point::new(100.0, 100.0));
    // Local +x (right edge) turns to canvas +y (down): clockwise on a y-down canvas.
    assert_close(a * Point::new(20.0, 5.0), Point::new(100.0, 110.0));
    // Native top-left corner.
    assert_close(a * Point::new(0.0, 0.0), Point::new(105.0, 90.0));
}
