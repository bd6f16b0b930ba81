//! Raw transform record normalization.
//!
//! The resolver is total: every field that is missing, non-numeric, or non-finite silently
//! takes its default, and no input ever produces an error.

use crate::foundation::core::{Affine, Anchor, Vec2};

/// Untyped transform record as supplied by the caller (`x`, `y`, `s`, `r`, `o`, `anchor`).
pub type RawTransformRecord = serde_json::Map<String, serde_json::Value>;

/// Canonical placement of one garment on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Transform {
    /// Canvas-space x of the garment's anchor point.
    pub offset_x: f64,
    /// Canvas-space y of the garment's anchor point.
    pub offset_y: f64,
    /// Uniform multiplier on the garment's native size. Always > 0.
    pub scale: f64,
    /// Clockwise rotation in degrees (y-down canvas).
    pub rotation_degrees: f64,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
    /// Point of the garment that lands on the offset.
    pub anchor: Anchor,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            rotation_degrees: 0.0,
            opacity: 1.0,
            anchor: Anchor::Center,
        }
    }
}

impl Transform {
    /// Map from garment-local pixel space (native `w` x `h`) to canvas space.
    ///
    /// Canonical order: `T(offset) * R(rotation) * S(scale) * T(-pivot)`, so rotation pivots
    /// around the placement point and the anchor lands exactly on `(offset_x, offset_y)`.
    pub fn placement(&self, native_w: f64, native_h: f64) -> Affine {
        let pivot = self.anchor.pivot(native_w, native_h);
        Affine::translate(Vec2::new(self.offset_x, self.offset_y))
            * Affine::rotate(self.rotation_degrees.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-pivot)
    }
}

/// Normalize an optional raw record into a canonical [`Transform`].
pub fn resolve(raw: Option<&RawTransformRecord>) -> Transform {
    let d = Transform::default();
    let Some(raw) = raw else {
        return d;
    };

    let scale = read_finite(raw, "s")
        .filter(|s| *s > 0.0)
        .unwrap_or(d.scale);
    let opacity = read_finite(raw, "o")
        .map(|o| o.clamp(0.0, 1.0))
        .unwrap_or(d.opacity);
    let anchor = raw
        .get("anchor")
        .and_then(|v| v.as_str())
        .map(Anchor::parse_lenient)
        .unwrap_or(d.anchor);

    Transform {
        offset_x: read_finite(raw, "x").unwrap_or(d.offset_x),
        offset_y: read_finite(raw, "y").unwrap_or(d.offset_y),
        scale,
        rotation_degrees: read_finite(raw, "r").unwrap_or(d.rotation_degrees),
        opacity,
        anchor,
    }
}

fn read_finite(raw: &RawTransformRecord, key: &str) -> Option<f64> {
    let v = match raw.get(key)? {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resolver.rs"]
mod tests;
