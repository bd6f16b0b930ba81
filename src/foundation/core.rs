use std::fmt;

pub use kurbo::{Affine, Point, Vec2};

/// Which side of the subject is being composited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Front view. Also the fallback for anything unrecognized.
    #[default]
    Front,
    /// Back view.
    Back,
}

impl View {
    /// Parse a view selector; anything other than `back` is `Front`.
    ///
    /// Matching is deliberately wider than the wire contract: surrounding whitespace and
    /// letter case are ignored, so `" BACK "` also selects the back view.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("back") {
            Self::Back
        } else {
            Self::Front
        }
    }

    /// Lowercase wire name, also used as the slot-key suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for View {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string selectors (null, numbers) degrade to the default view.
        let v = serde_json::Value::deserialize(deserializer)?;
        Ok(v.as_str().map(Self::parse_lenient).unwrap_or_default())
    }
}

/// Semantic garment category with a fixed place in the draw order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Footwear, drawn first.
    Shoes,
    /// Trousers, skirts.
    Bottom,
    /// Shirts, blouses.
    Top,
    /// Jackets and coats, over the top.
    Outer,
    /// Bags.
    Bag,
    /// Necklaces.
    Necklace,
    /// Bracelets.
    Bracelet,
    /// Rings.
    Ring,
    /// Earrings.
    Earring,
    /// Hats, drawn last.
    Hat,
}

impl Slot {
    /// Every slot, back-to-front.
    pub const ALL: [Self; 10] = [
        Self::Shoes,
        Self::Bottom,
        Self::Top,
        Self::Outer,
        Self::Bag,
        Self::Necklace,
        Self::Bracelet,
        Self::Ring,
        Self::Earring,
        Self::Hat,
    ];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shoes => "shoes",
            Self::Bottom => "bottom",
            Self::Top => "top",
            Self::Outer => "outer",
            Self::Bag => "bag",
            Self::Necklace => "necklace",
            Self::Bracelet => "bracelet",
            Self::Ring => "ring",
            Self::Earring => "earring",
            Self::Hat => "hat",
        }
    }

    /// Exact-match lookup by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// View-qualified key for this slot.
    pub fn key(self, view: View) -> SlotKey {
        SlotKey { slot: self, view }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<slot>_<view>` key, e.g. `top_front`.
///
/// Used both to look up a garment image and to look up that garment's transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    /// Garment category.
    pub slot: Slot,
    /// View the garment image belongs to.
    pub view: View,
}

impl SlotKey {
    /// Parse `<slot>_<view>`. Both halves must match exactly.
    pub fn parse(s: &str) -> Option<Self> {
        let (slot, view) = s.rsplit_once('_')?;
        let slot = Slot::from_name(slot)?;
        let view = match view {
            "front" => View::Front,
            "back" => View::Back,
            _ => return None,
        };
        Some(Self { slot, view })
    }

    /// Owned wire form of the key.
    pub fn as_key(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.slot.as_str(), self.view.as_str())
    }
}

impl serde::Serialize for SlotKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for SlotKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid slot key '{s}'")))
    }
}

/// Reference point within a garment's bounding box used for placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Middle of the garment's box.
    #[default]
    Center,
}

impl Anchor {
    /// Parse an anchor name; unknown names resolve to `Center`.
    pub fn parse_lenient(_s: &str) -> Self {
        // `center` is the only anchor with defined placement behavior.
        Self::Center
    }

    /// Pivot inside a `w` x `h` box, in the box's local pixel space.
    pub fn pivot(self, w: f64, h: f64) -> Vec2 {
        match self {
            Self::Center => Vec2::new(w / 2.0, h / 2.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
