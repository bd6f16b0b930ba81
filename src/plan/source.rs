use std::collections::BTreeMap;

use crate::foundation::core::{SlotKey, View};
use crate::geometry::resolver::RawTransformRecord;

/// Slot-view key (wire form) to raw transform record.
pub type TransformMap = BTreeMap<String, RawTransformRecord>;

/// Per-view default transforms, keyed `front` / `back` on the wire.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DefaultTransforms {
    /// Used by `front` requests without a view-scoped map.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub front: TransformMap,
    /// Used by `back` requests without a view-scoped map.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub back: TransformMap,
}

impl DefaultTransforms {
    /// The default map for `view`.
    pub fn for_view(&self, view: View) -> &TransformMap {
        match view {
            View::Front => &self.front,
            View::Back => &self.back,
        }
    }

    /// True when neither view has defaults.
    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }
}

/// Where a request's transforms come from.
///
/// A non-empty view-scoped map always wins for the whole request; otherwise the default
/// map matching the request's view is used. The two are never mixed per slot.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformSource {
    /// Flat map keyed by slot-view key, e.g. `top_front`.
    #[serde(
        default,
        rename = "transforms",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub view_scoped: TransformMap,
    /// Fallback maps, consulted only when `view_scoped` is empty.
    #[serde(default, skip_serializing_if = "DefaultTransforms::is_empty")]
    pub defaults: DefaultTransforms,
}

/// Which map won for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// The request's own `transforms` map.
    ViewScoped,
    /// `defaults.front`.
    DefaultFront,
    /// `defaults.back`.
    DefaultBack,
    /// No transform data at all; every planned slot is skipped.
    None,
}

impl TransformSource {
    /// Source with only a view-scoped map.
    pub fn view_scoped(map: TransformMap) -> Self {
        Self {
            view_scoped: map,
            defaults: DefaultTransforms::default(),
        }
    }

    /// Source with only the front/back default pair.
    pub fn defaults(front: TransformMap, back: TransformMap) -> Self {
        Self {
            view_scoped: TransformMap::new(),
            defaults: DefaultTransforms { front, back },
        }
    }

    /// Pick the single map that serves every slot of a `view` request.
    pub fn resolve_map(&self, view: View) -> (Option<&TransformMap>, SourceKind) {
        if !self.view_scoped.is_empty() {
            return (Some(&self.view_scoped), SourceKind::ViewScoped);
        }
        let map = self.defaults.for_view(view);
        if map.is_empty() {
            return (None, SourceKind::None);
        }
        let kind = match view {
            View::Front => SourceKind::DefaultFront,
            View::Back => SourceKind::DefaultBack,
        };
        (Some(map), kind)
    }

    /// Look up the raw record for one slot key, or `None` when the slot must be skipped.
    pub fn select(&self, view: View, key: SlotKey) -> Option<&RawTransformRecord> {
        let (map, _) = self.resolve_map(view);
        map?.get(&key.as_key())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/source.rs"]
mod tests;
