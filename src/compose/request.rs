use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    assets::embedded::EmbeddedImage,
    foundation::core::{SlotKey, View},
    foundation::error::DressResult,
    plan::source::{SourceKind, TransformSource},
};

/// One compositing request, as received from the request-handling layer.
///
/// Wire shape (camelCase JSON):
///
/// ```json
/// {
///   "view": "front",
///   "storeId": "shop-1",
///   "model": "data:image/png;base64,...",
///   "files": { "top_front": "data:image/png;base64,..." },
///   "transforms": { "top_front": { "x": 400, "y": 300, "s": 2, "r": 0, "o": 0.5 } },
///   "defaults": { "front": {}, "back": {} }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeRequest {
    /// `front` or `back`; anything else is treated as `front`.
    #[serde(default)]
    pub view: View,
    /// Opaque caller tag carried into logs and the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Base model image. Required at composite time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<EmbeddedImage>,
    /// Garment images keyed by slot-view key, e.g. `top_front`.
    #[serde(default)]
    pub files: BTreeMap<String, EmbeddedImage>,
    /// `transforms` and `defaults`, flattened into the request object.
    #[serde(flatten)]
    pub source: TransformSource,
}

impl CompositeRequest {
    /// Request with just a base image and the default (`front`) view.
    pub fn new(model: EmbeddedImage) -> Self {
        Self {
            model: Some(model),
            ..Self::default()
        }
    }

    /// Set the view.
    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Attach a garment under `key`.
    pub fn with_garment(mut self, key: SlotKey, image: EmbeddedImage) -> Self {
        self.files.insert(key.as_key(), image);
        self
    }

    /// Replace the transform source.
    pub fn with_source(mut self, source: TransformSource) -> Self {
        self.source = source;
        self
    }

    /// Parse the JSON wire shape.
    pub fn from_json_str(s: &str) -> DressResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a request JSON file.
    pub fn from_path(path: &Path) -> DressResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read request '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

/// Provenance report for one composite.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeReport {
    /// View the request was composited for.
    pub view: View,
    /// Caller tag copied from the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Which transform map served this request.
    pub source: SourceKind,
    /// Slot keys actually drawn, in draw order.
    pub drawn: Vec<SlotKey>,
    /// Planned slot keys with a garment but no transform record, in draw order.
    pub skipped: Vec<SlotKey>,
    /// Garment keys that were supplied but are not part of the plan, sorted.
    pub ignored: Vec<String>,
    /// Output width in pixels (the base image's width).
    pub width: u32,
    /// Output height in pixels (the base image's height).
    pub height: u32,
}

/// Flattened output image plus its report.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeResult {
    /// PNG-encoded output at the base image's native resolution.
    #[serde(rename = "imageDataUrl")]
    pub image: EmbeddedImage,
    /// What was drawn, skipped and ignored.
    pub report: CompositeReport,
}

impl CompositeResult {
    /// Raw PNG bytes of the output.
    pub fn png_bytes(&self) -> DressResult<Vec<u8>> {
        Ok(self.image.decode_bytes()?)
    }

    /// Pretty JSON with `imageDataUrl` and `report`.
    pub fn to_json_pretty(&self) -> DressResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/request.rs"]
mod tests;
