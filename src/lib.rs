//! dressd composites garment images over a base model image.
//!
//! The engine is deterministic: the same request and layer order always produce the same PNG
//! bytes. The public API is request-oriented:
//!
//! - Build or parse a [`CompositeRequest`]
//! - Run [`composite`] (or [`composite_batch`] for many requests)
//! - Read the PNG data URL and the [`CompositeReport`] from the [`CompositeResult`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Embedded image payloads and raster decode/encode.
pub mod assets;
/// Request/result types and the compositing pipeline.
pub mod compose;
/// Core value types and errors.
pub mod foundation;
/// Per-garment placement.
pub mod geometry;
/// Layer planning and transform-map selection.
pub mod plan;
/// Rasterization backends.
pub mod render;

pub use crate::foundation::core::{Affine, Anchor, Point, Slot, SlotKey, Vec2, View};
pub use crate::foundation::error::{DressError, DressResult};

pub use crate::assets::{PreparedImage, StraightImage};
pub use crate::assets::decode::{decode_image, decode_straight, encode_png};
pub use crate::assets::embedded::EmbeddedImage;
pub use crate::compose::batch::{BatchOpts, composite_batch};
pub use crate::compose::engine::{
    ComposeOpts, MAX_SIDE_PX, composite, composite_with_backend, composite_with_opts,
};
pub use crate::compose::request::{CompositeReport, CompositeRequest, CompositeResult};
pub use crate::geometry::resolver::{RawTransformRecord, Transform, resolve};
pub use crate::plan::layers::{LayerOrder, build_plan};
pub use crate::plan::source::{DefaultTransforms, SourceKind, TransformMap, TransformSource};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::cpu::CpuBackend;
