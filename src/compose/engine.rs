use crate::{
    assets::decode::{decode_image, decode_straight, encode_png},
    assets::{PreparedImage, StraightImage},
    assets::embedded::EmbeddedImage,
    compose::request::{CompositeReport, CompositeRequest, CompositeResult},
    foundation::core::SlotKey,
    foundation::error::{DressError, DressResult},
    geometry::resolver::resolve,
    plan::layers::{LayerOrder, build_plan},
    render::backend::RenderBackend,
    render::cpu::CpuBackend,
};

/// Largest canvas or garment side the rasterizer accepts.
pub const MAX_SIDE_PX: u32 = u16::MAX as u32;

/// Engine-level limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposeOpts {
    /// Reject any embedded image whose textual payload is longer than this.
    pub max_payload_bytes: usize,
}

impl ComposeOpts {
    /// 25 MiB, the request body limit of the service that feeds the engine.
    pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 25 * 1024 * 1024;

    /// Defaults, with `DRESSD_MAX_PAYLOAD_BYTES` applied when it parses as a positive integer.
    pub fn from_env() -> Self {
        let max_payload_bytes = std::env::var("DRESSD_MAX_PAYLOAD_BYTES")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(Self::DEFAULT_MAX_PAYLOAD_BYTES);
        Self { max_payload_bytes }
    }
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            max_payload_bytes: Self::DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

/// Composite `request` with default options on a fresh CPU backend.
pub fn composite(request: &CompositeRequest, order: &LayerOrder) -> DressResult<CompositeResult> {
    composite_with_opts(request, order, &ComposeOpts::default())
}

/// Composite `request` with explicit limits on a fresh CPU backend.
pub fn composite_with_opts(
    request: &CompositeRequest,
    order: &LayerOrder,
    opts: &ComposeOpts,
) -> DressResult<CompositeResult> {
    let mut backend = CpuBackend::new();
    composite_with_backend(request, order, opts, &mut backend)
}

/// Draw every planned garment over the base model and encode the result.
///
/// Pipeline:
/// 1. decode the base; the canvas takes its native size
/// 2. [`build_plan`] over `order`
/// 3. per slot: select a transform record (none -> skipped), [`resolve`] it, decode the
///    garment (failure aborts the request), draw it
/// 4. encode to a PNG data URL
///
/// Either a complete composite or an error is returned, never a partial image.
#[tracing::instrument(
    skip_all,
    fields(view = %request.view, store_id = request.store_id.as_deref().unwrap_or("-"))
)]
pub fn composite_with_backend(
    request: &CompositeRequest,
    order: &LayerOrder,
    opts: &ComposeOpts,
    backend: &mut dyn RenderBackend,
) -> DressResult<CompositeResult> {
    let view = request.view;
    let model = request
        .model
        .as_ref()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| DressError::input("model image missing"))?;
    let base = decode_base(model, opts)?;
    backend.begin(&base)?;

    let plan = build_plan(view, order, request.files.keys().map(String::as_str));
    let (_, source) = request.source.resolve_map(view);
    tracing::debug!(planned = plan.len(), ?source, "layer plan built");

    let mut drawn = Vec::with_capacity(plan.len());
    let mut skipped = Vec::new();
    for &key in &plan {
        let Some(raw) = request.source.select(view, key) else {
            tracing::debug!(slot = %key, "no transform record; skipping slot");
            skipped.push(key);
            continue;
        };
        let transform = resolve(Some(raw));

        let payload = request
            .files
            .get(&key.as_key())
            .ok_or_else(|| DressError::decode(key.as_key(), "garment image missing"))?;
        let garment = decode_garment(key, payload, opts)?;
        let (w, h) = garment.size_f64();

        tracing::trace!(slot = %key, ?transform, "drawing garment");
        backend.draw_layer(&garment, transform.placement(w, h), transform.opacity as f32)?;
        drawn.push(key);
    }

    let frame = backend.readback_rgba8()?;
    let png = encode_png(&frame)?;

    let ignored = request
        .files
        .keys()
        .filter(|k| !plan.iter().any(|p| p.as_key() == **k))
        .cloned()
        .collect();

    tracing::info!(
        drawn = drawn.len(),
        skipped = skipped.len(),
        width = frame.width,
        height = frame.height,
        "composite done"
    );

    Ok(CompositeResult {
        image: EmbeddedImage::from_png_bytes(&png),
        report: CompositeReport {
            view,
            store_id: request.store_id.clone(),
            source,
            drawn,
            skipped,
            ignored,
            width: frame.width,
            height: frame.height,
        },
    })
}

fn decode_base(model: &EmbeddedImage, opts: &ComposeOpts) -> DressResult<StraightImage> {
    if model.len() > opts.max_payload_bytes {
        return Err(DressError::input(format!(
            "model image payload of {} bytes exceeds limit of {}",
            model.len(),
            opts.max_payload_bytes
        )));
    }
    let bytes = model
        .decode_bytes()
        .map_err(|e| DressError::input(format!("model image: {e:#}")))?;
    let img =
        decode_straight(&bytes).map_err(|e| DressError::input(format!("model image: {e}")))?;
    if img.width > MAX_SIDE_PX || img.height > MAX_SIDE_PX {
        return Err(DressError::input(format!(
            "model image {}x{} exceeds {MAX_SIDE_PX}px per side",
            img.width, img.height
        )));
    }
    Ok(img)
}

fn decode_garment(
    key: SlotKey,
    payload: &EmbeddedImage,
    opts: &ComposeOpts,
) -> DressResult<PreparedImage> {
    if payload.len() > opts.max_payload_bytes {
        return Err(DressError::decode(
            key.as_key(),
            format!(
                "payload of {} bytes exceeds limit of {}",
                payload.len(),
                opts.max_payload_bytes
            ),
        ));
    }
    let bytes = payload
        .decode_bytes()
        .map_err(|e| DressError::decode(key.as_key(), format!("{e:#}")))?;
    let img = decode_image(&bytes).map_err(|e| DressError::decode(key.as_key(), e.to_string()))?;
    if img.width > MAX_SIDE_PX || img.height > MAX_SIDE_PX {
        return Err(DressError::decode(
            key.as_key(),
            format!(
                "garment {}x{} exceeds {MAX_SIDE_PX}px per side",
                img.width, img.height
            ),
        ));
    }
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/engine.rs"]
mod tests;
