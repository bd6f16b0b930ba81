use crate::{
    assets::{PreparedImage, StraightImage},
    foundation::core::Affine,
    foundation::error::DressResult,
};

/// A rendered frame.
///
/// The `premultiplied` flag states the alpha convention of `data` explicitly at API
/// boundaries; encoders convert as needed.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Layered raster target used by the compositor.
///
/// A backend is driven as `begin` -> zero or more `draw_layer` -> `readback_rgba8`. Every
/// layer is drawn with its own transform and opacity; nothing carries over between layers.
pub trait RenderBackend {
    /// Reset the canvas to exactly `base`, at its native size.
    fn begin(&mut self, base: &StraightImage) -> DressResult<()>;

    /// Draw `image` (native pixel space) through `transform`, blended at `opacity`.
    fn draw_layer(
        &mut self,
        image: &PreparedImage,
        transform: Affine,
        opacity: f32,
    ) -> DressResult<()>;

    /// Copy out the current canvas. Pixels no layer touched match the base exactly.
    fn readback_rgba8(&mut self) -> DressResult<FrameRGBA>;
}
