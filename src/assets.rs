use std::sync::Arc;

use crate::foundation::math::premultiply_rgba8_in_place;

/// Decode/encode between encoded bytes and RGBA8 rasters.
pub mod decode;
/// `data:` URL payloads.
pub mod embedded;

/// Decoded raster, ready for drawing.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Native size as floats, for transform math.
    pub fn size_f64(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}

/// Decoded raster in straight alpha, exactly as stored in the source file.
///
/// The base model image stays in this form so pixels no garment covers are written back
/// bit-for-bit.
#[derive(Clone, Debug)]
pub struct StraightImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight (non-premultiplied) RGBA8, row-major, tightly packed.
    pub rgba8: Arc<Vec<u8>>,
}

impl StraightImage {
    /// Premultiplied copy for rasterization.
    pub fn to_premultiplied(&self) -> PreparedImage {
        let mut rgba8_premul = self.rgba8.as_ref().clone();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        PreparedImage {
            width: self.width,
            height: self.height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }
}
