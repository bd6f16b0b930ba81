use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context;

use crate::{
    DressResult,
    assets::{PreparedImage, StraightImage},
    foundation::error::DressError,
    foundation::math::unpremultiply_rgba8_in_place,
    render::backend::FrameRGBA,
};

/// Decode encoded image bytes (format sniffed from content) to straight RGBA8.
pub fn decode_straight(bytes: &[u8]) -> DressResult<StraightImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DressError::validation("decoded image has zero area"));
    }

    Ok(StraightImage {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

/// Decode encoded image bytes (format sniffed from content) to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> DressResult<PreparedImage> {
    Ok(decode_straight(bytes)?.to_premultiplied())
}

/// Encode a frame as PNG bytes (straight alpha on disk).
///
/// Premultiplied frames are converted first; straight frames are written as-is.
pub fn encode_png(frame: &FrameRGBA) -> DressResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(DressError::validation(format!(
            "png encode expects {expected} bytes, got {}",
            frame.data.len()
        )));
    }

    let mut straight = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut straight);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| DressError::validation("png encode buffer does not match dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
