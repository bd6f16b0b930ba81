use std::sync::Arc;

use crate::{
    assets::{PreparedImage, StraightImage},
    foundation::core::Affine,
    foundation::error::{DressError, DressResult},
    foundation::math::{mul_div255_u8, unpremultiply_rgba8_in_place},
    render::backend::{FrameRGBA, RenderBackend},
};

/// `vello_cpu`-based backend.
///
/// Each layer is rasterized onto a cleared, transparent layer surface and then blended
/// over the canvas. The straight-alpha base is kept next to the canvas together with a
/// coverage mask, and readback emits the original base bytes for every pixel no layer
/// reached.
pub struct CpuBackend {
    surface: Option<CpuSurface>,
    ctx: Option<vello_cpu::RenderContext>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    base: Arc<Vec<u8>>,
    canvas: vello_cpu::Pixmap,
    layer: vello_cpu::Pixmap,
    covered: Vec<bool>,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field(
                "surface",
                &self.surface.as_ref().map(|s| (s.width, s.height)),
            )
            .finish()
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBackend {
    /// Backend with no surface; the first `begin` allocates one.
    pub fn new() -> Self {
        Self {
            surface: None,
            ctx: None,
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> DressResult<R>,
    ) -> DressResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

impl RenderBackend for CpuBackend {
    fn begin(&mut self, base: &StraightImage) -> DressResult<()> {
        let (width, height) = surface_dims(base.width, base.height, "canvas")?;
        let premul = base.to_premultiplied();
        let canvas = pixmap_from_premul_bytes(&premul.rgba8_premul, base.width, base.height)?;

        match self.surface.as_mut() {
            Some(s) if s.width == width && s.height == height => {
                s.base = Arc::clone(&base.rgba8);
                s.canvas = canvas;
                s.covered.fill(false);
            }
            _ => {
                self.surface = Some(CpuSurface {
                    width,
                    height,
                    base: Arc::clone(&base.rgba8),
                    canvas,
                    layer: vello_cpu::Pixmap::new(width, height),
                    covered: vec![false; usize::from(width) * usize::from(height)],
                });
            }
        }
        Ok(())
    }

    fn draw_layer(
        &mut self,
        image: &PreparedImage,
        transform: Affine,
        opacity: f32,
    ) -> DressResult<()> {
        if opacity <= 0.0 {
            return Ok(());
        }
        surface_dims(image.width, image.height, "garment")?;

        let mut surface = self
            .surface
            .take()
            .ok_or_else(|| DressError::validation("draw_layer called before begin"))?;

        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        let (w, h) = image.size_f64();

        clear_pixmap_to_transparent(&mut surface.layer);
        let drawn = self.with_ctx_mut(surface.width, surface.height, |ctx| {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
            ctx.flush();
            ctx.render_to_pixmap(&mut surface.layer);
            Ok(())
        });
        let blended = drawn.and_then(|()| {
            premul_over_in_place_opacity(
                surface.canvas.data_as_u8_slice_mut(),
                surface.layer.data_as_u8_slice(),
                &mut surface.covered,
                opacity,
            )
        });
        self.surface = Some(surface);
        blended
    }

    fn readback_rgba8(&mut self) -> DressResult<FrameRGBA> {
        let s = self
            .surface
            .as_ref()
            .ok_or_else(|| DressError::validation("readback before begin"))?;

        let mut data = s.base.as_ref().clone();
        for ((out, px), &hit) in data
            .chunks_exact_mut(4)
            .zip(s.canvas.data_as_u8_slice().chunks_exact(4))
            .zip(&s.covered)
        {
            if hit {
                out.copy_from_slice(px);
                unpremultiply_rgba8_in_place(out);
            }
        }

        Ok(FrameRGBA {
            width: u32::from(s.width),
            height: u32::from(s.height),
            data,
            premultiplied: false,
        })
    }
}

/// Premultiplied source-over of a whole layer at `opacity`, recording which canvas pixels
/// changed in `covered`.
fn premul_over_in_place_opacity(
    dst: &mut [u8],
    src: &[u8],
    covered: &mut [bool],
    opacity: f32,
) -> DressResult<()> {
    if dst.len() != src.len() || dst.len() != covered.len() * 4 {
        return Err(DressError::validation(
            "layer blend expects equal-length rgba8 buffers",
        ));
    }
    let op = ((opacity.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    if op == 0 {
        return Ok(());
    }

    for ((d, s), hit) in dst
        .chunks_exact_mut(4)
        .zip(src.chunks_exact(4))
        .zip(covered.iter_mut())
    {
        let sa = mul_div255_u8(u16::from(s[3]), op);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);

        d[3] = sa.saturating_add(mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            let sc = mul_div255_u8(u16::from(s[c]), op);
            let dc = mul_div255_u8(u16::from(d[c]), inv);
            d[c] = sc.saturating_add(dc);
        }
        *hit = true;
    }
    Ok(())
}

fn surface_dims(width: u32, height: u32, what: &str) -> DressResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| DressError::validation(format!("{what} width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| DressError::validation(format!("{what} height {height} exceeds u16")))?;
    if w == 0 || h == 0 {
        return Err(DressError::validation(format!("{what} has zero area")));
    }
    Ok((w, h))
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> DressResult<vello_cpu::Pixmap> {
    let (w, h) = surface_dims(width, height, "pixmap")?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(DressError::validation("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
