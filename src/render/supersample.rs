//! Supersampled icon rasterization.
//!
//! Every icon goes through the same stages: draw at `factor`× the target edge length into an
//! isolated transparent surface, optionally rotate about the centre (bicubic sampling, still at
//! the high resolution), downsample with a Lanczos3 filter, then alpha-composite onto the frame.

use image::imageops::FilterType;
use vello_cpu::kurbo as vk;
use vello_cpu::peniko::ImageQuality;

use crate::foundation::error::{HudError, HudResult};
use crate::render::frame::{flush_to_pixmap, pixmap_from_premul_bytes, pixmap_to_image};

/// Edge length of the normalized icon coordinate space.
const ICON_UNITS: f64 = 24.0;

/// Coordinate mapping for one supersampled icon surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct IconSpace {
    /// Supersampled edge length in pixels.
    pub(crate) size: f64,
    /// Supersample factor.
    pub(crate) factor: f64,
}

impl IconSpace {
    pub(crate) fn center(&self) -> vk::Point {
        vk::Point::new(self.size / 2.0, self.size / 2.0)
    }

    /// Pixels per unit of the 24-unit icon grid.
    pub(crate) fn unit(&self) -> f64 {
        self.size / ICON_UNITS
    }

    /// Map a point of the 24-unit grid (centre at 12,12) onto the surface.
    pub(crate) fn pt(&self, x: f64, y: f64) -> vk::Point {
        let c = self.size / 2.0;
        let u = self.unit();
        vk::Point::new(c + (x - 12.0) * u, c + (y - 12.0) * u)
    }

    /// Line width in surface pixels: `units` grid units, truncated, at least `min_px`.
    pub(crate) fn line_width(&self, units: f64, min_px: f64) -> f64 {
        (units * self.unit()).trunc().max(min_px)
    }
}

/// A downsampled icon ready to composite.
pub(crate) struct IconRaster {
    image: vello_cpu::Image,
    size: u32,
}

impl IconRaster {
    pub(crate) fn size(&self) -> u32 {
        self.size
    }

    /// Alpha-composite at integer pixel offset `(x, y)` of the frame.
    pub(crate) fn composite(&self, ctx: &mut vello_cpu::RenderContext, x: f64, y: f64) {
        let s = f64::from(self.size);
        ctx.set_transform(vk::Affine::translate((x.floor(), y.floor())));
        ctx.set_paint(self.image.clone());
        ctx.fill_rect(&vk::Rect::new(0.0, 0.0, s, s));
        ctx.set_transform(vk::Affine::IDENTITY);
    }
}

/// Run the supersample pipeline for one icon.
///
/// `rotate_deg` turns the icon clockwise on screen about its centre.
pub(crate) fn rasterize_icon(
    target_px: u32,
    factor: u32,
    rotate_deg: Option<f64>,
    draw: impl FnOnce(&mut vello_cpu::RenderContext, IconSpace),
) -> HudResult<IconRaster> {
    if target_px == 0 || factor == 0 {
        return Err(HudError::render("icon size and supersample factor must be > 0"));
    }
    let ss = target_px
        .checked_mul(factor)
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| HudError::render("supersampled icon size exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(ss, ss);
    let space = IconSpace {
        size: f64::from(ss),
        factor: f64::from(factor),
    };
    draw(&mut ctx, space);
    let mut pixmap = flush_to_pixmap(&mut ctx);

    if let Some(deg) = rotate_deg.filter(|d| d.is_finite() && *d != 0.0) {
        pixmap = rotate_about_center(pixmap, deg);
    }

    let bytes = downsample_premul(pixmap, u32::from(ss), target_px)?;
    let small = pixmap_from_premul_bytes(&bytes, target_px, target_px)?;
    Ok(IconRaster {
        image: pixmap_to_image(small, ImageQuality::Medium),
        size: target_px,
    })
}

fn rotate_about_center(src: vello_cpu::Pixmap, deg: f64) -> vello_cpu::Pixmap {
    let (w, h) = (src.width(), src.height());
    let center = vk::Point::new(f64::from(w) / 2.0, f64::from(h) / 2.0);
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vk::Affine::rotate_about(deg.to_radians(), center));
    ctx.set_paint(pixmap_to_image(src, ImageQuality::High));
    ctx.fill_rect(&vk::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
    flush_to_pixmap(&mut ctx)
}

/// Lanczos3 downsample of a square premultiplied surface.
///
/// Resampling in premultiplied space keeps transparent edges from bleeding dark fringes; the
/// filter's negative lobes can push a colour channel above alpha, so channels are clamped back.
fn downsample_premul(src: vello_cpu::Pixmap, from_px: u32, to_px: u32) -> HudResult<Vec<u8>> {
    let bytes = src.data_as_u8_slice().to_vec();
    if from_px == to_px {
        return Ok(bytes);
    }
    let img = image::RgbaImage::from_raw(from_px, from_px, bytes)
        .ok_or_else(|| HudError::render("icon surface byte len mismatch"))?;
    let mut out = image::imageops::resize(&img, to_px, to_px, FilterType::Lanczos3).into_raw();
    for px in out.chunks_exact_mut(4) {
        let a = px[3];
        px[0] = px[0].min(a);
        px[1] = px[1].min(a);
        px[2] = px[2].min(a);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/supersample.rs"]
mod tests;
