use std::sync::Arc;

use crate::foundation::error::{HudError, HudResult};
use crate::foundation::math::unpremultiply;

/// A rendered overlay frame as RGBA8 pixels.
///
/// Frames come out of the composer **premultiplied**; [`FrameRGBA::to_straight_rgba`] converts
/// for sinks that expect straight alpha (PNG, raw video overlays).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel bytes.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremultiply([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    /// Pixel at `(x, y)` as stored, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// `true` when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    pub(crate) fn from_pixmap(pixmap: &vello_cpu::Pixmap) -> Self {
        Self {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

pub(crate) fn rect_to_cpu(r: crate::foundation::core::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> HudResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| HudError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| HudError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(HudError::render("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

pub(crate) fn pixmap_to_image(
    pixmap: vello_cpu::Pixmap,
    quality: vello_cpu::peniko::ImageQuality,
) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler {
            quality,
            ..vello_cpu::peniko::ImageSampler::default()
        },
    }
}

/// Render everything recorded in `ctx` into a fresh pixmap of the context size.
pub(crate) fn flush_to_pixmap(ctx: &mut vello_cpu::RenderContext) -> vello_cpu::Pixmap {
    let mut pixmap = vello_cpu::Pixmap::new(ctx.width(), ctx.height());
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
