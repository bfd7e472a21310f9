use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{HudError, HudResult};

/// Speed readout.
pub const FONT_SIZE_SPEED: f32 = 34.0;
/// Location tag.
pub const FONT_SIZE_LOCATION: f32 = 24.0;
/// Gear letter.
pub const FONT_SIZE_GEAR: f32 = 20.0;
/// Unit label under the speed.
pub const FONT_SIZE_UNIT: f32 = 11.0;

/// System font files tried, in order, by [`FontSource::discover`].
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
];

/// Bounding box of a laid-out single-line string, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    /// Advance width.
    pub width: f64,
    /// Line height.
    pub height: f64,
}

/// Text measurement and drawing used by the HUD painters.
///
/// `draw` places the top-left corner of the text's line box at `origin`.
pub trait TextPainter {
    /// Measure `text` at `size_px`.
    fn measure(&mut self, text: &str, size_px: f32) -> HudResult<TextExtent>;

    /// Draw `text` at `size_px` in `color`.
    fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        size_px: f32,
        origin: Point,
        color: Rgba8,
    ) -> HudResult<()>;
}

/// Raw font file bytes plus where they came from.
#[derive(Clone, Debug)]
pub struct FontSource {
    bytes: Arc<Vec<u8>>,
    origin: Option<PathBuf>,
}

impl FontSource {
    /// Wrap in-memory font bytes (TTF/OTF/TTC).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            origin: None,
        }
    }

    /// Read a font file.
    pub fn from_path(path: impl AsRef<Path>) -> HudResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| HudError::font(format!("read font '{}': {e}", path.display())))?;
        if bytes.is_empty() {
            return Err(HudError::font(format!("font '{}' is empty", path.display())));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            origin: Some(path.to_path_buf()),
        })
    }

    /// First readable font among the well-known system locations.
    pub fn discover() -> HudResult<Self> {
        let candidates: Vec<PathBuf> = FONT_CANDIDATES.iter().map(PathBuf::from).collect();
        Self::discover_in(&candidates)
    }

    /// First readable font among `candidates`.
    pub fn discover_in(candidates: &[PathBuf]) -> HudResult<Self> {
        for path in candidates {
            match Self::from_path(path) {
                Ok(src) => {
                    tracing::debug!(font = %path.display(), "using font");
                    return Ok(src);
                }
                Err(err) => tracing::trace!(%err, "font candidate skipped"),
            }
        }
        Err(HudError::font(format!(
            "no usable font found (tried {} locations)",
            candidates.len()
        )))
    }

    /// The font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File the bytes were read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }
}

/// [`TextPainter`] backed by parley shaping and `vello_cpu` glyph rendering.
pub struct ParleyText {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl ParleyText {
    /// Register `source` with a fresh font collection.
    pub fn new(source: &FontSource) -> HudResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(source.bytes().to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| HudError::font("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HudError::font("registered font family has no name"))?
            .to_string();
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(source.bytes().to_vec()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Family name the font registered under.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> HudResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(HudError::validation("text size_px must be finite and > 0"));
        }
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextPainter for ParleyText {
    fn measure(&mut self, text: &str, size_px: f32) -> HudResult<TextExtent> {
        let layout = self.layout(text, size_px, Rgba8::default())?;
        Ok(TextExtent {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
        })
    }

    fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        size_px: f32,
        origin: Point,
        color: Rgba8,
    ) -> HudResult<()> {
        let layout = self.layout(text, size_px, color)?;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                ctx.set_paint(run.style().brush.to_cpu_color());
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
