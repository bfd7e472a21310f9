use crate::config::LocationConfig;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::HudResult;
use crate::render::shapes::{BoxStyle, rounded_rect};
use crate::render::text::{FONT_SIZE_LOCATION, TextPainter};

const BOX_FILL: Rgba8 = Rgba8::new(0, 0, 0, 102);
const TEXT_COLOR: Rgba8 = Rgba8::new(255, 255, 255, 255);
const BOX_RADIUS: f64 = 6.0;
const PADDING: f64 = 8.0;
const MARGIN_X: f64 = 10.0;
const MARGIN_Y: f64 = 10.0;

/// Resolved location tag for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationOverlay {
    /// Text drawn inside the box.
    pub text: String,
}

fn usable_fix(lat: Option<f64>, lon: Option<f64>) -> Option<(f64, f64)> {
    match (lat, lon) {
        (Some(lat), Some(lon)) if !(lat == 0.0 && lon == 0.0) => Some((lat, lon)),
        _ => None,
    }
}

impl LocationOverlay {
    /// Pick the GPS source and build the display text.
    ///
    /// A live fix wins unless it is incomplete or exactly `(0, 0)`; then the configured fallback
    /// is used. Returns `None` when there is neither a label nor a usable fix.
    pub fn resolve(config: &LocationConfig, live: (Option<f64>, Option<f64>)) -> Option<Self> {
        let fix = match usable_fix(live.0, live.1) {
            Some(fix) => {
                tracing::debug!(lat = fix.0, lon = fix.1, "location from live telemetry");
                Some(fix)
            }
            None => {
                let fallback = usable_fix(config.fallback_lat, config.fallback_lon);
                tracing::debug!(?fallback, "live gps missing or zero, using fallback");
                fallback
            }
        };

        let label = config.label.as_deref().filter(|l| !l.is_empty());
        let gps = fix.map(|(lat, lon)| format!("{lat:.5}, {lon:.5}"));
        let text = match (label, gps) {
            (Some(label), Some(gps)) => format!("{label} ({gps})"),
            (Some(label), None) => label.to_owned(),
            (None, Some(gps)) => gps,
            (None, None) => {
                tracing::debug!("no location data, overlay skipped");
                return None;
            }
        };
        Some(Self { text })
    }

    /// Box bounds for text of the given size, anchored bottom-left.
    pub(crate) fn box_rect(canvas: Canvas, text_w: f64, text_h: f64) -> Rect {
        let w = text_w + PADDING * 2.0;
        let h = text_h + PADDING * 2.0;
        let y = f64::from(canvas.height) - h - MARGIN_Y;
        Rect::new(MARGIN_X, y, MARGIN_X + w, y + h)
    }

    pub(crate) fn draw<T: TextPainter + ?Sized>(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        canvas: Canvas,
        text: &mut T,
    ) -> HudResult<()> {
        let ext = text.measure(&self.text, FONT_SIZE_LOCATION)?;
        let bx = Self::box_rect(canvas, ext.width, ext.height);
        rounded_rect(ctx, bx, BOX_RADIUS, BoxStyle::filled(BOX_FILL));
        text.draw(
            ctx,
            &self.text,
            FONT_SIZE_LOCATION,
            Point::new(bx.x0 + PADDING, bx.y0 + PADDING),
            TEXT_COLOR,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/location.rs"]
mod tests;
