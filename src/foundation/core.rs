use crate::foundation::error::{HudError, HudResult};
use crate::foundation::math::lerp;

pub use kurbo::{Point, Rect};

/// Absolute 0-based frame index within one telemetry sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Width and height as `u16`, the pixel addressing range of the rasterizer.
    pub(crate) fn dims_u16(self) -> HudResult<(u16, u16)> {
        let w = u16::try_from(self.width)
            .map_err(|_| HudError::validation("canvas width exceeds u16"))?;
        let h = u16::try_from(self.height)
            .map_err(|_| HudError::validation("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(HudError::validation("canvas width/height must be > 0"));
        }
        Ok((w, h))
    }
}

/// Straight-alpha RGBA8 color. Also the text brush type.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Construct a color from straight-alpha channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Component-wise linear interpolation towards `other`.
    ///
    /// `t` is clamped to `[0, 1]`; each channel rounds to the nearest integer, ties to even.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| -> u8 {
            lerp(f64::from(a), f64::from(b), t)
                .round_ties_even()
                .clamp(0.0, 255.0) as u8
        };
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: ch(self.a, other.a),
        }
    }

    pub(crate) fn to_cpu_color(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
