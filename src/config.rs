use crate::foundation::core::Canvas;
use crate::foundation::error::{HudError, HudResult};

/// Frame rate used whenever the configured one is missing, non-finite or non-positive.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Default linear supersample factor for icon rasterization.
pub const DEFAULT_ICON_SUPERSAMPLE: u32 = 2;

/// Largest accepted icon supersample factor.
pub const MAX_ICON_SUPERSAMPLE: u32 = 8;

/// Unit system used for the speed readout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Miles per hour.
    Mph,
    /// Kilometres per hour.
    #[default]
    Kmh,
}

impl UnitSystem {
    /// Label drawn under the speed value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Mph => "mph",
            Self::Kmh => "km/h",
        }
    }
}

/// Static inputs of the bottom-left location tag.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Draw the location tag at all.
    pub enabled: bool,
    /// Street/city label shown before the coordinates.
    pub label: Option<String>,
    /// Latitude used when the per-frame GPS reading is missing or `(0, 0)`.
    pub fallback_lat: Option<f64>,
    /// Longitude used when the per-frame GPS reading is missing or `(0, 0)`.
    pub fallback_lon: Option<f64>,
}

/// Immutable render configuration for one telemetry sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Video frame rate; drives the smoother clock.
    pub frame_rate: f64,
    /// Speed unit system.
    pub units: UnitSystem,
    /// Location tag settings.
    pub location: LocationConfig,
    /// Linear supersample factor used for icons.
    pub icon_supersample: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            frame_rate: DEFAULT_FRAME_RATE,
            units: UnitSystem::Kmh,
            location: LocationConfig::default(),
            icon_supersample: DEFAULT_ICON_SUPERSAMPLE,
        }
    }
}

impl RenderConfig {
    /// Canvas dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Reject configurations that cannot produce a frame.
    ///
    /// The frame rate is not checked: bad values fall back to [`DEFAULT_FRAME_RATE`].
    pub fn validate(&self) -> HudResult<()> {
        self.canvas().dims_u16()?;
        if self.icon_supersample == 0 || self.icon_supersample > MAX_ICON_SUPERSAMPLE {
            return Err(HudError::validation(format!(
                "icon_supersample must be in 1..={MAX_ICON_SUPERSAMPLE}, got {}",
                self.icon_supersample
            )));
        }
        for (name, v) in [
            ("fallback_lat", self.location.fallback_lat),
            ("fallback_lon", self.location.fallback_lon),
        ] {
            if let Some(v) = v
                && !v.is_finite()
            {
                return Err(HudError::validation(format!("{name} must be finite")));
            }
        }
        Ok(())
    }

    /// Frame rate with the fallback applied.
    pub fn effective_frame_rate(&self) -> f64 {
        if self.frame_rate.is_finite() && self.frame_rate > 0.0 {
            self.frame_rate
        } else {
            DEFAULT_FRAME_RATE
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
