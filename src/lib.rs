//! dashcam-hud turns per-frame vehicle telemetry into transparent RGBA overlay frames.
//!
//! The pipeline per frame:
//!
//! - Normalize a loosely-typed [`TelemetryRecord`] into [`CanonicalSignals`]
//! - Advance the sequence-scoped [`TemporalSmoother`] (steering easing, blink pulse)
//! - Lay out and draw the speed block and six chips, plus the optional location tag
//! - Hand the finished [`FrameRGBA`] to a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;

pub(crate) mod layout;
pub(crate) mod motion;
pub(crate) mod telemetry;

/// Frame composition and sequence rendering.
pub mod compose;
/// Output sinks.
pub mod encode;
/// Rasterization: icons, chips, text and the location tag.
pub mod render;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;

pub use crate::config::{
    DEFAULT_FRAME_RATE, DEFAULT_ICON_SUPERSAMPLE, LocationConfig, MAX_ICON_SUPERSAMPLE,
    RenderConfig, UnitSystem,
};
pub use crate::foundation::core::{Canvas, FrameIndex, Point, Rect, Rgba8};
pub use crate::foundation::error::{HudError, HudResult};

pub use crate::compose::{
    FrameComposer, RenderStats, RenderThreading, SequenceJob, render_sequence,
};
pub use crate::encode::{FrameSink, InMemorySink, PngSequenceSink, RawRgbaSink, SinkConfig};
pub use crate::layout::{CHIP_ORDER, CHIP_SIZE, ChipKind, ChipSlot, HudLayout};
pub use crate::motion::{FrameMotion, TemporalSmoother, precompute_motion};
pub use crate::render::{
    FontSource, FrameRGBA, LocationOverlay, ParleyText, TextExtent, TextPainter,
};
pub use crate::telemetry::{
    AutopilotState, CanonicalSignals, Gear, MAX_STEER_DEG, SignalAliases, SignalNormalizer,
    TelemetryRecord, TelemetrySequence,
};
