use crate::config::RenderConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::HudResult;
use crate::layout::{ChipKind, HudLayout};
use crate::motion::{FrameMotion, TemporalSmoother};
use crate::render::FrameRGBA;
use crate::render::chips::{self, Pedal};
use crate::render::frame::flush_to_pixmap;
use crate::render::icons::ArrowDir;
use crate::render::location::LocationOverlay;
use crate::render::text::TextPainter;
use crate::telemetry::{CanonicalSignals, SignalNormalizer, TelemetryRecord};

/// Builds one overlay frame per telemetry record.
///
/// The composer itself is stateless across frames; cross-frame state lives in the
/// [`TemporalSmoother`] the caller passes to [`FrameComposer::compose`].
pub struct FrameComposer<T: TextPainter> {
    config: RenderConfig,
    canvas: Canvas,
    layout: HudLayout,
    normalizer: SignalNormalizer,
    text: T,
}

impl<T: TextPainter> FrameComposer<T> {
    /// Validate `config` and precompute the layout.
    pub fn new(config: RenderConfig, text: T) -> HudResult<Self> {
        config.validate()?;
        let canvas = config.canvas();
        Ok(Self {
            layout: HudLayout::compute(canvas),
            canvas,
            config,
            normalizer: SignalNormalizer::default(),
            text,
        })
    }

    /// Replace the field alias tables.
    pub fn with_normalizer(mut self, normalizer: SignalNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Render configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// HUD element positions for this canvas.
    pub fn layout(&self) -> &HudLayout {
        &self.layout
    }

    /// Alias tables in use.
    pub fn normalizer(&self) -> &SignalNormalizer {
        &self.normalizer
    }

    /// The text painter.
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Compose the next frame of a sequence.
    ///
    /// With a smoother, its clock advances once and the steering angle and blink pulse are
    /// eased; without one, steering is only clamped and blinkers draw at full intensity. A
    /// missing record yields a frame without HUD chips (the location tag may still appear).
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn compose(
        &mut self,
        record: Option<&TelemetryRecord>,
        smoother: Option<&mut TemporalSmoother>,
    ) -> HudResult<FrameRGBA> {
        let signals = match smoother {
            Some(smoother) => {
                smoother.advance();
                self.normalizer.normalize(record).map(|signals| {
                    let motion = FrameMotion::from_smoother(smoother, &signals);
                    (signals, motion)
                })
            }
            None => self.normalizer.normalize(record).map(|signals| {
                let motion = FrameMotion::immediate(signals.steering_angle_deg);
                (signals, motion)
            }),
        };
        self.compose_resolved(signals.as_ref().map(|(s, m)| (s, *m)))
    }

    /// Compose from already-normalized signals and motion values.
    pub fn compose_resolved(
        &mut self,
        frame: Option<(&CanonicalSignals, FrameMotion)>,
    ) -> HudResult<FrameRGBA> {
        let (w, h) = self.canvas.dims_u16()?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);

        if self.config.location.enabled {
            let live = frame.map_or((None, None), |(s, _)| (s.latitude, s.longitude));
            if let Some(overlay) = LocationOverlay::resolve(&self.config.location, live) {
                overlay.draw(&mut ctx, self.canvas, &mut self.text)?;
            }
        }

        if let Some((signals, motion)) = frame {
            self.draw_hud(&mut ctx, signals, motion)?;
        }

        let pixmap = flush_to_pixmap(&mut ctx);
        Ok(FrameRGBA::from_pixmap(&pixmap))
    }

    fn draw_hud(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        signals: &CanonicalSignals,
        motion: FrameMotion,
    ) -> HudResult<()> {
        let units = self.config.units;
        let factor = self.config.icon_supersample;
        chips::speed_block(
            ctx,
            &self.layout,
            &signals.speed_label(units),
            units.label(),
            &mut self.text,
        )?;

        for slot in self.layout.chips {
            let rect = slot.rect;
            match slot.kind {
                ChipKind::LeftBlinker => chips::blinker_chip(
                    ctx,
                    rect,
                    ArrowDir::Left,
                    signals.left_blinker,
                    motion.blink_pulse,
                    factor,
                )?,
                ChipKind::Gear => chips::gear_chip(ctx, rect, signals.gear, &mut self.text)?,
                ChipKind::Brake => {
                    let level = if signals.brake_applied { 1.0 } else { 0.0 };
                    chips::pedal_chip(ctx, rect, Pedal::Brake, level, factor)?;
                }
                ChipKind::Wheel => chips::wheel_chip(
                    ctx,
                    rect,
                    motion.steer_deg,
                    &signals.autopilot_state,
                    factor,
                )?,
                ChipKind::Throttle => chips::pedal_chip(
                    ctx,
                    rect,
                    Pedal::Throttle,
                    signals.throttle_fraction,
                    factor,
                )?,
                ChipKind::RightBlinker => chips::blinker_chip(
                    ctx,
                    rect,
                    ArrowDir::Right,
                    signals.right_blinker,
                    motion.blink_pulse,
                    factor,
                )?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
