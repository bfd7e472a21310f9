use crate::foundation::math::clamp_finite;
use crate::telemetry::normalize::{CanonicalSignals, MAX_STEER_DEG, SignalNormalizer};
use crate::telemetry::record::TelemetryRecord;

/// Exponential easing time constant for the steering wheel, in milliseconds.
const STEER_TIME_CONSTANT_MS: f64 = 110.0;

/// Time without a target change after which the displayed angle snaps to the target.
const STEER_SETTLE_MS: f64 = 500.0;

const BLINK_PERIOD_MS: f64 = 1000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum SteerState {
    #[default]
    Uninitialized,
    Tracking {
        target_deg: f64,
        display_deg: f64,
        last_change_ms: f64,
    },
}

/// Per-sequence smoothing state: a virtual clock plus the eased steering angle.
///
/// Call [`TemporalSmoother::advance`] exactly once per frame, before any query for that frame.
#[derive(Clone, Debug)]
pub struct TemporalSmoother {
    frame_dt_ms: f64,
    elapsed_ms: f64,
    steer: SteerState,
}

impl TemporalSmoother {
    /// New smoother for a sequence at `frame_rate` fps.
    ///
    /// Non-finite or non-positive rates fall back to 30 fps.
    pub fn new(frame_rate: f64) -> Self {
        let rate = if frame_rate.is_finite() && frame_rate > 0.0 {
            frame_rate
        } else {
            crate::config::DEFAULT_FRAME_RATE
        };
        Self {
            frame_dt_ms: 1000.0 / rate,
            elapsed_ms: 0.0,
            steer: SteerState::Uninitialized,
        }
    }

    /// Move the clock forward by one frame.
    pub fn advance(&mut self) {
        self.elapsed_ms += self.frame_dt_ms;
    }

    /// Ease the displayed steering angle towards `target_deg` and return it.
    pub fn smooth_steer(&mut self, target_deg: f64) -> f64 {
        let target = clamp_finite(target_deg, -MAX_STEER_DEG, MAX_STEER_DEG);
        let now = self.elapsed_ms;

        let SteerState::Tracking {
            target_deg: stored,
            display_deg: display,
            last_change_ms: changed,
        } = self.steer
        else {
            self.steer = SteerState::Tracking {
                target_deg: target,
                display_deg: target,
                last_change_ms: now,
            };
            return target;
        };

        let (stored, changed) = if target != stored {
            (target, now)
        } else {
            (stored, changed)
        };

        let smoothing = 1.0 - (-self.frame_dt_ms / STEER_TIME_CONSTANT_MS).exp();
        let mut display = display + (stored - display) * smoothing;
        if now - changed > STEER_SETTLE_MS {
            display = stored;
        }

        self.steer = SteerState::Tracking {
            target_deg: stored,
            display_deg: display,
            last_change_ms: changed,
        };
        display
    }

    /// Blink intensity in `[0, 1]`: a raised cosine with a one second period, starting bright.
    pub fn blink_pulse(&self) -> f64 {
        let phase = (self.elapsed_ms / BLINK_PERIOD_MS + 0.5).rem_euclid(1.0);
        0.5 * (1.0 - (std::f64::consts::TAU * phase).cos())
    }

    /// Milliseconds of virtual time since the sequence started.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Clock step per frame in milliseconds.
    pub fn frame_dt_ms(&self) -> f64 {
        self.frame_dt_ms
    }

    /// Currently displayed steering angle, if any target was seen yet.
    pub fn display_deg(&self) -> Option<f64> {
        match self.steer {
            SteerState::Uninitialized => None,
            SteerState::Tracking { display_deg, .. } => Some(display_deg),
        }
    }

    /// Current (clamped) steering target, if any.
    pub fn target_deg(&self) -> Option<f64> {
        match self.steer {
            SteerState::Uninitialized => None,
            SteerState::Tracking { target_deg, .. } => Some(target_deg),
        }
    }

    /// Clock time of the last target change, if any.
    pub fn last_change_ms(&self) -> Option<f64> {
        match self.steer {
            SteerState::Uninitialized => None,
            SteerState::Tracking { last_change_ms, .. } => Some(last_change_ms),
        }
    }
}

/// Time-dependent values one frame needs from the smoother.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameMotion {
    /// Steering wheel rotation to draw, degrees.
    pub steer_deg: f64,
    /// Blinker intensity in `[0, 1]`.
    pub blink_pulse: f64,
}

impl FrameMotion {
    /// Values used without temporal smoothing: clamped steer, full-intensity blink.
    pub fn immediate(steer_deg: f64) -> Self {
        Self {
            steer_deg: clamp_finite(steer_deg, -MAX_STEER_DEG, MAX_STEER_DEG),
            blink_pulse: 1.0,
        }
    }

    /// Query the smoother for an already-advanced frame.
    pub fn from_smoother(smoother: &mut TemporalSmoother, signals: &CanonicalSignals) -> Self {
        Self {
            steer_deg: smoother.smooth_steer(signals.steering_angle_deg),
            blink_pulse: smoother.blink_pulse(),
        }
    }
}

/// Run the sequential smoothing pass over a whole sequence up front.
///
/// The clock advances for every entry, missing records included, so the result matches
/// frame-by-frame composition exactly.
pub fn precompute_motion(
    records: &[Option<TelemetryRecord>],
    frame_rate: f64,
    normalizer: &SignalNormalizer,
) -> Vec<Option<(CanonicalSignals, FrameMotion)>> {
    let mut smoother = TemporalSmoother::new(frame_rate);
    records
        .iter()
        .map(|record| {
            smoother.advance();
            let signals = normalizer.normalize(record.as_ref())?;
            let motion = FrameMotion::from_smoother(&mut smoother, &signals);
            Some((signals, motion))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/motion/smoother.rs"]
mod tests;
