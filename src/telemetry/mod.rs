pub(crate) mod normalize;
pub(crate) mod record;

pub use normalize::{
    AutopilotState, CanonicalSignals, Gear, MAX_STEER_DEG, SignalAliases, SignalNormalizer,
};
pub use record::{TelemetryRecord, TelemetrySequence};
