pub(crate) mod smoother;

pub use smoother::{FrameMotion, TemporalSmoother, precompute_motion};
