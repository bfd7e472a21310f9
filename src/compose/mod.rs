pub(crate) mod composer;
pub(crate) mod pipeline;

pub use composer::FrameComposer;
pub use pipeline::{RenderStats, RenderThreading, SequenceJob, render_sequence};
