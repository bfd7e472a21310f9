pub(crate) mod sink;

pub use sink::{FrameSink, InMemorySink, PngSequenceSink, RawRgbaSink, SinkConfig};
