use std::io::Write;
use std::path::{Path, PathBuf};

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{HudError, HudResult};
use crate::render::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frame rate of the sequence.
    pub frame_rate: f64,
    /// Number of frames that will be pushed.
    pub frames: usize,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing, gap-free indices starting
/// at 0.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> HudResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HudResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> HudResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> HudResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HudResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> HudResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes `frame_000000.png`, `frame_000001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the PNG for frame `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        frame_path(&self.dir, idx)
    }
}

fn frame_path(dir: &Path, idx: FrameIndex) -> PathBuf {
    dir.join(format!("frame_{:06}.png", idx.0))
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> HudResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            HudError::output(format!("create output dir '{}': {e}", self.dir.display()))
        })
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HudResult<()> {
        let path = self.frame_path(idx);
        image::save_buffer_with_format(
            &path,
            &frame.to_straight_rgba(),
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| HudError::output(format!("write png '{}': {e}", path.display())))
    }

    fn end(&mut self) -> HudResult<()> {
        Ok(())
    }
}

/// Streams straight-alpha RGBA bytes, one frame after another, flushing after each frame.
pub struct RawRgbaSink<W: Write> {
    out: W,
    expected_len: Option<usize>,
}

impl<W: Write> RawRgbaSink<W> {
    /// Sink writing to `out` (e.g. locked stdout).
    pub fn new(out: W) -> Self {
        Self {
            out,
            expected_len: None,
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for RawRgbaSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> HudResult<()> {
        self.expected_len = Some((cfg.width as usize) * (cfg.height as usize) * 4);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HudResult<()> {
        let bytes = frame.to_straight_rgba();
        if let Some(expected) = self.expected_len
            && bytes.len() != expected
        {
            return Err(HudError::output(format!(
                "frame {} has {} bytes, stream expects {expected}",
                idx.0,
                bytes.len()
            )));
        }
        self.out
            .write_all(&bytes)
            .and_then(|()| self.out.flush())
            .map_err(|e| HudError::output(format!("write frame {}: {e}", idx.0)))
    }

    fn end(&mut self) -> HudResult<()> {
        self.out
            .flush()
            .map_err(|e| HudError::output(format!("flush raw stream: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
