use rayon::prelude::*;

use crate::compose::composer::FrameComposer;
use crate::config::RenderConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{HudError, HudResult};
use crate::motion::{TemporalSmoother, precompute_motion};
use crate::render::FrameRGBA;
use crate::render::text::TextPainter;
use crate::telemetry::{SignalNormalizer, TelemetryRecord};

const PROGRESS_EVERY: usize = 10;

#[derive(Clone, Debug)]
/// Threading and chunking controls for sequence rendering.
pub struct RenderThreading {
    /// Render frames on a rayon pool after a sequential smoothing pass.
    pub parallel: bool,
    /// Frames per parallel batch; bounds how many finished frames are held before the sink.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counters for one rendered sequence.
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Frames that carried telemetry (HUD drawn).
    pub frames_with_hud: u64,
}

/// Everything a sequence render needs besides the records and the sink.
pub struct SequenceJob<'a, F> {
    /// Render configuration.
    pub config: &'a RenderConfig,
    /// Field alias tables.
    pub normalizer: &'a SignalNormalizer,
    /// Builds one text painter per worker (one in total when sequential).
    pub make_text: F,
    /// Threading controls.
    pub threading: &'a RenderThreading,
}

/// Render `records` in presentation order into `sink`.
///
/// The sequential and parallel paths produce byte-identical frames: the parallel path first
/// runs the smoothing pass over the whole sequence, after which frames are independent.
#[tracing::instrument(skip_all, fields(frames = records.len(), parallel = job.threading.parallel))]
pub fn render_sequence<T, F>(
    job: SequenceJob<'_, F>,
    records: &[Option<TelemetryRecord>],
    sink: &mut dyn FrameSink,
) -> HudResult<RenderStats>
where
    T: TextPainter,
    F: Fn() -> HudResult<T> + Sync + Send,
{
    job.config.validate()?;
    sink.begin(SinkConfig {
        width: job.config.width,
        height: job.config.height,
        frame_rate: job.config.effective_frame_rate(),
        frames: records.len(),
    })?;

    let mut progress = Progress::new(records.len());
    let stats = if job.threading.parallel {
        render_parallel(&job, records, sink, &mut progress)?
    } else {
        render_sequential(&job, records, sink, &mut progress)?
    };

    sink.end()?;
    tracing::info!(
        frames = stats.frames_total,
        with_hud = stats.frames_with_hud,
        "hud rendering complete"
    );
    Ok(stats)
}

fn composer_for<T, F>(job: &SequenceJob<'_, F>) -> HudResult<FrameComposer<T>>
where
    T: TextPainter,
    F: Fn() -> HudResult<T>,
{
    Ok(FrameComposer::new(job.config.clone(), (job.make_text)()?)?
        .with_normalizer(job.normalizer.clone()))
}

fn render_sequential<T, F>(
    job: &SequenceJob<'_, F>,
    records: &[Option<TelemetryRecord>],
    sink: &mut dyn FrameSink,
    progress: &mut Progress,
) -> HudResult<RenderStats>
where
    T: TextPainter,
    F: Fn() -> HudResult<T>,
{
    let mut composer = composer_for(job)?;
    let mut smoother = TemporalSmoother::new(job.config.effective_frame_rate());
    let mut stats = RenderStats::default();
    for (i, record) in records.iter().enumerate() {
        let frame = composer.compose(record.as_ref(), Some(&mut smoother))?;
        sink.push_frame(FrameIndex(i as u64), &frame)?;
        stats.frames_total += 1;
        stats.frames_with_hud += u64::from(record.is_some());
        progress.tick();
    }
    Ok(stats)
}

fn render_parallel<T, F>(
    job: &SequenceJob<'_, F>,
    records: &[Option<TelemetryRecord>],
    sink: &mut dyn FrameSink,
    progress: &mut Progress,
) -> HudResult<RenderStats>
where
    T: TextPainter,
    F: Fn() -> HudResult<T> + Sync + Send,
{
    let pool = build_thread_pool(job.threading.threads)?;
    let resolved = precompute_motion(records, job.config.effective_frame_rate(), job.normalizer);
    let chunk_size = job.threading.chunk_size.max(1);

    let mut stats = RenderStats::default();
    let mut next = 0u64;
    for chunk in resolved.chunks(chunk_size) {
        let rendered = pool.install(|| {
            chunk
                .par_iter()
                .map_init(
                    || composer_for(job),
                    |composer, item| -> HudResult<FrameRGBA> {
                        let composer = composer.as_mut().map_err(|e| worker_setup_error(e))?;
                        composer.compose_resolved(item.as_ref().map(|(s, m)| (s, *m)))
                    },
                )
                .collect::<Vec<_>>()
        });

        for (frame, item) in rendered.into_iter().zip(chunk) {
            sink.push_frame(FrameIndex(next), &frame?)?;
            next += 1;
            stats.frames_total += 1;
            stats.frames_with_hud += u64::from(item.is_some());
            progress.tick();
        }
    }
    Ok(stats)
}

/// Every frame of a worker reports the worker's setup failure; keep its kind.
fn worker_setup_error(err: &HudError) -> HudError {
    let msg = |m: &str| format!("worker setup: {m}");
    match err {
        HudError::Validation(m) => HudError::Validation(msg(m)),
        HudError::Telemetry(m) => HudError::Telemetry(msg(m)),
        HudError::Font(m) => HudError::Font(msg(m)),
        HudError::Render(m) => HudError::Render(msg(m)),
        HudError::Output(m) => HudError::Output(msg(m)),
        HudError::Other(e) => HudError::Other(anyhow::anyhow!("worker setup: {e:#}")),
    }
}

fn build_thread_pool(threads: Option<usize>) -> HudResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(HudError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| HudError::render(format!("failed to build rayon thread pool: {e}")))
}

struct Progress {
    done: usize,
    total: usize,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self { done: 0, total }
    }

    fn tick(&mut self) {
        self.done += 1;
        if self.done % PROGRESS_EVERY == 0 || self.done == self.total {
            let pct = self.done as f64 * 100.0 / self.total.max(1) as f64;
            tracing::info!("rendered {}/{} frames ({pct:.1}%)", self.done, self.total);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/pipeline.rs"]
mod tests;
