use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use sha2::Digest as _;

/// Render HUD overlay frames from dashcam SEI telemetry.
#[derive(Parser, Debug)]
#[command(name = "dashcam-hud", version)]
struct Cli {
    /// Path to the SEI messages JSON file (array of records or nulls).
    #[arg(long)]
    sei_json: PathBuf,

    /// Output width.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Output height.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Frame rate.
    #[arg(long, default_value_t = dashcam_hud::DEFAULT_FRAME_RATE)]
    framerate: f64,

    /// Use mph instead of km/h.
    #[arg(long)]
    use_mph: bool,

    /// Output directory for PNG frames (if not using --pipe).
    #[arg(long, conflicts_with = "pipe", required_unless_present = "pipe")]
    output_dir: Option<PathBuf>,

    /// Write raw straight-alpha RGBA frames to stdout.
    #[arg(long)]
    pipe: bool,

    /// Street and city text, e.g. "Main St, San Francisco".
    #[arg(long)]
    location_text: Option<String>,

    /// Fallback GPS latitude (used when per-frame GPS is missing or zero).
    #[arg(long, allow_hyphen_values = true)]
    fallback_lat: Option<f64>,

    /// Fallback GPS longitude (used when per-frame GPS is missing or zero).
    #[arg(long, allow_hyphen_values = true)]
    fallback_lon: Option<f64>,

    /// Render the bottom-left location tag.
    #[arg(long)]
    enable_location_overlay: bool,

    /// Font file to use instead of the well-known system locations.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Linear supersample factor for icons (1-8).
    #[arg(long, default_value_t = dashcam_hud::DEFAULT_ICON_SUPERSAMPLE)]
    supersample: u32,

    /// Render frames in parallel after a sequential smoothing pass.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for --parallel.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Print the resolved font (path, family, SHA-256) to stderr.
    #[arg(long)]
    dump_font: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = dashcam_hud::RenderConfig {
        width: cli.width,
        height: cli.height,
        frame_rate: cli.framerate,
        units: if cli.use_mph {
            dashcam_hud::UnitSystem::Mph
        } else {
            dashcam_hud::UnitSystem::Kmh
        },
        location: dashcam_hud::LocationConfig {
            enabled: cli.enable_location_overlay,
            label: cli.location_text.clone(),
            fallback_lat: cli.fallback_lat,
            fallback_lon: cli.fallback_lon,
        },
        icon_supersample: cli.supersample,
    };
    config.validate()?;
    tracing::debug!(location = ?config.location, "location overlay settings");

    // Font failures are fatal before any frame is produced.
    let font = match &cli.font {
        Some(path) => dashcam_hud::FontSource::from_path(path)?,
        None => dashcam_hud::FontSource::discover()?,
    };
    if cli.dump_font {
        dump_font(&font)?;
    }

    let sequence = dashcam_hud::TelemetrySequence::from_path(&cli.sei_json)
        .with_context(|| format!("load telemetry '{}'", cli.sei_json.display()))?;
    let target = match &cli.output_dir {
        Some(dir) if !cli.pipe => dir.display().to_string(),
        _ => "pipe".to_owned(),
    };
    tracing::info!(frames = sequence.records.len(), %target, "rendering hud frames");

    let threading = dashcam_hud::RenderThreading {
        parallel: cli.parallel,
        chunk_size: cli.chunk_size,
        threads: cli.threads,
    };
    let normalizer = dashcam_hud::SignalNormalizer::default();
    let job = dashcam_hud::SequenceJob {
        config: &config,
        normalizer: &normalizer,
        make_text: || dashcam_hud::ParleyText::new(&font),
        threading: &threading,
    };

    match (&cli.output_dir, cli.pipe) {
        (_, true) => {
            let stdout = std::io::stdout();
            let mut sink = dashcam_hud::RawRgbaSink::new(std::io::BufWriter::new(stdout.lock()));
            dashcam_hud::render_sequence(job, &sequence.records, &mut sink)?;
        }
        (Some(dir), false) => {
            let mut sink = dashcam_hud::PngSequenceSink::new(dir);
            dashcam_hud::render_sequence(job, &sequence.records, &mut sink)?;
        }
        (None, false) => anyhow::bail!("either --pipe or --output-dir is required"),
    }
    Ok(())
}

fn dump_font(font: &dashcam_hud::FontSource) -> anyhow::Result<()> {
    let painter = dashcam_hud::ParleyText::new(font)?;
    let origin = font
        .origin()
        .map_or_else(|| "<memory>".to_owned(), |p| p.display().to_string());
    eprintln!("font diagnostics:");
    eprintln!("  source: {origin}");
    eprintln!("  family: {}", painter.family_name());
    eprintln!("  sha256: {}", sha256_hex(font.bytes()));
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
