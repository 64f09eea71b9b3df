//! rangecamd - distance tracking daemon
//!
//! This daemon:
//! 1. Ingests frames from the configured source
//! 2. Runs the detection + tracking backend per frame
//! 3. Estimates object distances with the pinhole heuristic
//! 4. Appends one CSV row per tracked, estimated object
//! 5. Hands annotations to the renderer and honors its quit signal

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use rangecam::ingest::{StubSource, StubSourceConfig};
use rangecam::render::HeadlessRenderer;
use rangecam::sink::CsvSink;
use rangecam::track::{StubTracker, TrackingAdapter};
use rangecam::{DistanceEstimator, FrameProcessor, MainLoop, RangecamConfig};

#[derive(Parser, Debug)]
#[command(name = "rangecamd", about = "Monocular distance tracking daemon")]
struct Args {
    /// Override the CSV log path from config.
    #[arg(long, value_name = "PATH")]
    log_path: Option<PathBuf>,
    /// Stop after this many frames (default: run until the stream ends).
    #[arg(long, env = "RANGECAM_MAX_FRAMES")]
    max_frames: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut cfg = RangecamConfig::load()?;
    if let Some(path) = args.log_path {
        cfg.log_path = path;
    }
    if args.max_frames.is_some() {
        cfg.source.max_frames = args.max_frames;
    }

    let estimator = DistanceEstimator::new(cfg.heights.clone(), cfg.focal_length)?;
    log::info!(
        "rangecamd {} starting: source={} focal={} conf>={}",
        env!("CARGO_PKG_VERSION"),
        cfg.source.url,
        estimator.focal_length(),
        cfg.confidence_threshold
    );
    log::info!(
        "reference height table: {} labels; logging to {}",
        estimator.heights().len(),
        cfg.log_path.display()
    );

    let source = StubSource::new(StubSourceConfig {
        url: cfg.source.url.clone(),
        width: cfg.source.width,
        height: cfg.source.height,
        max_frames: cfg.source.max_frames,
    })?;
    let adapter = TrackingAdapter::new(Box::new(StubTracker::new()), cfg.confidence_threshold);
    let sink = CsvSink::create(&cfg.log_path)?;
    let renderer = HeadlessRenderer::new();
    let cancel = rangecam::runtime::cancellation_flag()?;

    let mut main_loop = MainLoop::new(
        Box::new(source),
        adapter,
        FrameProcessor::new(estimator),
        Box::new(sink),
        Box::new(renderer),
        cancel,
    );
    let summary = main_loop.run()?;

    log::info!(
        "data exported to {} ({} rows)",
        cfg.log_path.display(),
        summary.records_written
    );
    Ok(())
}
