//! Run loop.
//!
//! Drives one frame fully through acquire -> track -> estimate -> log ->
//! render before acquiring the next. Shutdown is cooperative: the
//! cancellation flag and the renderer's quit signal are both checked once
//! per frame boundary, so in-flight frame processing always completes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;

use crate::ingest::FrameSource;
use crate::pipeline::{DropStats, FrameProcessor};
use crate::render::{RenderControl, Renderer};
use crate::sink::RecordSink;
use crate::track::TrackingAdapter;

const HEALTH_LOG_EVERY: u64 = 100;

/// Explicit run state, advanced only at frame boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopping,
    Stopped,
}

/// Totals for a completed run.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunSummary {
    pub frames_processed: u64,
    pub records_written: u64,
    pub drops: DropStats,
}

pub struct MainLoop {
    source: Box<dyn FrameSource>,
    adapter: TrackingAdapter,
    processor: FrameProcessor,
    sink: Box<dyn RecordSink>,
    renderer: Box<dyn Renderer>,
    cancel: Arc<AtomicBool>,
    state: RunState,
}

impl MainLoop {
    pub fn new(
        source: Box<dyn FrameSource>,
        adapter: TrackingAdapter,
        processor: FrameProcessor,
        sink: Box<dyn RecordSink>,
        renderer: Box<dyn Renderer>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            source,
            adapter,
            processor,
            sink,
            renderer,
            cancel,
            state: RunState::Running,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Process frames until the stream ends, the operator quits, or the
    /// cancellation flag is raised. Sink failures abort the run.
    pub fn run(&mut self) -> Result<RunSummary> {
        self.source.connect()?;
        self.adapter.warm_up()?;

        let mut summary = RunSummary::default();
        let mut frame_index: u64 = 0;

        while self.state == RunState::Running {
            if self.cancel.load(Ordering::Relaxed) {
                log::info!("cancellation requested, stopping");
                self.state = RunState::Stopping;
                break;
            }

            let Some(frame) = self.source.next_frame()? else {
                log::info!("frame source exhausted after {} frames", frame_index);
                self.state = RunState::Stopping;
                break;
            };
            frame_index += 1;

            let timestamp = Local::now().format("%H:%M:%S").to_string();
            let detections = self
                .adapter
                .detections(&frame, true)
                .with_context(|| format!("tracking failed on frame {}", frame_index))?;
            let output = self.processor.process(frame_index, &timestamp, &detections);

            self.sink
                .append(&output.records)
                .with_context(|| format!("log sink failed on frame {}", frame_index))?;

            summary.frames_processed += 1;
            summary.records_written += output.records.len() as u64;
            summary.drops.unknown_label += output.drops.unknown_label;
            summary.drops.degenerate_box += output.drops.degenerate_box;

            if self.renderer.render(&frame, &output.annotations)? == RenderControl::Quit {
                log::info!("renderer requested shutdown");
                self.state = RunState::Stopping;
            }

            if frame_index % HEALTH_LOG_EVERY == 0 {
                log::info!(
                    "frame {}: source healthy={} records={} dropped={}",
                    frame_index,
                    self.source.is_healthy(),
                    summary.records_written,
                    summary.drops.total()
                );
            }
        }

        self.state = RunState::Stopping;
        self.sink.flush()?;
        self.state = RunState::Stopped;

        log::info!(
            "run complete: {} frames, {} records, {} detections dropped",
            summary.frames_processed,
            summary.records_written,
            summary.drops.total()
        );
        Ok(summary)
    }
}

/// Install a ctrl-c handler that raises the returned cancellation flag.
pub fn cancellation_flag() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = flag.clone();
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::Relaxed);
    })
    .context("failed to install ctrl-c handler")?;
    Ok(flag)
}
