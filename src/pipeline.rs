//! Per-frame processing.
//!
//! `FrameProcessor` turns one frame's worth of normalized detections into an
//! annotation list for the renderer and a record list for the log sink. It
//! performs no I/O; rendering and persistence belong to the caller.

use crate::estimate::{DistanceEstimator, Skip};
use crate::track::Detection;
use crate::BoundingBox;

/// Sentinel object id written for detections the tracker left unassigned.
pub const UNTRACKED_ID: i64 = -1;

/// One overlay item: the box to draw plus its display string.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub bbox: BoundingBox,
    pub text: String,
}

/// One durable log row. Ordering is arrival order within a frame, frames in
/// acquisition order.
#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    /// Monotonic frame counter, starting at 1.
    pub frame_index: u64,
    /// Wall-clock capture time, `%H:%M:%S`.
    pub timestamp: String,
    /// Tracker identity, or [`UNTRACKED_ID`].
    pub object_id: i64,
    pub label: String,
    pub distance_m: f64,
}

/// Counts of detections dropped by skip reason during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropStats {
    pub unknown_label: u64,
    pub degenerate_box: u64,
}

impl DropStats {
    pub fn total(&self) -> u64 {
        self.unknown_label + self.degenerate_box
    }
}

/// Everything produced for one frame. Discarded after dispatch to the
/// renderer and sink.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    pub annotations: Vec<Annotation>,
    pub records: Vec<LogRecord>,
    pub drops: DropStats,
}

/// Stateless per-frame orchestrator.
#[derive(Clone, Debug)]
pub struct FrameProcessor {
    estimator: DistanceEstimator,
}

impl FrameProcessor {
    pub fn new(estimator: DistanceEstimator) -> Self {
        Self { estimator }
    }

    /// Process one frame's detections, in the order the adapter supplied
    /// them.
    ///
    /// Detections whose label is unknown or whose box height is not positive
    /// are dropped silently; that is the designed fail-soft policy, not an
    /// error path. Every surviving detection yields exactly one annotation
    /// and one log record, with a `-1` object id when the tracker assigned
    /// none.
    pub fn process(
        &self,
        frame_index: u64,
        timestamp: &str,
        detections: &[Detection],
    ) -> FrameOutput {
        let mut out = FrameOutput {
            annotations: Vec::with_capacity(detections.len()),
            records: Vec::with_capacity(detections.len()),
            drops: DropStats::default(),
        };

        for det in detections {
            let distance_m = match self.estimator.estimate(&det.label, det.bbox.height_px()) {
                Ok(d) => d,
                Err(Skip::UnknownLabel) => {
                    out.drops.unknown_label += 1;
                    continue;
                }
                Err(Skip::DegenerateBox) => {
                    out.drops.degenerate_box += 1;
                    continue;
                }
            };

            let object_id = det.track_id.map_or(UNTRACKED_ID, i64::from);
            out.annotations.push(Annotation {
                bbox: det.bbox,
                text: format!("ID {}: {} - {:.2}m", object_id, det.label, distance_m),
            });
            out.records.push(LogRecord {
                frame_index,
                timestamp: timestamp.to_string(),
                object_id,
                label: det.label.clone(),
                distance_m,
            });
        }

        out
    }
}
