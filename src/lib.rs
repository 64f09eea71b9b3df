//! rangecam - monocular distance tracking.
//!
//! Per-frame pipeline: a capture source yields raw frames, a detection +
//! tracking backend assigns labeled boxes with stable identities, the
//! distance estimator converts box geometry into a pinhole range estimate,
//! and every surviving detection is annotated for display and appended to a
//! CSV log. Unknown labels and degenerate boxes are dropped silently; that
//! fail-soft policy is part of the design, not an error path.

pub mod config;
pub mod estimate;
pub mod heights;
pub mod ingest;
pub mod pipeline;
pub mod render;
pub mod runtime;
pub mod sink;
pub mod track;

pub use config::{ConfigError, RangecamConfig};
pub use estimate::{DistanceEstimator, Skip};
pub use heights::ReferenceHeightTable;
pub use pipeline::{Annotation, DropStats, FrameOutput, FrameProcessor, LogRecord, UNTRACKED_ID};
pub use runtime::{MainLoop, RunState, RunSummary};

/// Axis-aligned pixel-coordinate box, `(x1, y1)` top-left and `(x2, y2)`
/// bottom-right. Degenerate boxes (non-positive width or height) are
/// representable; the estimator skips them rather than the constructor
/// rejecting them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Apparent height in pixels. May be zero or negative for degenerate
    /// boxes.
    pub fn height_px(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn width_px(&self) -> i32 {
        self.x2 - self.x1
    }
}
