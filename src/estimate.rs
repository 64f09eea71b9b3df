//! Monocular distance estimation.
//!
//! Pinhole approximation: `distance = assumed_height * focal_length /
//! apparent_height_px`. This is an inverse-proportionality heuristic, not a
//! calibrated measurement; the focal length constant is deployment-specific.

use thiserror::Error;

use crate::config::ConfigError;
use crate::heights::ReferenceHeightTable;

/// Reasons a detection is skipped rather than estimated.
///
/// Both conditions are expected and frequent; callers drop the affected
/// detection and move on. Neither is ever surfaced as a user-visible error.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Skip {
    /// The class label has no reference height entry.
    #[error("label has no reference height entry")]
    UnknownLabel,
    /// The bounding box has non-positive pixel height.
    #[error("bounding box height is not positive")]
    DegenerateBox,
}

/// Pure distance estimator over a fixed height table and focal length.
///
/// Holds no cross-frame state; the same inputs always produce the same
/// output.
#[derive(Clone, Debug)]
pub struct DistanceEstimator {
    heights: ReferenceHeightTable,
    focal_length: f64,
}

impl DistanceEstimator {
    /// Build an estimator. The focal length must be positive and finite;
    /// anything else is a fatal configuration error.
    pub fn new(heights: ReferenceHeightTable, focal_length: f64) -> Result<Self, ConfigError> {
        if !focal_length.is_finite() || focal_length <= 0.0 {
            return Err(ConfigError::InvalidFocalLength { focal_length });
        }
        Ok(Self {
            heights,
            focal_length,
        })
    }

    /// Estimate distance in meters for a label and apparent pixel height.
    ///
    /// Rounded to 2 decimal places for reporting stability. Monotonically
    /// decreasing in `box_height_px` for a fixed label.
    pub fn estimate(&self, label: &str, box_height_px: i32) -> Result<f64, Skip> {
        let height_m = self.heights.lookup(label).ok_or(Skip::UnknownLabel)?;
        if box_height_px <= 0 {
            return Err(Skip::DegenerateBox);
        }
        let distance = (height_m * self.focal_length) / f64::from(box_height_px);
        Ok(round2(distance))
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    pub fn heights(&self) -> &ReferenceHeightTable {
        &self.heights
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
