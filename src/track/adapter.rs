use anyhow::Result;

use crate::ingest::RawFrame;
use crate::track::backend::TrackingBackend;
use crate::BoundingBox;

/// One normalized detection for the current frame. Not persisted beyond the
/// frame's processing.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub label: String,
    pub bbox: BoundingBox,
    /// `None` when the tracker reported no identity for this object.
    pub track_id: Option<u32>,
    pub confidence: f32,
}

/// Normalizes backend output into `Detection` records.
///
/// Responsibilities: confidence filtering, class-index-to-label mapping, and
/// nothing else. Backend ordering and track ids pass through untouched.
pub struct TrackingAdapter {
    backend: Box<dyn TrackingBackend>,
    confidence_threshold: f32,
}

impl TrackingAdapter {
    pub fn new(backend: Box<dyn TrackingBackend>, confidence_threshold: f32) -> Self {
        Self {
            backend,
            confidence_threshold,
        }
    }

    /// Run the backend on a frame and normalize its output.
    ///
    /// Detections below the confidence threshold are filtered out. A class
    /// index outside the backend's name table drops that detection with a
    /// debug log; a misbehaving backend must not take the frame down.
    pub fn detections(&mut self, frame: &RawFrame, persist_identity: bool) -> Result<Vec<Detection>> {
        let raw = self.backend.track(
            frame.data(),
            frame.width,
            frame.height,
            persist_identity,
            self.confidence_threshold,
        )?;
        let names = self.backend.class_names();

        let mut out = Vec::with_capacity(raw.len());
        for det in raw {
            if det.confidence < self.confidence_threshold {
                continue;
            }
            let Some(label) = names.get(det.class_id) else {
                log::debug!(
                    "{}: class index {} outside name table ({} entries), dropping",
                    self.backend.name(),
                    det.class_id,
                    names.len()
                );
                continue;
            };
            out.push(Detection {
                label: (*label).to_string(),
                bbox: det.bbox,
                track_id: det.track_id,
                confidence: det.confidence,
            });
        }
        Ok(out)
    }

    /// Give the backend a chance to load its model before the first frame.
    pub fn warm_up(&mut self) -> Result<()> {
        self.backend.warm_up()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }
}
