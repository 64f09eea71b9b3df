use anyhow::Result;

use crate::track::backend::{RawDetection, TrackingBackend};
use crate::BoundingBox;

const STUB_CLASS_NAMES: &[&str] = &["person", "cup", "chair", "bottle", "kite"];

const PERSON: usize = 0;
const CUP: usize = 1;
const KITE: usize = 4;

/// Stub backend for testing. Synthesizes a small deterministic scene from
/// its own frame counter: a person walking toward the camera, a static cup,
/// and a periodic low-value object with no reference height.
pub struct StubTracker {
    frame_count: u64,
}

impl StubTracker {
    pub fn new() -> Self {
        Self { frame_count: 0 }
    }
}

impl Default for StubTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingBackend for StubTracker {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn class_names(&self) -> &'static [&'static str] {
        STUB_CLASS_NAMES
    }

    fn track(
        &mut self,
        _pixels: &[u8],
        _width: u32,
        height: u32,
        persist_identity: bool,
        _confidence_threshold: f32,
    ) -> Result<Vec<RawDetection>> {
        self.frame_count += 1;
        let id = |n: u32| persist_identity.then_some(n);

        // Person approaching: apparent height grows until it fills the frame.
        let person_h = (120 + self.frame_count as i32 * 4).min(height as i32 - 20);
        let mut dets = vec![
            RawDetection {
                class_id: PERSON,
                bbox: BoundingBox::new(200, 40, 320, 40 + person_h),
                track_id: id(1),
                confidence: 0.91,
            },
            RawDetection {
                class_id: CUP,
                bbox: BoundingBox::new(100, 100, 140, 160),
                track_id: id(2),
                confidence: 0.76,
            },
        ];

        // Periodic unknown-label object; the pipeline is expected to skip it.
        if self.frame_count % 10 == 0 {
            dets.push(RawDetection {
                class_id: KITE,
                bbox: BoundingBox::new(400, 20, 470, 90),
                track_id: None,
                confidence: 0.55,
            });
        }

        // Low-confidence clutter the adapter should filter out.
        dets.push(RawDetection {
            class_id: CUP,
            bbox: BoundingBox::new(500, 300, 520, 330),
            track_id: None,
            confidence: 0.12,
        });

        Ok(dets)
    }
}
