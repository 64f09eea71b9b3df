use anyhow::Result;

use crate::BoundingBox;

/// Raw per-object output of the tracking backend, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct RawDetection {
    /// Index into the backend's class name table.
    pub class_id: usize,
    pub bbox: BoundingBox,
    /// Persistent tracker identity, when the backend assigned one.
    pub track_id: Option<u32>,
    /// Detection confidence in [0, 1].
    pub confidence: f32,
}

/// Detection + tracking backend trait.
///
/// Implementations wrap a real model (or a synthetic stand-in) and must keep
/// a given physical object's `track_id` stable across consecutive frames
/// while `persist_identity` is set, for as long as the underlying tracker
/// itself holds the association.
pub trait TrackingBackend: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Fixed class-index-to-name table. `RawDetection::class_id` indexes
    /// into this slice.
    fn class_names(&self) -> &'static [&'static str];

    /// Run detection + tracking on a frame.
    ///
    /// `confidence_threshold` is a hint; backends may return detections
    /// below it and rely on the adapter's filter.
    fn track(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        persist_identity: bool,
        confidence_threshold: f32,
    ) -> Result<Vec<RawDetection>>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
