//! Detection + tracking boundary.
//!
//! The tracking model is an external collaborator. `TrackingBackend` is the
//! raw capability, `TrackingAdapter` normalizes its output into per-frame
//! [`Detection`] records for the pipeline. Identity continuity across frames
//! is delegated entirely to the backend; the adapter does no
//! re-identification of its own.

pub mod adapter;
pub mod backend;
pub mod stub;

pub use adapter::{Detection, TrackingAdapter};
pub use backend::{RawDetection, TrackingBackend};
pub use stub::StubTracker;
