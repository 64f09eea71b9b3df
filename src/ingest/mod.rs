//! Frame ingestion sources.
//!
//! A `FrameSource` yields raw frames until the stream is exhausted;
//! end-of-stream is `Ok(None)`, a normal termination signal rather than an
//! error. The crate ships a synthetic stub source; real capture devices
//! (V4L2, RTSP, file decode) live behind the same trait out of tree.

mod stub;

use anyhow::Result;

pub use stub::{StubSource, StubSourceConfig};

/// One raw frame as produced by a capture source. Pixel layout is the
/// source's business; the pipeline only forwards the bytes to the tracking
/// backend.
#[derive(Clone, Debug)]
pub struct RawFrame {
    data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RawFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Capture boundary.
pub trait FrameSource: Send {
    /// Prepare the source for capture.
    fn connect(&mut self) -> Result<()>;

    /// Capture the next frame. `Ok(None)` signals end-of-stream.
    fn next_frame(&mut self) -> Result<Option<RawFrame>>;

    /// Whether the source expects to deliver more frames.
    fn is_healthy(&self) -> bool;

    /// Frames captured so far.
    fn frames_captured(&self) -> u64;
}
