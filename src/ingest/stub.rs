use anyhow::{anyhow, Result};

use super::{FrameSource, RawFrame};

/// Configuration for the synthetic source.
#[derive(Clone, Debug)]
pub struct StubSourceConfig {
    /// Source identifier, `stub://...`.
    pub url: String,
    pub width: u32,
    pub height: u32,
    /// Frames to deliver before signalling end-of-stream; `None` is
    /// unbounded (live-camera shape).
    pub max_frames: Option<u64>,
}

impl Default for StubSourceConfig {
    fn default() -> Self {
        Self {
            url: "stub://camera0".to_string(),
            width: 640,
            height: 480,
            max_frames: None,
        }
    }
}

/// Synthetic frame source for tests and bench runs.
///
/// Generates a deterministic pixel pattern that drifts per frame, so
/// downstream consumers see distinct frames without any capture hardware.
pub struct StubSource {
    config: StubSourceConfig,
    frame_count: u64,
    connected: bool,
}

impl StubSource {
    pub fn new(config: StubSourceConfig) -> Result<Self> {
        if !config.url.starts_with("stub://") {
            return Err(anyhow!(
                "stub source requires a stub:// url, got {}",
                config.url
            ));
        }
        if config.width == 0 || config.height == 0 {
            return Err(anyhow!("stub source requires non-zero dimensions"));
        }
        Ok(Self {
            config,
            frame_count: 0,
            connected: false,
        })
    }

    fn generate_pixels(&self) -> Vec<u8> {
        let pixel_count = (self.config.width * self.config.height * 3) as usize;
        let mut pixels = vec![0u8; pixel_count];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = ((i as u64 + self.frame_count) % 256) as u8;
        }
        pixels
    }
}

impl FrameSource for StubSource {
    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        log::info!("StubSource: connected to {} (synthetic)", self.config.url);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<RawFrame>> {
        if !self.connected {
            return Err(anyhow!("stub source not connected"));
        }
        if let Some(max) = self.config.max_frames {
            if self.frame_count >= max {
                return Ok(None);
            }
        }
        self.frame_count += 1;
        let pixels = self.generate_pixels();
        Ok(Some(RawFrame::new(
            pixels,
            self.config.width,
            self.config.height,
        )))
    }

    fn is_healthy(&self) -> bool {
        self.connected
            && self
                .config
                .max_frames
                .map_or(true, |max| self.frame_count < max)
    }

    fn frames_captured(&self) -> u64 {
        self.frame_count
    }
}
