//! Render boundary.
//!
//! The renderer consumes annotations and reports whether the operator asked
//! to quit. Real window management lives behind this trait out of tree; the
//! crate ships a headless renderer for servers and tests.

use anyhow::Result;

use crate::ingest::RawFrame;
use crate::pipeline::Annotation;

/// Per-iteration signal from the renderer back to the main loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderControl {
    Continue,
    /// Operator requested shutdown (e.g. key press in a window).
    Quit,
}

pub trait Renderer: Send {
    fn render(&mut self, frame: &RawFrame, annotations: &[Annotation]) -> Result<RenderControl>;
}

/// Renderer for headless deployments: logs annotations at debug level and
/// never requests shutdown.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames_rendered: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, _frame: &RawFrame, annotations: &[Annotation]) -> Result<RenderControl> {
        self.frames_rendered += 1;
        for ann in annotations {
            log::debug!(
                "overlay ({},{})-({},{}): {}",
                ann.bbox.x1,
                ann.bbox.y1,
                ann.bbox.x2,
                ann.bbox.y2,
                ann.text
            );
        }
        Ok(RenderControl::Continue)
    }
}
