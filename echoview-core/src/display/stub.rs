//! `StubSink` — records presented frames without hardware.
//!
//! Used by the renderer unit tests and by the device binary in headless
//! mode, where no panel is attached but the full read→render loop should
//! still be exercised end-to-end.

use tracing::debug;

use crate::display::DisplaySink;
use crate::error::Result;
use crate::render::frame::Frame;

#[derive(Debug, Default)]
pub struct StubSink {
    presents: u64,
    last: Option<Frame>,
}

impl StubSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `present` calls so far.
    pub fn presents(&self) -> u64 {
        self.presents
    }

    /// Copy of the most recently presented frame, if any.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }
}

impl DisplaySink for StubSink {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.presents += 1;
        self.last = Some(frame.clone());
        debug!(
            presents = self.presents,
            lit = frame.lit_pixels().count(),
            "stub present"
        );
        Ok(())
    }
}
