//! Display sink abstraction.
//!
//! The `DisplaySink` trait is the seam between layout and hardware: the
//! renderer hands over a finished frame, the sink transfers it to the panel
//! and makes it visible. Implementations: `StubSink` here (headless and
//! tests) and the SSD1306 I2C sink in the device binary.

pub mod stub;

pub use stub::StubSink;

use crate::error::Result;
use crate::render::frame::Frame;

/// Opaque sink accepting a pixel buffer and a "present" command.
pub trait DisplaySink {
    /// Transfer `frame` to the panel and make it visible.
    ///
    /// Assumed synchronous: when this returns, the panel shows the frame.
    ///
    /// # Errors
    /// Any transfer fault. The renderer does not retry; errors propagate to
    /// the caller.
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

impl<T: DisplaySink + ?Sized> DisplaySink for Box<T> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        (**self).present(frame)
    }
}
