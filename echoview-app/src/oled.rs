//! SSD1306 hardware sink over Linux I2C.
//!
//! Uses the `ssd1306` crate in buffered-graphics mode: `present` copies the
//! rendered frame into the driver's own buffer pixel by pixel, then flushes
//! the whole buffer to the panel in one transfer.

use std::path::Path;

use echoview_core::{error::Result, DisplaySink, EchoViewError, Frame};
use linux_embedded_hal::I2cdev;
use ssd1306::{
    mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306,
};
use tracing::info;

type Panel =
    Ssd1306<I2CInterface<I2cdev>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct OledSink {
    panel: Panel,
}

impl OledSink {
    /// Open the panel on `bus` at `address` and run its init sequence.
    ///
    /// # Errors
    /// `EchoViewError::Display` if the bus cannot be opened or the panel
    /// does not respond — fatal, no retry.
    pub fn open(bus: &Path, address: u8) -> Result<Self> {
        let i2c = I2cdev::new(bus)
            .map_err(|e| EchoViewError::Display(format!("open {}: {e}", bus.display())))?;
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        panel
            .init()
            .map_err(|e| EchoViewError::Display(format!("init: {e:?}")))?;

        info!(
            bus = %bus.display(),
            address = format_args!("0x{address:02X}"),
            "SSD1306 initialised"
        );
        Ok(Self { panel })
    }
}

impl DisplaySink for OledSink {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.panel.clear_buffer();
        for (x, y) in frame.lit_pixels() {
            self.panel.set_pixel(x, y, true);
        }
        self.panel
            .flush()
            .map_err(|e| EchoViewError::Display(format!("flush: {e:?}")))
    }
}
