//! `Frame` — owned monochrome pixel buffer.
//!
//! One bit per pixel, row-major, rows padded to whole bytes. The frame is
//! owned by the renderer and overwritten in place on every update; there is
//! no ambient global drawing state. Out-of-bounds writes are silently
//! dropped, which is what clips glyph fragments past the panel edge.

use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    Pixel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Create an all-off frame of the given pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; Self::stride(width) * height as usize],
        }
    }

    fn stride(width: u32) -> usize {
        (width as usize).div_ceil(8)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to the off state.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Whether the pixel at `(x, y)` is on. Out-of-range reads are off.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y as usize * Self::stride(self.width) + x as usize / 8;
        self.data[idx] & (0x80 >> (x % 8)) != 0
    }

    /// Set the pixel at `(x, y)`. Out-of-range writes are dropped.
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * Self::stride(self.width) + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        if on {
            self.data[idx] |= mask;
        } else {
            self.data[idx] &= !mask;
        }
    }

    /// Coordinates of every lit pixel, row by row.
    pub fn lit_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.pixel(x, y))
    }

    /// True when no pixel is lit.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|byte| *byte == 0)
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set(point.x as u32, point.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_blank() {
        let frame = Frame::new(128, 64);
        assert!(frame.is_blank());
        assert_eq!(frame.lit_pixels().count(), 0);
    }

    #[test]
    fn set_and_clear_round_trip() {
        let mut frame = Frame::new(128, 64);
        frame.set(0, 0, true);
        frame.set(127, 63, true);
        frame.set(7, 1, true);
        assert!(frame.pixel(0, 0));
        assert!(frame.pixel(127, 63));
        assert!(frame.pixel(7, 1));
        assert!(!frame.pixel(8, 1));
        assert_eq!(frame.lit_pixels().count(), 3);

        frame.clear();
        assert!(frame.is_blank());
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut frame = Frame::new(16, 8);
        frame.set(16, 0, true);
        frame.set(0, 8, true);
        assert!(frame.is_blank());
        assert!(!frame.pixel(200, 200));
    }

    #[test]
    fn odd_width_rows_do_not_bleed() {
        // 10-wide rows pad to 2 bytes; pixel 9 of row 0 must not appear in row 1.
        let mut frame = Frame::new(10, 4);
        frame.set(9, 0, true);
        assert!(frame.pixel(9, 0));
        assert_eq!(frame.lit_pixels().collect::<Vec<_>>(), vec![(9, 0)]);
    }
}
