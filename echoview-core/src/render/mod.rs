//! `Renderer` — turns one text line into a wrapped, paged frame.
//!
//! ## Render steps (per call)
//!
//! ```text
//! 1. Clear the frame (every pixel off)
//! 2. Wrap the text to floor(frame_width / advance_width) columns
//! 3. Draw sub-line i at (0, i * line_height); stop once a sub-line
//!    no longer fits fully — at most floor(frame_height / line_height)
//! 4. Present the frame through the sink
//! ```
//!
//! Each call is independent: the frame always shows exactly the most
//! recently rendered text, never residue from an earlier call.

pub mod frame;
pub mod layout;

use embedded_graphics::{
    geometry::Point,
    mono_font::{ascii::FONT_6X10, MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    text::{Baseline, Text},
    Drawable,
};
use tracing::debug;

use crate::display::DisplaySink;
use crate::error::Result;
use crate::render::frame::Frame;
use crate::render::layout::{wrap, GlyphMetrics};

/// Owns the frame, the font, and the sink the frame is presented through.
pub struct Renderer<S> {
    frame: Frame,
    font: &'static MonoFont<'static>,
    metrics: GlyphMetrics,
    columns: usize,
    rows: usize,
    sink: S,
}

impl<S: DisplaySink> Renderer<S> {
    /// Renderer over a `width` × `height` frame with the default 6×10 font.
    pub fn new(sink: S, width: u32, height: u32) -> Self {
        Self::with_font(sink, width, height, &FONT_6X10)
    }

    pub fn with_font(sink: S, width: u32, height: u32, font: &'static MonoFont<'static>) -> Self {
        let metrics = GlyphMetrics::from_font(font);
        Self {
            frame: Frame::new(width, height),
            font,
            metrics,
            columns: metrics.columns(width),
            rows: metrics.rows(height),
            sink,
        }
    }

    /// Lay out `text` on the frame and present it.
    ///
    /// Sub-lines past the last full row are silently discarded; an empty or
    /// whitespace-only `text` presents a blank frame.
    ///
    /// # Errors
    /// Only sink presentation can fail; drawing into the in-memory frame is
    /// infallible.
    pub fn render(&mut self, text: &str) -> Result<()> {
        self.frame.clear();

        let style = MonoTextStyle::new(self.font, BinaryColor::On);
        let lines = wrap(text, self.columns);
        let drawn = lines.len().min(self.rows);

        for (i, line) in lines.iter().take(self.rows).enumerate() {
            let top = (i as u32 * self.metrics.line_height) as i32;
            // Frame drawing cannot fail (Error = Infallible).
            let _ = Text::with_baseline(line, Point::new(0, top), style, Baseline::Top)
                .draw(&mut self.frame);
        }

        debug!(
            chars = text.chars().count(),
            wrapped = lines.len(),
            drawn,
            "frame rendered"
        );

        self.sink.present(&self.frame)
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Per-line character capacity.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of full sub-lines the frame can hold.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn metrics(&self) -> GlyphMetrics {
        self.metrics
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::display::StubSink;

    const PANGRAM: &str = "the quick brown fox jumps over the lazy dog";

    fn renderer() -> Renderer<StubSink> {
        Renderer::new(StubSink::new(), 128, 64)
    }

    /// Row bands (sub-line indices) that contain at least one lit pixel.
    fn lit_bands(frame: &Frame, line_height: u32) -> Vec<u32> {
        let mut bands: Vec<u32> = frame.lit_pixels().map(|(_, y)| y / line_height).collect();
        bands.sort_unstable();
        bands.dedup();
        bands
    }

    #[test]
    fn short_line_draws_in_the_top_band_only() {
        let mut renderer = renderer();
        renderer.render("hi").expect("render");

        let frame = renderer.frame();
        assert!(!frame.is_blank());
        assert_eq!(lit_bands(frame, renderer.metrics().line_height), vec![0]);
    }

    #[test]
    fn empty_text_presents_a_blank_frame() {
        let mut renderer = renderer();
        renderer.render("").expect("render");

        assert!(renderer.frame().is_blank());
        assert_eq!(renderer.sink().presents(), 1);
    }

    #[test]
    fn each_render_fully_overwrites_the_frame() {
        let mut renderer = renderer();
        renderer.render(PANGRAM).expect("render");
        assert!(!renderer.frame().is_blank());

        renderer.render("").expect("render");
        assert!(renderer.frame().is_blank(), "residual pixels after clear");

        renderer.render("ok").expect("render");
        let line_height = renderer.metrics().line_height;
        assert_eq!(lit_bands(renderer.frame(), line_height), vec![0]);
        assert_eq!(renderer.sink().presents(), 3);
    }

    #[test]
    fn pangram_occupies_three_bands_at_21_columns() {
        let mut renderer = renderer();
        assert_eq!(renderer.columns(), 21);

        renderer.render(PANGRAM).expect("render");
        let line_height = renderer.metrics().line_height;
        assert_eq!(lit_bands(renderer.frame(), line_height), vec![0, 1, 2]);
    }

    #[test]
    fn overflow_is_truncated_to_the_rows_that_fit() {
        let mut renderer = renderer();
        assert_eq!(renderer.rows(), 6);

        // One word per sub-line; far more sub-lines than the frame holds.
        let text = "aaaaaaaaaaaaaaaaaaaaa ".repeat(12);
        renderer.render(&text).expect("render");

        let line_height = renderer.metrics().line_height;
        let bands = lit_bands(renderer.frame(), line_height);
        assert_eq!(bands, vec![0, 1, 2, 3, 4, 5]);
        assert!(
            renderer
                .frame()
                .lit_pixels()
                .all(|(_, y)| y < 6 * line_height),
            "pixels drawn past the last full row"
        );
    }

    #[test]
    fn sink_receives_the_rendered_frame() {
        let mut renderer = renderer();
        renderer.render("hello").expect("render");

        let last = renderer
            .sink()
            .last_frame()
            .expect("sink should hold the presented frame");
        assert_eq!(last, renderer.frame());
    }
}
