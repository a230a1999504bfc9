//! # echoview-core
//!
//! Transcription-to-display engine: pulls text lines from a speech
//! recogniser subprocess and lays each one out on a fixed-size monochrome
//! frame.
//!
//! ## Architecture
//!
//! ```text
//! stream subprocess ─┬─ stdout ─┐
//!                    └─ stderr ─┴─► StreamSource (blocking next_line)
//!                                        │
//!                                 Renderer::render
//!                                 (clear → wrap → page)
//!                                        │
//!                                 DisplaySink::present
//! ```
//!
//! One blocking consumer loop; every rendered line fully replaces the prior
//! frame content. There is no history, queue, or scrollback.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod display;
pub mod error;
pub mod render;
pub mod source;

// Convenience re-exports for downstream crates
pub use display::{DisplaySink, StubSink};
pub use error::EchoViewError;
pub use render::frame::Frame;
pub use render::layout::{wrap, GlyphMetrics};
pub use render::Renderer;
pub use source::{StreamConfig, StreamSource, TranscriptSource};
