//! Transcription line source abstraction.
//!
//! The `TranscriptSource` trait is the seam between the renderer loop and
//! whatever produces text: the real whisper.cpp `stream` subprocess
//! (`StreamSource`), or a scripted fake in tests.

pub mod stream;

pub use stream::{StreamConfig, StreamSource};

use crate::error::Result;

/// Contract for line-oriented transcription producers.
pub trait TranscriptSource {
    /// Block the calling thread until the next line is available.
    ///
    /// Lines carry no trailing terminator. Returns `Ok(None)` once the
    /// underlying stream has reached end-of-input; no further lines follow
    /// and the source never restarts.
    fn next_line(&mut self) -> Result<Option<String>>;
}
