//! Codec-agnostic decoder contract used by the frame harness.

use std::fmt;

/// Failure reported by a codec: its native (negative) error code plus
/// the codec's own diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecError {
    pub code: i32,
    pub reason: String,
}

impl CodecError {
    pub fn new(code: i32, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.reason, self.code)
    }
}

impl std::error::Error for CodecError {}

/// A stateful decoder bound to one sample rate / channel count at creation.
///
/// Construction happens through a factory owned by the caller; release
/// happens on `Drop`. Implementations may keep state between calls and
/// only guarantee correct output for the geometry they were built with.
pub trait FrameDecoder {
    /// Decode one encoded frame into `pcm` (interleaved i16).
    ///
    /// `pcm.len()` is the capacity bound. Returns the number of samples
    /// written per channel, contiguous from offset 0.
    fn decode(&mut self, payload: &[u8], pcm: &mut [i16]) -> Result<usize, CodecError>;
}
