//! audio - Codec seam for the frame harness
//!
//! `FrameDecoder` is the contract the harness drives; `OpusFrameDecoder`
//! is the libopus-backed implementation used by the binary.

pub mod frame_decoder;
mod opus_codec;

pub use frame_decoder::{CodecError, FrameDecoder};
pub use opus_codec::OpusFrameDecoder;
