//! Opus frame decoder backed by libopus.
//!
//! - Init: (sample_rate, channels) → `opus::Decoder`
//! - Decode: one packet → interleaved i16 PCM, no FEC

use super::frame_decoder::{CodecError, FrameDecoder};
use crate::config::FrameGeometry;

// ======================== Opus Decoder ========================

pub struct OpusFrameDecoder {
    decoder: opus::Decoder,
}

impl OpusFrameDecoder {
    /// Create a new Opus decoder for the given geometry.
    ///
    /// libopus only accepts 8/12/16/24/48 kHz and mono or stereo; anything
    /// else fails here with `OPUS_BAD_ARG`.
    pub fn new(geometry: &FrameGeometry) -> Result<Self, CodecError> {
        let channels = match geometry.channels {
            1 => opus::Channels::Mono,
            2 => opus::Channels::Stereo,
            _ => {
                let code = opus::ErrorCode::BadArg;
                return Err(CodecError::new(code as i32, code.description()));
            }
        };

        let decoder = opus::Decoder::new(geometry.sample_rate, channels).map_err(codec_error)?;

        log::debug!(
            "Opus decoder created: {}Hz, {}ch",
            geometry.sample_rate,
            geometry.channels
        );

        Ok(Self { decoder })
    }
}

impl FrameDecoder for OpusFrameDecoder {
    fn decode(&mut self, payload: &[u8], pcm: &mut [i16]) -> Result<usize, CodecError> {
        // frame_size handed to libopus is pcm.len() / channels
        self.decoder.decode(payload, pcm, false).map_err(codec_error)
    }
}

impl Drop for OpusFrameDecoder {
    fn drop(&mut self) {
        log::debug!("Opus decoder released");
    }
}

fn codec_error(err: opus::Error) -> CodecError {
    CodecError::new(err.code() as i32, err.description())
}
