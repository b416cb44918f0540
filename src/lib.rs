//! opus_frame_check - decode one Opus payload under a fixed frame geometry
//!
//! Reads a file as a single encoded frame, decodes it with a decoder built
//! for `(sample_rate, channels)`, and dumps the PCM next to the input.

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
pub mod payload;
pub mod pcm;

use std::path::{Path, PathBuf};

pub use audio::{CodecError, FrameDecoder, OpusFrameDecoder};
pub use config::{Config, FrameGeometry};
pub use error::HarnessError;
pub use harness::{DecodedFrame, FrameHarness, HarnessState};

/// Result of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    pub frame: DecodedFrame,
    pub output: PathBuf,
    pub bytes_written: u64,
}

/// Read `input`, decode it with libopus and write `<input>.pcm`.
///
/// Nothing is written unless decoding succeeds.
pub fn run(input: &Path, geometry: FrameGeometry) -> Result<RunOutcome, HarnessError> {
    let payload = payload::read_payload(input)?;
    log::info!("Payload loaded: {} bytes", payload.len());

    decode_to_file(input, &payload, geometry, OpusFrameDecoder::new)
}

/// Decode an already loaded `payload` with a decoder from `create` and
/// write the PCM next to `input`.
pub fn decode_to_file<D, F>(
    input: &Path,
    payload: &[u8],
    geometry: FrameGeometry,
    create: F,
) -> Result<RunOutcome, HarnessError>
where
    D: FrameDecoder,
    F: FnOnce(&FrameGeometry) -> Result<D, CodecError>,
{
    let frame = harness::decode_payload(geometry, payload, create)?;

    let output = pcm::output_path(input);
    let bytes_written = pcm::write_pcm(&output, frame.samples())?;

    Ok(RunOutcome {
        frame,
        output,
        bytes_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MONO_60MS: FrameGeometry = FrameGeometry::new(24000, 1, 60);

    fn encode_frame(geometry: &FrameGeometry) -> Vec<u8> {
        let pcm: Vec<i16> = (0..geometry.samples_per_channel())
            .map(|i| (10000.0 * (i % 36) as f32 / 36.0) as i16)
            .collect();
        let mut encoder = opus::Encoder::new(
            geometry.sample_rate,
            opus::Channels::Mono,
            opus::Application::Voip,
        )
        .unwrap();
        let mut out = vec![0u8; 1500];
        let n = encoder.encode(&pcm, &mut out).unwrap();
        out.truncate(n);
        out
    }

    #[test]
    fn valid_frame_round_trips_to_pcm_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("voice.opus");
        fs::write(&input, encode_frame(&MONO_60MS)).unwrap();

        let outcome = run(&input, MONO_60MS).unwrap();
        let s = outcome.frame.samples().len();

        assert!(s > 0 && s <= 1440);
        assert_eq!(outcome.output, dir.path().join("voice.opus.pcm"));
        assert_eq!(outcome.bytes_written, (s * 2) as u64);
        assert_eq!(fs::metadata(&outcome.output).unwrap().len(), (s * 2) as u64);
    }

    #[test]
    fn repeated_runs_produce_identical_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("voice.opus");
        fs::write(&input, encode_frame(&MONO_60MS)).unwrap();

        let first = run(&input, MONO_60MS).unwrap();
        let first_bytes = fs::read(&first.output).unwrap();
        let second = run(&input, MONO_60MS).unwrap();
        let second_bytes = fs::read(&second.output).unwrap();

        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn truncated_frame_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("short.opus");
        fs::write(&input, [0x03]).unwrap();

        match run(&input, MONO_60MS) {
            Err(HarnessError::Decode { code, .. }) => assert!(code < 0),
            other => panic!("expected decode error, got {:?}", other),
        }
        assert!(!pcm::output_path(&input).exists());
    }

    #[test]
    fn empty_file_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.opus");
        fs::write(&input, b"").unwrap();

        let err = run(&input, MONO_60MS).unwrap_err();
        assert!(matches!(err, HarnessError::EmptyPayload));
        assert_eq!(err.exit_code(), 2);
        assert!(!pcm::output_path(&input).exists());
    }

    #[test]
    fn unsupported_rate_fails_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("voice.opus");
        fs::write(&input, encode_frame(&MONO_60MS)).unwrap();

        let err = run(&input, FrameGeometry::new(44100, 1, 60)).unwrap_err();
        assert!(matches!(err, HarnessError::DecoderInit { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(!pcm::output_path(&input).exists());
    }

    struct SilentDecoder;

    impl FrameDecoder for SilentDecoder {
        fn decode(&mut self, _payload: &[u8], pcm: &mut [i16]) -> Result<usize, CodecError> {
            pcm[..480].fill(7);
            Ok(480)
        }
    }

    #[test]
    fn preloaded_payload_is_decoded_and_written() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("voice.opus");
        let payload = [0xF8, 0xFF, 0xFE];

        let outcome =
            decode_to_file(&input, &payload, MONO_60MS, |_| Ok(SilentDecoder)).unwrap();

        assert_eq!(outcome.frame.payload_len(), payload.len());
        assert_eq!(outcome.frame.channels(), 1);
        assert_eq!(outcome.frame.sample_rate(), 24000);
        assert_eq!(outcome.bytes_written, 960);
        assert_eq!(fs::read(&outcome.output).unwrap().len(), 960);
    }

    #[test]
    fn preloaded_payload_rejection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("short.opus");
        let payload = [0x03];

        let err = decode_to_file(&input, &payload, MONO_60MS, OpusFrameDecoder::new).unwrap_err();
        assert!(matches!(err, HarnessError::Decode { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(!pcm::output_path(&input).exists());
    }

    #[test]
    fn missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("absent.opus"), MONO_60MS).unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }));
    }
}
