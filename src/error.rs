//! Error types for the frame decode harness.

use std::path::PathBuf;

use thiserror::Error;

use crate::audio::CodecError;

/// Every way a single harness run can end short of a written `.pcm` file.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Input could not be opened or read, or output could not be written.
    #[error("file I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Memory for the payload or PCM buffer could not be reserved.
    #[error("could not allocate {bytes} bytes")]
    Allocation { bytes: u64 },

    /// Geometry rejected before reaching the codec.
    #[error("invalid frame geometry: {0}")]
    InvalidGeometry(String),

    /// The codec refused to construct a decoder for the geometry.
    #[error("failed to create decoder: {reason}")]
    DecoderInit { reason: String },

    #[error("payload is empty, nothing to decode")]
    EmptyPayload,

    /// The codec rejected the payload.
    #[error("decode failed ({code}): {reason}")]
    Decode { code: i32, reason: String },

    #[error("decoder has already been used for this run")]
    AlreadyDecoded,
}

impl HarnessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarnessError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this failure.
    ///
    /// `1` for environment failures (I/O, memory, decoder construction),
    /// `2` when the payload itself failed to decode.
    pub fn exit_code(&self) -> u8 {
        match self {
            HarnessError::Io { .. }
            | HarnessError::Allocation { .. }
            | HarnessError::InvalidGeometry(_)
            | HarnessError::DecoderInit { .. } => 1,
            HarnessError::EmptyPayload
            | HarnessError::Decode { .. }
            | HarnessError::AlreadyDecoded => 2,
        }
    }
}

impl From<CodecError> for HarnessError {
    fn from(err: CodecError) -> Self {
        HarnessError::Decode {
            code: err.code,
            reason: err.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_failures_exit_with_one() {
        let io = HarnessError::io(
            "missing.opus",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(io.exit_code(), 1);
        assert_eq!(HarnessError::Allocation { bytes: 1 }.exit_code(), 1);
        assert_eq!(
            HarnessError::DecoderInit {
                reason: "invalid argument".into()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn decode_failures_exit_with_two() {
        assert_eq!(HarnessError::EmptyPayload.exit_code(), 2);
        let err: HarnessError = CodecError::new(-4, "corrupted stream").into();
        assert!(matches!(err, HarnessError::Decode { code: -4, .. }));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "decode failed (-4): corrupted stream");
    }
}
