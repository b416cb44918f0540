//! One-shot frame decode harness.
//!
//! Owns a decoder for exactly one decode call:
//! `Ready → Decoded | Failed → Released`. Before `FrameHarness::new`
//! returns there is no harness, so there is no uninitialized state to hold.
//! The output buffer is sized from the same `FrameGeometry` the decoder
//! was built from, so capacity and decoder configuration cannot drift.

use crate::audio::{CodecError, FrameDecoder};
use crate::config::FrameGeometry;
use crate::error::HarnessError;

// Reported when a decoder claims more samples than the buffer holds
// (same value as OPUS_BUFFER_TOO_SMALL).
const OVER_CAPACITY_CODE: i32 = -2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    Ready,
    Decoded,
    Failed,
    Released,
}

/// PCM produced by a successful decode.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    samples: Vec<i16>,
    samples_per_channel: usize,
    channels: u32,
    sample_rate: u32,
    payload_len: usize,
}

impl DecodedFrame {
    /// Interleaved samples actually written by the decoder.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn samples_per_channel(&self) -> usize {
        self.samples_per_channel
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Size of the encoded payload this frame came from.
    pub fn payload_len(&self) -> usize {
        self.payload_len
    }

    /// Playback length of the decoded audio in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.samples_per_channel as f64 * 1000.0 / self.sample_rate as f64
    }
}

pub struct FrameHarness<D: FrameDecoder> {
    geometry: FrameGeometry,
    decoder: Option<D>,
    state: HarnessState,
}

impl<D: FrameDecoder> FrameHarness<D> {
    /// Validate `geometry` and build a decoder for it with `create`.
    ///
    /// A rejected geometry is fatal; there is no fallback.
    pub fn new<F>(geometry: FrameGeometry, create: F) -> Result<Self, HarnessError>
    where
        F: FnOnce(&FrameGeometry) -> Result<D, CodecError>,
    {
        geometry.validate()?;

        let decoder = create(&geometry).map_err(|e| {
            log::error!("Decoder init rejected {:?}: {}", geometry, e);
            HarnessError::DecoderInit { reason: e.reason }
        })?;

        log::info!(
            "Decoder ready: {}Hz, {}ch, {}ms, capacity {} samples",
            geometry.sample_rate,
            geometry.channels,
            geometry.frame_duration_ms,
            geometry.max_output_samples()
        );

        Ok(Self {
            geometry,
            decoder: Some(decoder),
            state: HarnessState::Ready,
        })
    }

    pub fn geometry(&self) -> &FrameGeometry {
        &self.geometry
    }

    pub fn state(&self) -> HarnessState {
        self.state
    }

    /// Decode the whole payload as a single frame.
    ///
    /// Payload length is not checked against the geometry; the decoder's
    /// own error is authoritative. Only one call per harness succeeds in
    /// reaching the decoder.
    pub fn decode_once(&mut self, payload: &[u8]) -> Result<DecodedFrame, HarnessError> {
        if self.state != HarnessState::Ready {
            return Err(HarnessError::AlreadyDecoded);
        }
        let Some(decoder) = self.decoder.as_mut() else {
            return Err(HarnessError::AlreadyDecoded);
        };

        // libopus treats a zero-length packet as packet loss and would
        // synthesize concealment audio instead of failing.
        if payload.is_empty() {
            self.state = HarnessState::Failed;
            return Err(HarnessError::EmptyPayload);
        }

        let capacity = self.geometry.max_output_samples();
        let mut pcm: Vec<i16> = Vec::new();
        if pcm.try_reserve_exact(capacity).is_err() {
            self.state = HarnessState::Failed;
            return Err(HarnessError::Allocation {
                bytes: capacity.saturating_mul(std::mem::size_of::<i16>()) as u64,
            });
        }
        pcm.resize(capacity, 0);

        let result = decoder.decode(payload, &mut pcm);

        let samples_per_channel = match result {
            Ok(n) => n,
            Err(e) => {
                log::warn!("Decode rejected {} byte payload: {}", payload.len(), e);
                self.state = HarnessState::Failed;
                return Err(e.into());
            }
        };

        let total = samples_per_channel.saturating_mul(self.geometry.channels as usize);
        if total > pcm.len() {
            self.state = HarnessState::Failed;
            return Err(HarnessError::Decode {
                code: OVER_CAPACITY_CODE,
                reason: format!(
                    "decoder reported {} samples, buffer holds {}",
                    total,
                    pcm.len()
                ),
            });
        }

        pcm.truncate(total);
        self.state = HarnessState::Decoded;
        log::debug!(
            "Decoded {} bytes into {} samples/ch",
            payload.len(),
            samples_per_channel
        );

        Ok(DecodedFrame {
            samples: pcm,
            samples_per_channel,
            channels: self.geometry.channels,
            sample_rate: self.geometry.sample_rate,
            payload_len: payload.len(),
        })
    }

    /// Release the decoder now. Dropping the harness does the same.
    pub fn release(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(decoder) = self.decoder.take() {
            drop(decoder);
            log::debug!("Decoder released after {:?}", self.state);
            self.state = HarnessState::Released;
        }
    }
}

impl<D: FrameDecoder> Drop for FrameHarness<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Initialize, decode once and release, in that order.
pub fn decode_payload<D, F>(
    geometry: FrameGeometry,
    payload: &[u8],
    create: F,
) -> Result<DecodedFrame, HarnessError>
where
    D: FrameDecoder,
    F: FnOnce(&FrameGeometry) -> Result<D, CodecError>,
{
    let mut harness = FrameHarness::new(geometry, create)?;
    let result = harness.decode_once(payload);
    harness.release();
    result
}
