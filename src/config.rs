use std::time::Duration;

use crate::error::HarnessError;

/// Longest frame an Opus packet can carry.
pub const MAX_FRAME_DURATION_MS: u32 = 120;

/// Frame geometry: the single source of truth for decoder construction
/// and output buffer sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub sample_rate: u32,
    pub channels: u32,
    pub frame_duration_ms: u32,
}

impl FrameGeometry {
    pub const fn new(sample_rate: u32, channels: u32, frame_duration_ms: u32) -> Self {
        Self {
            sample_rate,
            channels,
            frame_duration_ms,
        }
    }

    /// Number of samples per channel for one frame (e.g. 1440 for 24kHz/60ms).
    pub fn samples_per_channel(&self) -> usize {
        (self.sample_rate as u64 * self.frame_duration_ms as u64 / 1000) as usize
    }

    /// Total number of interleaved i16 samples one frame can hold.
    ///
    /// This is the output buffer capacity and the bound handed to the decoder.
    /// Saturates at `usize::MAX`; `validate()` rejects such geometries.
    pub fn max_output_samples(&self) -> usize {
        self.checked_capacity().unwrap_or(usize::MAX)
    }

    fn checked_capacity(&self) -> Option<usize> {
        let per_channel =
            usize::try_from(self.sample_rate as u64 * self.frame_duration_ms as u64 / 1000).ok()?;
        per_channel.checked_mul(usize::try_from(self.channels).ok()?)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_duration_ms as u64)
    }

    /// Reject geometries that would size a zero-capacity or unrepresentable
    /// buffer, or a frame longer than Opus allows.
    ///
    /// Whether the codec supports the rate/channel pair is left to the
    /// decoder constructor.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.channels == 0 {
            return Err(HarnessError::InvalidGeometry(
                "channel count must be at least 1".to_string(),
            ));
        }
        if self.frame_duration_ms == 0 {
            return Err(HarnessError::InvalidGeometry(
                "frame duration must be non-zero".to_string(),
            ));
        }
        if self.frame_duration_ms > MAX_FRAME_DURATION_MS {
            return Err(HarnessError::InvalidGeometry(format!(
                "frame duration {} ms exceeds the {} ms Opus maximum",
                self.frame_duration_ms, MAX_FRAME_DURATION_MS
            )));
        }
        if self.checked_capacity().is_none() {
            return Err(HarnessError::InvalidGeometry(format!(
                "{} Hz x {} ch x {} ms overflows the buffer size",
                self.sample_rate, self.channels, self.frame_duration_ms
            )));
        }
        if self.samples_per_channel() == 0 {
            return Err(HarnessError::InvalidGeometry(format!(
                "{} Hz over {} ms yields no samples",
                self.sample_rate, self.frame_duration_ms
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: &'static str,
    pub app_version: &'static str,

    // 默认帧几何参数
    pub geometry: FrameGeometry,
}

impl Config {
    /// 从编译时设置的环境变量创建配置
    /// 所有参数都在编译时从 config.toml 中读取
    pub fn new() -> Result<Self, &'static str> {
        Ok(Self {
            app_name: env!("APP_NAME"),
            app_version: env!("APP_VERSION"),

            geometry: FrameGeometry {
                sample_rate: env!("FRAME_SAMPLE_RATE").parse()
                    .map_err(|_| "Failed to parse FRAME_SAMPLE_RATE")?,
                channels: env!("FRAME_CHANNELS").parse()
                    .map_err(|_| "Failed to parse FRAME_CHANNELS")?,
                frame_duration_ms: env!("FRAME_DURATION_MS").parse()
                    .map_err(|_| "Failed to parse FRAME_DURATION_MS")?,
            },
        })
    }
}
