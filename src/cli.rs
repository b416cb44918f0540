use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::FrameGeometry;

/// Decode a single Opus frame from a file and dump it as raw PCM.
#[derive(Debug, Parser)]
#[command(name = "opus_frame_check", version)]
pub struct Cli {
    /// Encoded payload; the whole file is decoded as one frame
    pub input: PathBuf,

    /// Payload layout. Only `raw` exists, so this is accepted and ignored
    #[arg(value_enum)]
    pub mode: Option<PayloadMode>,

    /// Decoder sample rate in Hz (default from config.toml)
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Decoder channel count (default from config.toml)
    #[arg(long)]
    pub channels: Option<u32>,

    /// Frame duration in ms used to size the output buffer (default from config.toml)
    #[arg(long = "frame-ms")]
    pub frame_ms: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PayloadMode {
    /// No length prefixes; the file is one packet
    Raw,
}

impl Cli {
    /// Geometry for this run: command-line overrides on top of `defaults`.
    pub fn geometry(&self, defaults: FrameGeometry) -> FrameGeometry {
        FrameGeometry {
            sample_rate: self.sample_rate.unwrap_or(defaults.sample_rate),
            channels: self.channels.unwrap_or(defaults.channels),
            frame_duration_ms: self.frame_ms.unwrap_or(defaults.frame_duration_ms),
        }
    }
}
