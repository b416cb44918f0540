use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::HarnessError;

/// Sibling output path: `voice.opus` → `voice.opus.pcm`.
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".pcm");
    PathBuf::from(name)
}

/// Dump samples as headerless 16-bit little-endian PCM.
///
/// Returns the number of bytes written (`samples.len() * 2`).
pub fn write_pcm(path: &Path, samples: &[i16]) -> Result<u64, HarnessError> {
    let file = File::create(path).map_err(|e| HarnessError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for sample in samples {
        writer
            .write_all(&sample.to_le_bytes())
            .map_err(|e| HarnessError::io(path, e))?;
    }
    writer.flush().map_err(|e| HarnessError::io(path, e))?;

    let bytes = (samples.len() * std::mem::size_of::<i16>()) as u64;
    log::debug!("Wrote {} bytes to {}", bytes, path.display());
    Ok(bytes)
}
