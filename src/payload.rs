use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::HarnessError;

/// Read the whole file as one encoded payload.
///
/// The buffer is reserved up front from the file length so an oversized
/// input surfaces as `Allocation` instead of aborting the process.
pub fn read_payload(path: &Path) -> Result<Vec<u8>, HarnessError> {
    let mut file = File::open(path).map_err(|e| HarnessError::io(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| HarnessError::io(path, e))?
        .len();

    let capacity = usize::try_from(len).map_err(|_| HarnessError::Allocation { bytes: len })?;
    let mut data = Vec::new();
    data.try_reserve_exact(capacity)
        .map_err(|_| HarnessError::Allocation { bytes: len })?;

    file.read_to_end(&mut data)
        .map_err(|e| HarnessError::io(path, e))?;

    log::debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}
