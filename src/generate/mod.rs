//! Linker script generation.

pub mod link;

use std::path::Path;

use tempfile::NamedTempFile;

use crate::{DeviceMap, Error, Result};

/// Render the linker script for `devices` into the file at `path`.
///
/// The script goes through a temporary file in the destination
/// directory and is renamed into place on success, so a failed run
/// never leaves a partial output file behind.
pub fn write_script(devices: &DeviceMap, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    link::render(devices, &mut tmp)?;
    let _ = tmp.persist(path).map_err(|e| Error::OutputWrite(e.error))?;
    Ok(())
}
