//! Boot image loading.
//!
//! This module reads raw boot images from disk and places them in main
//! memory. It performs:
//! 1. **Exact-size reads:** Reads precisely the byte count the caller declared, failing on short files.
//! 2. **Capacity checks:** Rejects images larger than the main memory region.
//! 3. **Placement:** Writes the image at the base of memory region 0 through the hart's store path.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::common::error::{MachineError, MachineResult};
use crate::sim::machine::Machine;

/// Reads a boot image from disk and writes it to the base of main memory.
///
/// The caller declares the image size up front; a file shorter than the
/// declared size is an error rather than a silent partial load, because a
/// half-loaded image makes every later comparison fail far from the cause.
/// Bytes past the declared size are ignored.
///
/// # Arguments
///
/// * `machine` - The machine whose main memory receives the image.
/// * `path` - Path to the raw image file.
/// * `expected_size` - Exact number of bytes to read and place.
///
/// # Errors
///
/// Returns [`MachineError::ImageTooLarge`] when the image does not fit in
/// memory region 0, [`MachineError::ImageIo`] when the file cannot be read,
/// and [`MachineError::ImageTruncated`] when it holds fewer bytes than
/// declared.
pub fn load_image(machine: &mut Machine, path: &Path, expected_size: u64) -> MachineResult<()> {
    let region = machine.config().main_memory().ok_or_else(|| {
        MachineError::InvalidConfig("no memory region to load the boot image into".to_owned())
    })?;
    let base = region.base;
    let capacity = region.size;

    if expected_size > capacity {
        return Err(MachineError::ImageTooLarge {
            size: expected_size,
            capacity,
        });
    }

    let file = File::open(path).map_err(|source| MachineError::ImageIo {
        path: path.to_path_buf(),
        source,
    })?;

    let mut image = Vec::with_capacity(expected_size as usize);
    let actual = file
        .take(expected_size)
        .read_to_end(&mut image)
        .map_err(|source| MachineError::ImageIo {
            path: path.to_path_buf(),
            source,
        })?;

    if (actual as u64) < expected_size {
        return Err(MachineError::ImageTruncated {
            path: path.to_path_buf(),
            expected: expected_size,
            actual: actual as u64,
        });
    }

    machine.boot_hart_mut().store_bytes(base as u32, &image)?;
    debug!("loaded {} byte image at {:#010x}", image.len(), base);
    Ok(())
}
