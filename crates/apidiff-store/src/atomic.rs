//! Atomic write primitives
//!
//! Uses temp→rename pattern to ensure no partial writes

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{io_error, Result};

/// Sibling of `target` used while writing: the file name plus `.tmp`
pub fn temp_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Atomically write bytes to a file
///
/// Creates missing parent directories, writes a temp sibling and renames it
/// over the target.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", parent, e))?;
    }

    let temp = temp_path(target);
    fs::write(&temp, content).map_err(|e| io_error("write_temp", &temp, e))?;
    fs::rename(&temp, target).map_err(|e| io_error("rename_temp", target, e))?;

    Ok(())
}
