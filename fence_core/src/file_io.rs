//! # File I/O Module
//!
//! Atomic writes for exported results: write to a `.tmp` sibling, sync,
//! then rename over the target. An interrupted or failed save never leaves
//! a half-written workbook at the destination.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fence_core::file_io::write_atomic;
//! use std::path::Path;
//!
//! write_atomic(Path::new("result.xlsx"), b"bytes")?;
//! # Ok::<(), fence_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{CalcError, CalcResult};

/// Temp file path used while saving `path` (`result.xlsx` → `result.xlsx.tmp`)
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write bytes to a file with atomic semantics.
///
/// The save process:
/// 1. Write to a temporary file (`<name>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename the temp file over the target
///
/// # Errors
///
/// `CalcError::FileError` if any step fails; the temp file is removed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = temp_path_for(path);

    let result = write_and_sync(&tmp_path, bytes).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| {
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }

    result
}

fn write_and_sync(tmp_path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })
}
