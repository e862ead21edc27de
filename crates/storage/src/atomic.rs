// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-temp-then-rename JSON persistence.
//!
//! Readers observe either the prior file or the complete new file. The
//! temp file lives in a sibling temp directory on the same filesystem so
//! the final `rename` is atomic.

use crate::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Prefix for sibling temp directories created during atomic writes.
const TMP_DIR_PREFIX: &str = ".plash-tmp-";

/// Create a directory and all parents. Existing directories are fine.
pub fn ensure_dir(path: &Path) -> Result<(), StorageError> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Serialize `value` as 2-space-indented JSON with a trailing newline and
/// atomically move it into place at `path`.
///
/// Refuses to replace a symlink: the data directory is authoritative and
/// a link could redirect the write outside it.
pub fn atomic_write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let parent = path.parent().ok_or_else(|| {
        StorageError::Io(io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))
    })?;
    let file_name = path.file_name().ok_or_else(|| {
        StorageError::Io(io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))
    })?;
    ensure_dir(parent)?;

    if let Ok(meta) = fs::symlink_metadata(path) {
        if meta.file_type().is_symlink() {
            return Err(StorageError::SymlinkTarget(path.to_path_buf()));
        }
    }

    let tmp_dir = tempfile::Builder::new().prefix(TMP_DIR_PREFIX).tempdir_in(parent)?;
    let tmp_path = tmp_dir.path().join(file_name);

    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(&tmp_path, text)?;
    fs::rename(&tmp_path, path)?;

    // tmp_dir removes itself on drop
    Ok(())
}

/// Read and parse a JSON file. A missing file is `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&text)?))
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
