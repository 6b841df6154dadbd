//! Whole-file and directory helpers shared by the codec and archive layers.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Reads an entire file into memory.
///
/// A missing path maps to [`Error::NotFound`]; other faults pass through as
/// [`Error::Io`]. File size is bounded by available memory, there is no
/// streaming path.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::not_found(path)),
        Err(e) => Err(e.into()),
    }
}

/// Writes a buffer to a file, creating parent directories as needed.
pub fn write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, data)?;
    Ok(())
}

/// Creates a directory and all missing parents, returning the path.
pub fn ensure_dir(path: &Path) -> Result<&Path> {
    fs::create_dir_all(path)?;
    Ok(path)
}

/// Removes a directory and all its contents. Missing directories are a no-op.
pub fn remove_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)?;
    }

    Ok(())
}

/// Removes a single file.
pub fn remove_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::not_found(path));
    }

    fs::remove_file(path)?;
    Ok(())
}

/// Lists the regular files directly under `path`, optionally filtered by a
/// name suffix. Non-recursive.
pub fn list_files(path: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Err(Error::not_found(path));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry_path.is_file() && entry_path.to_string_lossy().ends_with(suffix) {
            files.push(entry_path);
        }
    }

    Ok(files)
}
