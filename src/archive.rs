//! Directory-to-ZIP archiving with optional password protection.
//!
//! Protection is independent of [`crate::codec::BlockCipherCodec`]: archive
//! entries use the ZIP format's own encryption, either the AES-256 extension
//! or the legacy ZipCrypto scheme. Which of the two a password buys is
//! decided by an [`AesCapability`] flag resolved once at startup and passed
//! into the service, and the choice is reported back to the caller.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::unstable::write::FileOptionsExt;
use zip::write::SimpleFileOptions;
use zip::{AesMode, CompressionMethod, ZipArchive, ZipWriter};

use crate::config::ARCHIVE_EXTENSION;
use crate::error::{Error, Result};
use crate::file::{ensure_dir, read_bytes, remove_dir, remove_file, write_bytes};

/// Whether the archive writer may use the ZIP AES-256 extension.
///
/// Resolved once by the embedding application and passed in explicitly;
/// the service itself never probes the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesCapability {
    /// AES-256 entry encryption is available.
    NativeAes,

    /// Only the legacy ZipCrypto scheme is available.
    LegacyOnly,
}

/// How the entries of a written archive are protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionMode {
    /// ZIP AES-256 extension.
    Aes256,

    /// Legacy ZipCrypto. Cryptographically weak, used only as a fallback.
    ZipCrypto,

    /// Deflate only, no encryption.
    Plain,
}

/// Result of a successful [`ArchiveService::create_archive`] call.
#[derive(Debug)]
pub struct ArchiveOutcome {
    /// Path of the written archive.
    pub path: PathBuf,

    /// Protection applied to the entries.
    pub protection: ProtectionMode,

    /// Number of file entries written.
    pub entry_count: usize,
}

/// One archive member buffered in memory: relative path plus contents.
struct Entry {
    relative: PathBuf,
    data: Vec<u8>,
}

/// Creates and extracts ZIP archives of directory trees.
pub struct ArchiveService {
    capability: AesCapability,
}

impl ArchiveService {
    #[must_use]
    pub fn new(capability: AesCapability) -> Self {
        Self { capability }
    }

    /// Reports the protection a password would buy from this writer.
    ///
    /// Exposed so callers can refuse to proceed when AES is unavailable
    /// instead of silently shipping a ZipCrypto archive.
    #[must_use]
    pub fn protection_for(&self, password: Option<&str>) -> ProtectionMode {
        match (password, self.capability) {
            (None, _) => ProtectionMode::Plain,
            (Some(_), AesCapability::NativeAes) => ProtectionMode::Aes256,
            (Some(_), AesCapability::LegacyOnly) => ProtectionMode::ZipCrypto,
        }
    }

    /// Archives every regular file under `source_dir` into a ZIP at `dest`.
    ///
    /// Entries are keyed by their path relative to `source_dir`, in
    /// directory-walk order. With `remove_source` set, the source directory
    /// is deleted only after the archive has been fully written; on any
    /// failure it is left intact.
    pub fn create_archive(
        &self,
        source_dir: &Path,
        dest: &Path,
        password: Option<&str>,
        remove_source: bool,
    ) -> Result<ArchiveOutcome> {
        if !source_dir.is_dir() {
            return Err(Error::not_found(source_dir));
        }

        let entries = collect_entries(source_dir)?;
        let protection = self.protection_for(password);
        if protection == ProtectionMode::ZipCrypto {
            warn!(
                dest = %dest.display(),
                "AES-256 unavailable, falling back to legacy ZipCrypto protection"
            );
        }

        write_archive(dest, &entries, password, protection)?;

        debug!(
            source = %source_dir.display(),
            dest = %dest.display(),
            entries = entries.len(),
            ?protection,
            "archive written"
        );

        if remove_source {
            remove_dir(source_dir)?;
        }

        Ok(ArchiveOutcome { path: dest.to_path_buf(), protection, entry_count: entries.len() })
    }

    /// Archives `source_dir` next to itself as `<name>.zip`.
    ///
    /// `name` defaults to the directory's own file name. Returns the path of
    /// the written archive.
    pub fn make_archive(
        &self,
        source_dir: &Path,
        name: Option<&str>,
        password: Option<&str>,
        remove_source: bool,
    ) -> Result<ArchiveOutcome> {
        if !source_dir.is_dir() {
            return Err(Error::not_found(source_dir));
        }

        let stem = match name {
            Some(name) => name.to_owned(),
            None => source_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| Error::not_found(source_dir))?,
        };

        let dest = source_dir
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!("{stem}.{ARCHIVE_EXTENSION}"));

        self.create_archive(source_dir, &dest, password, remove_source)
    }

    /// Recreates an archived directory tree under `dest_dir`.
    ///
    /// Every entry is read and verified in memory before anything touches
    /// the filesystem, so a wrong password or a corrupt member leaves
    /// `dest_dir` exactly as it was. With `remove_source` set, the archive
    /// file is deleted only after extraction fully succeeds.
    pub fn extract_archive(
        &self,
        archive_path: &Path,
        dest_dir: &Path,
        password: Option<&str>,
        remove_source: bool,
    ) -> Result<()> {
        if !archive_path.is_file() {
            return Err(Error::not_found(archive_path));
        }

        let entries = read_entries(archive_path, password)?;

        ensure_dir(dest_dir)?;
        let mut written = Vec::with_capacity(entries.len());
        for entry in &entries {
            let target = dest_dir.join(&entry.relative);
            if let Err(e) = write_bytes(&target, &entry.data) {
                // Disk fault mid-write: roll back what this call created.
                for path in &written {
                    let _ = std::fs::remove_file(path);
                }
                return Err(e);
            }
            written.push(target);
        }

        debug!(
            archive = %archive_path.display(),
            dest = %dest_dir.display(),
            entries = entries.len(),
            "archive extracted"
        );

        if remove_source {
            remove_file(archive_path)?;
        }

        Ok(())
    }
}

/// Walks `source_dir` and buffers every regular file with its relative path.
fn collect_entries(source_dir: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for step in WalkDir::new(source_dir) {
        let step = step.map_err(|e| match e.into_io_error() {
            Some(io) => Error::Io(io),
            None => Error::not_found(source_dir),
        })?;

        if !step.file_type().is_file() {
            continue;
        }

        let relative = step
            .path()
            .strip_prefix(source_dir)
            .map_err(|_| Error::not_found(step.path()))?
            .to_path_buf();

        entries.push(Entry { relative, data: read_bytes(step.path())? });
    }

    Ok(entries)
}

fn write_archive(
    dest: &Path,
    entries: &[Entry],
    password: Option<&str>,
    protection: ProtectionMode,
) -> Result<()> {
    let file = File::create(dest)?;
    let mut zip = ZipWriter::new(file);

    let base = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let options = match (protection, password) {
        (ProtectionMode::Aes256, Some(password)) => {
            base.with_aes_encryption(AesMode::Aes256, password)
        }
        (ProtectionMode::ZipCrypto, Some(password)) => {
            #[allow(deprecated)]
            let legacy = base.with_deprecated_encryption(password.as_bytes());
            legacy
        }
        _ => base,
    };

    for entry in entries {
        // ZIP entry names use forward slashes regardless of platform.
        let name = entry
            .relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        zip.start_file(name, options).map_err(|e| map_zip_error(e, dest))?;
        zip.write_all(&entry.data)?;
    }

    zip.finish().map_err(|e| map_zip_error(e, dest))?;
    Ok(())
}

/// Reads and decrypts every archive member into memory.
fn read_entries(archive_path: &Path, password: Option<&str>) -> Result<Vec<Entry>> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| map_zip_error(e, archive_path))?;

    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut member = match password {
            Some(password) => archive
                .by_index_decrypt(index, password.as_bytes())
                .map_err(|e| map_zip_error(e, archive_path))?,
            None => archive.by_index(index).map_err(|e| map_zip_error(e, archive_path))?,
        };

        if member.is_dir() {
            continue;
        }

        let relative = member.enclosed_name().ok_or_else(|| {
            Error::integrity(format!("archive entry escapes destination: {}", member.name()))
        })?;

        let mut data = Vec::with_capacity(usize::try_from(member.size()).unwrap_or(0));
        member.read_to_end(&mut data).map_err(|e| {
            // A wrong ZipCrypto password usually surfaces here as garbage
            // that fails the member's CRC check.
            if e.kind() == std::io::ErrorKind::InvalidData {
                Error::integrity(format!("corrupt archive member: {e}"))
            } else {
                Error::Io(e)
            }
        })?;

        entries.push(Entry { relative, data });
    }

    Ok(entries)
}

fn map_zip_error(err: ZipError, path: &Path) -> Error {
    match err {
        ZipError::Io(e) => Error::Io(e),
        ZipError::InvalidPassword => {
            Error::authentication(format!("wrong password for {}", path.display()))
        }
        ZipError::UnsupportedArchive(ZipError::PASSWORD_REQUIRED) => {
            Error::authentication(format!("password required for {}", path.display()))
        }
        ZipError::FileNotFound => Error::not_found(path),
        other => Error::integrity(format!("{}: {other}", path.display())),
    }
}
