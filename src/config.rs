//! Global Configuration Constants
//!
//! Cipher parameters and file-format constants used throughout SealPack.
//! The cipher is fixed: AES with a 256-bit key in CBC mode. There is no
//! algorithm negotiation, so these values double as the wire contract for
//! encrypted blobs.

/// Size of the symmetric encryption key in bytes.
///
/// 32 bytes (256 bits) selects AES-256. The key is provisioned out of band
/// and held for the process lifetime; this crate never derives or rotates it.
pub const KEY_SIZE: usize = 32;

/// AES block size in bytes.
///
/// Fixed at 16 by the AES specification. Ciphertext length is always a
/// multiple of this value, and PKCS7 padding always adds between 1 and
/// `BLOCK_SIZE` bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of the CBC initialization vector in bytes.
///
/// Equal to the block size. A fresh random IV is generated for every
/// encryption call and stored as the first `IV_SIZE` bytes of the blob;
/// reusing an IV under the same key is forbidden.
pub const IV_SIZE: usize = 16;

/// Minimum valid length of an encrypted blob.
///
/// The IV plus one ciphertext block. Even the empty plaintext pads out to a
/// full block, so anything shorter than this is corrupt by definition.
pub const MIN_BLOB_SIZE: usize = IV_SIZE + BLOCK_SIZE;

/// File extension used by [`crate::archive::ArchiveService::make_archive`]
/// when deriving an archive path from a directory name.
pub const ARCHIVE_EXTENSION: &str = "zip";
