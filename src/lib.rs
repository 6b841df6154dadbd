//! SealPack - Fixed-key file encryption and password-protected archiving.
//!
//! A small, synchronous toolkit built around two independent mechanisms:
//! - AES-256-CBC with PKCS7 padding for encrypting byte buffers and files
//! - ZIP archiving of directory trees, with AES-256 or legacy ZipCrypto
//!   entry protection when a password is supplied
//!
//! A bounded [`retry::RetryExecutor`] can wrap any operation whose failures
//! are classified by [`error::ErrorKind`].

pub mod archive;
pub mod codec;
pub mod config;
pub mod error;
pub mod file;
pub mod key;
pub mod retry;
pub mod rng;
pub mod util;

pub use archive::{AesCapability, ArchiveOutcome, ArchiveService, ProtectionMode};
pub use codec::BlockCipherCodec;
pub use error::{Error, ErrorKind, Result};
pub use key::KeyProvider;
pub use retry::{RetryExecutor, RetryPolicy};
