//! Fixed symmetric key held for the process lifetime.

use secrecy::{ExposeSecret, SecretBox};

use crate::config::KEY_SIZE;
use crate::error::{Error, Result};

/// Holds the 256-bit encryption key used by [`crate::codec::BlockCipherCodec`].
///
/// Constructed once at startup and passed by reference into the codec, so
/// tests can inject a known key and a future rotation only touches the
/// construction site. The material lives in a [`SecretBox`], which zeroes it
/// on drop and keeps it out of `Debug` output.
pub struct KeyProvider {
    inner: SecretBox<[u8; KEY_SIZE]>,
}

impl KeyProvider {
    /// Wraps pre-provisioned key material.
    #[must_use]
    pub fn from_bytes(key: [u8; KEY_SIZE]) -> Self {
        Self { inner: SecretBox::new(Box::new(key)) }
    }

    /// Parses a 64-character hex string into a key.
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let decoded = hex::decode(encoded.trim())
            .map_err(|e| Error::integrity(format!("invalid hex key: {e}")))?;

        let key: [u8; KEY_SIZE] = decoded.try_into().map_err(|bytes: Vec<u8>| {
            Error::integrity(format!("expected {KEY_SIZE} byte key, got {}", bytes.len()))
        })?;

        Ok(Self::from_bytes(key))
    }

    /// Exposes the raw key material.
    #[must_use]
    pub fn expose_secret(&self) -> &[u8; KEY_SIZE] {
        self.inner.expose_secret()
    }
}

impl std::fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyProvider([... {KEY_SIZE} bytes ...])")
    }
}
