//! Error taxonomy shared by the codec, archive, and retry layers.
//!
//! Every failure surfaces as one of a small set of kinds so that callers can
//! match on the cause and the retry layer can classify without downcasting.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for all SealPack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by SealPack operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced file or directory does not exist.
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Ciphertext or archive data failed structural validation.
    ///
    /// For the codec this covers a blob whose ciphertext is not a positive
    /// multiple of the block size and recovered padding that is invalid.
    /// CBC does not authenticate, so padding validity is the only tamper
    /// check; a forged blob that happens to unpad cleanly is not detected.
    #[error("integrity failure: {reason}")]
    Integrity { reason: String },

    /// An archive password was wrong or missing.
    #[error("authentication failed: {reason}")]
    Authentication { reason: String },

    /// A failure the caller has classified as worth retrying.
    ///
    /// Nothing in this crate produces this kind; it exists for callers
    /// wrapping flaky external I/O in a [`crate::retry::RetryExecutor`].
    #[error("transient failure: {reason}")]
    Transient { reason: String },

    /// An underlying I/O fault that maps to no more specific kind.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn integrity(reason: impl Into<String>) -> Self {
        Self::Integrity { reason: reason.into() }
    }

    pub fn authentication(reason: impl Into<String>) -> Self {
        Self::Authentication { reason: reason.into() }
    }

    pub fn transient(reason: impl Into<String>) -> Self {
        Self::Transient { reason: reason.into() }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Integrity { .. } => ErrorKind::Integrity,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Transient { .. } => ErrorKind::Transient,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Discriminant of [`Error`], used by [`crate::retry::RetryPolicy`] to decide
/// which failures are retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Integrity,
    Authentication,
    Transient,
    Io,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::not_found("missing.txt").kind(), ErrorKind::NotFound);
        assert_eq!(Error::integrity("bad padding").kind(), ErrorKind::Integrity);
        assert_eq!(Error::authentication("wrong password").kind(), ErrorKind::Authentication);
        assert_eq!(Error::transient("connection reset").kind(), ErrorKind::Transient);

        let io = Error::from(std::io::Error::other("disk"));
        assert_eq!(io.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_not_found_display_includes_path() {
        let err = Error::not_found("data/input.bin");
        assert!(err.to_string().contains("data/input.bin"));
    }
}
