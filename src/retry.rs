//! Bounded retry of fallible operations, classified by error kind.
//!
//! Retry decisions are matches on [`ErrorKind`], never blanket catches:
//! an error whose kind is not listed as retryable propagates on first
//! occurrence, and an exhausted budget propagates the last failure
//! unmodified so callers see the original error.

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::{ErrorKind, Result};

/// Controls how [`RetryExecutor`] treats failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total invocation budget, including the first attempt. Clamped to at
    /// least 1.
    pub max_attempts: u32,

    /// Error kinds worth retrying. Everything else fails fast.
    pub retryable: Vec<ErrorKind>,

    /// Fixed pause between attempts. Zero skips the sleep. No backoff.
    pub delay: Duration,
}

impl RetryPolicy {
    /// A policy retrying only [`ErrorKind::Transient`] failures.
    #[must_use]
    pub fn transient(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, retryable: vec![ErrorKind::Transient], delay }
    }

    /// Adds an error kind to the retryable set.
    #[must_use]
    pub fn retry_on(mut self, kind: ErrorKind) -> Self {
        if !self.retryable.contains(&kind) {
            self.retryable.push(kind);
        }
        self
    }

    fn retries(&self, kind: ErrorKind) -> bool {
        self.retryable.contains(&kind)
    }
}

impl Default for RetryPolicy {
    /// Three attempts at transient failures with no delay.
    fn default() -> Self {
        Self::transient(3, Duration::ZERO)
    }
}

/// Runs operations under a [`RetryPolicy`].
///
/// Bounds attempts, not wall-clock time; a caller needing a deadline must
/// impose it externally.
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Invokes `op` until it succeeds, fails non-retryably, or the attempt
    /// budget runs out.
    pub fn execute<T, F>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max_attempts && self.policy.retries(err.kind()) => {
                    debug!(attempt, max_attempts, %err, "retrying after failure");
                    if !self.policy.delay.is_zero() {
                        thread::sleep(self.policy.delay);
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}
