//! Error types for bundle loading.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading a translation bundle.
///
/// Errors are `Clone` because one load result is handed to every request
/// waiting on the same language.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    /// A bundle file could not be read
    #[error("Failed to read translation file {path}: {reason}")]
    Read {
        path: String,
        reason: String,
        /// Whether another attempt could plausibly succeed
        transient: bool,
    },

    /// A bundle file is not valid JSON for its schema
    #[error("Failed to parse translation file {path}: {reason}")]
    Parse { path: String, reason: String },

    /// The load did not finish within the configured timeout
    #[error("Loading translations for '{language}' timed out after {after:?}")]
    Timeout { language: String, after: Duration },

    /// The background load task panicked or was aborted
    #[error("Loading task for '{language}' failed: {reason}")]
    TaskFailed { language: String, reason: String },
}

impl BundleError {
    /// Read failures other than a missing file, and timeouts, may be retried.
    /// Malformed files will not fix themselves.
    pub fn is_retryable(&self) -> bool {
        match self {
            BundleError::Read { transient, .. } => *transient,
            BundleError::Timeout { .. } => true,
            BundleError::Parse { .. } | BundleError::TaskFailed { .. } => false,
        }
    }
}

/// Result type for bundle operations
pub type BundleResult<T> = Result<T, BundleError>;
