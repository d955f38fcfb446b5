//! Storage error type.
//!
//! The simulation itself has no failure surface. Only the persistence
//! backends can fail, and callers degrade to defaults instead of
//! interrupting play.

use std::fmt;

/// Failure reading or writing a persisted value
#[derive(Debug)]
pub enum StorageError {
    /// The backing store does not exist in this environment
    /// (no `window`, LocalStorage disabled, private browsing, ...).
    Unavailable,

    /// Underlying file or storage I/O failed.
    Io(String),

    /// A stored value exists but could not be decoded.
    Parse {
        /// Key or path of the value that failed to decode.
        key: String,
        /// Decoder message.
        reason: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Io(msg) => write!(f, "storage I/O failed: {msg}"),
            StorageError::Parse { key, reason } => {
                write!(f, "stored value '{key}' is malformed: {reason}")
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}
