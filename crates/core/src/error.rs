//! Error types for lexset
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Every variant maps to an [`ErrorKind`], which is what callers branch on:
//! the CLI uses it to pick an exit code, the loader to decide whether a
//! failure aborts the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::key::KeyError;

/// Result type alias for lexset operations
pub type LexsetResult<T> = std::result::Result<T, LexsetError>;

/// Coarse classification of a [`LexsetError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid or missing source directory, scratch directory or config file
    Configuration,
    /// A round trip to the sorted-set service failed
    StoreUnavailable,
    /// A stored composite key could not be decoded
    Decode,
    /// A raw entry cannot be encoded
    InvalidInput,
    /// Reading a source file failed
    Io,
}

/// Error types for lexset
#[derive(Debug, Error)]
pub enum LexsetError {
    /// Source directory does not exist
    #[error("Source path '{}' does not exist", path.display())]
    SourceNotFound {
        /// Offending path
        path: PathBuf,
    },

    /// Source path exists but is not a directory
    #[error("Source path '{}' is not a directory", path.display())]
    NotADirectory {
        /// Offending path
        path: PathBuf,
    },

    /// Any other configuration problem (scratch dir, config file, bad setting)
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Human-readable description, including the offending path
        reason: String,
    },

    /// Sorted-set service round trip failed
    #[error("Store unavailable during {operation}: {reason}")]
    StoreUnavailable {
        /// Store operation that failed (e.g. "ZADD")
        operation: &'static str,
        /// Transport or server error message
        reason: String,
    },

    /// Stored composite key is corrupt
    #[error("Cannot decode stored key {key:?}: {reason}")]
    Decode {
        /// Lossy rendering of the stored key
        key: String,
        /// Why decoding failed
        reason: String,
    },

    /// Raw entry cannot be encoded
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Why the entry was rejected
        reason: String,
    },

    /// I/O failure while reading source data
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl LexsetError {
    /// Create a configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        LexsetError::Configuration {
            reason: reason.into(),
        }
    }

    /// Create a store-unavailable error for the given operation
    pub fn store_unavailable(operation: &'static str, reason: impl ToString) -> Self {
        LexsetError::StoreUnavailable {
            operation,
            reason: reason.to_string(),
        }
    }

    /// Create an invalid-input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        LexsetError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LexsetError::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LexsetError::SourceNotFound { .. }
            | LexsetError::NotADirectory { .. }
            | LexsetError::Configuration { .. } => ErrorKind::Configuration,
            LexsetError::StoreUnavailable { .. } => ErrorKind::StoreUnavailable,
            LexsetError::Decode { .. } => ErrorKind::Decode,
            LexsetError::InvalidInput { .. } => ErrorKind::InvalidInput,
            LexsetError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Process exit code used by the command-line front end
    ///
    /// A missing source directory and a non-directory source path get
    /// distinct codes so scripts can tell them apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            LexsetError::Configuration { .. } => 1,
            LexsetError::SourceNotFound { .. } => 2,
            LexsetError::NotADirectory { .. } => 3,
            LexsetError::StoreUnavailable { .. } => 4,
            LexsetError::InvalidInput { .. } => 5,
            LexsetError::Io { .. } => 6,
            // Decode errors are skipped per entry and never reach the top level
            LexsetError::Decode { .. } => 7,
        }
    }

    /// Returns true if a retry of the same call might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, LexsetError::StoreUnavailable { .. })
    }
}

impl From<KeyError> for LexsetError {
    fn from(e: KeyError) -> Self {
        match e {
            KeyError::MissingSeparator { ref key } | KeyError::NotUtf8 { ref key } => {
                LexsetError::Decode {
                    key: key.clone(),
                    reason: e.to_string(),
                }
            }
            KeyError::Empty | KeyError::TooLong { .. } => LexsetError::InvalidInput {
                reason: e.to_string(),
            },
        }
    }
}
