//! Error types for OxiBWT operations.
//!
//! Every failure in the pipeline is deterministic and data-dependent, so the
//! taxonomy is small: bad arguments at construction, out-of-range queries,
//! malformed transform payloads, and I/O failures from the framing layer.

use std::io;
use thiserror::Error;

/// The main error type for OxiBWT operations.
#[derive(Debug, Error)]
pub enum OxiBwtError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An argument was rejected at construction time.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// An index query fell outside `[0, length)`.
    #[error("Index {index} out of range for length {length}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of valid positions.
        length: usize,
    },

    /// A transform payload could not be decoded.
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// Description of what was wrong with the payload.
        message: String,
    },
}

/// Result type alias for OxiBWT operations.
pub type Result<T> = std::result::Result<T, OxiBwtError>;

impl OxiBwtError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an out of range error.
    pub fn out_of_range(index: usize, length: usize) -> Self {
        Self::OutOfRange { index, length }
    }

    /// Create a malformed input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Returns true if this error describes a bad payload rather than a bad call.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}
