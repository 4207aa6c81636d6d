//! Error types for the neuroevolution engine.
//!
//! Every error raised by the core is a violation of a caller contract
//! (mismatched lengths, invalid parameters, malformed genome codes). None of
//! them are retried and none leave a component half-updated.

use thiserror::Error;

/// Main error type for evodrive operations.
#[derive(Error, Debug)]
pub enum EvoError {
    /// An argument did not satisfy the operation's contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested index or amount exceeds what is available.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// A genome code or byte buffer could not be decoded.
    #[error("Format error: {0}")]
    Format(String),

    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for evodrive operations.
pub type Result<T> = std::result::Result<T, EvoError>;

impl EvoError {
    /// Creates a new invalid argument error.
    #[must_use]
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates a new out of range error.
    #[must_use]
    pub fn out_of_range<S: Into<String>>(msg: S) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Creates a new format error.
    #[must_use]
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Self::Format(msg.into())
    }
}

impl From<hex::FromHexError> for EvoError {
    fn from(err: hex::FromHexError) -> Self {
        Self::Format(err.to_string())
    }
}
