//! Error types for WRP endpoints

use thiserror::Error;

/// Result type alias for endpoint operations
pub type WrpResult<T> = Result<T, WrpError>;

/// Error type for endpoint operations
#[derive(Error, Debug)]
pub enum WrpError {
    /// A caller passed a value that can never be valid, such as an absent context
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading or writing the underlying stream failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a message failed
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Decoding a message failed
    #[error("deserialization error: {0}")]
    DeserializationError(String),

    /// The requested wire format is not known
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The request context was cancelled
    #[error("request cancelled")]
    Cancelled,

    /// The request context deadline passed
    #[error("request timed out")]
    Timeout,

    /// A service handler failed
    #[error("handler error: {0}")]
    HandlerError(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl WrpError {
    /// Whether this error came from the caller's own context rather than the message
    pub fn is_context_error(&self) -> bool {
        matches!(self, WrpError::Cancelled | WrpError::Timeout)
    }
}

impl From<serde_json::Error> for WrpError {
    fn from(err: serde_json::Error) -> Self {
        WrpError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
