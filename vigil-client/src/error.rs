//! Error types for the Vigil client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the remote job service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received (network, timeout)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The service throttled the call
    #[error("throttled by the service: {0}")]
    Throttled(String),

    /// Resource not found
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The service rejected the request as invalid
    #[error("validation error: {0}")]
    Validation(String),

    /// The service failed transiently (5xx)
    #[error("transient service error (status {status}): {message}")]
    Transient {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// API returned an unexpected error status code
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Classify an error response by HTTP status code
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => Self::NotFound(message),
            429 => Self::Throttled(message),
            400 | 422 => Self::Validation(message),
            s if s >= 500 => Self::Transient { status: s, message },
            _ => Self::Api { status, message },
        }
    }

    /// Check if this error is a throttling error
    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled(_))
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if a retry of the same idempotent call may succeed
    ///
    /// Covers throttling, server-side failures and transport errors.
    /// Validation and not-found errors are never retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Throttled(_) | Self::Transient { .. } | Self::RequestFailed(_)
        )
    }
}
