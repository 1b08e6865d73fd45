//! Provider error types.

use thiserror::Error;

/// Errors that can occur while fetching recommendations or search results.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request could not be sent or the connection failed.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("recommendation service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response from recommendation service: {message}")]
    Parse { message: String },

    /// The request was rejected before it was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider could not be constructed from configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// Returns `true` when the error is transient and the operation may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(err) => err.is_timeout() || err.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Parse { .. } | Self::InvalidRequest(_) | Self::Config(_) => false,
        }
    }
}

/// Convenience alias for provider results.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
