//! API Client Error Types
//!
//! Errors raised while executing or decoding GLiDe API requests.

use thiserror::Error;

/// Errors that can occur when talking to the GLiDe API
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API could not be reached
    #[error("GLiDe API unavailable: {0}")]
    Unavailable(String),

    /// The request did not complete within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected record shape
    #[error("Failed to decode response of {operation}: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

impl ClientError {
    /// Build a decode error for the named operation
    pub fn decode(operation: &'static str, error: impl std::fmt::Display) -> Self {
        ClientError::Decode {
            operation,
            message: error.to_string(),
        }
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

/// Result type for API client operations
pub type ClientResult<T> = Result<T, ClientError>;
