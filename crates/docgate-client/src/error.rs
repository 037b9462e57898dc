//! Error types for the docgate client

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while calling a docgate server
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request could not be sent (after retries)
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Response body could not be read
    #[error("reading response body failed: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// Server answered with a non-200 status; `message` is the response body
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// Response body is not a resolution result
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// HTTP status of a [`ClientError::Status`] failure
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<docgate_core::CoreError> for ClientError {
    fn from(err: docgate_core::CoreError) -> Self {
        ClientError::InvalidResponse(err.to_string())
    }
}
