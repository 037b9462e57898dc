//! Error types for the document model

use thiserror::Error;

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building or decoding document operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Value is not valid base64url
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Multihash code other than the supported SHA2-256
    #[error("Unsupported multihash code: {0}")]
    UnsupportedMultihash(u64),

    /// Document payload is not a JSON object
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

impl From<base64::DecodeError> for CoreError {
    fn from(err: base64::DecodeError) -> Self {
        CoreError::InvalidEncoding(err.to_string())
    }
}
