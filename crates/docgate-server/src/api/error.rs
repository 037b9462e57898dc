//! Errors surfaced by document handlers
//!
//! Error responses carry the message as a plain-text body so callers can
//! report it verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use docgate_core::CoreError;

/// Failure raised by a [`crate::Processor`] or [`crate::Resolver`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ProcessingError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProcessingError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProcessingError::NotFound(_) => StatusCode::NOT_FOUND,
            ProcessingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProcessingError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

impl From<CoreError> for ProcessingError {
    fn from(err: CoreError) -> Self {
        ProcessingError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ProcessingError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProcessingError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ProcessingError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_is_body_text() {
        let err = ProcessingError::BadRequest("invalid request".into());
        assert_eq!(err.to_string(), "invalid request");
    }

    #[test]
    fn test_core_error_is_bad_request() {
        let err: ProcessingError = CoreError::UnsupportedMultihash(7).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
