//! Server lifecycle and construction errors

use axum::http::Method;
use std::io;
use thiserror::Error;

/// Result type for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors returned by [`crate::HttpServer`]
#[derive(Error, Debug)]
pub enum ServerError {
    /// `start` called on a running server
    #[error("server already started")]
    AlreadyStarted,

    /// `stop` called before `start`
    #[error("server not started")]
    NotStarted,

    /// `start` or `stop` called after `stop`
    #[error("server already stopped")]
    AlreadyStopped,

    /// Two handlers registered for the same path and method
    #[error("duplicate route: {method} {path}")]
    DuplicateRoute { path: String, method: Method },

    /// Method the router cannot dispatch on
    #[error("unsupported method: {0}")]
    UnsupportedMethod(Method),

    /// Malformed path template
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Listen address could not be resolved
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Listener could not be bound
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Certificate or key could not be loaded
    #[error("failed to load TLS material: {0}")]
    Tls(#[source] io::Error),

    /// Serving loop ended with an error
    #[error("server error: {0}")]
    Serve(#[source] io::Error),

    /// Serving task did not finish after shutdown
    #[error("shutdown failed: {0}")]
    Shutdown(String),
}
