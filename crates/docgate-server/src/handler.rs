//! Handler contract
//!
//! Anything that can answer an HTTP request at a fixed path and method is a
//! [`RequestHandler`]. Document logic plugs in through [`Processor`] (create
//! and update) and [`Resolver`] (lookup by id); the generic handlers in
//! [`crate::api::handlers`] turn either one into a `RequestHandler`.

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::Method;
use axum::response::Response;
use bytes::Bytes;

use docgate_core::ResolutionResult;

use crate::api::error::ProcessingError;

/// A servable route: path template, HTTP method and the code that answers it
///
/// The path may contain a single `{name}` placeholder which the handler reads
/// back with axum's `Path` extractor.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Route template, e.g. `/document/{id}`
    fn path(&self) -> String;

    /// HTTP method this handler answers
    fn method(&self) -> Method;

    /// Produce the response for a matched request
    async fn handle(&self, request: Request) -> Response;
}

/// Creates or updates documents from a raw operation body
#[async_trait]
pub trait Processor: Send + Sync {
    async fn process_operation(&self, operation: Bytes) -> Result<ResolutionResult, ProcessingError>;
}

/// Looks up documents by id
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve_document(&self, id: &str) -> Result<ResolutionResult, ProcessingError>;
}
