//! Namespace adapters
//!
//! A namespace adapter re-exposes an existing handler under a different base
//! path. Only `path()` changes; the method and the request handling are the
//! wrapped handler's. This lets one processor serve several namespaces, e.g.
//! `/document` for `did:sidetree` and `/sample` for `sample:sidetree`.

use async_trait::async_trait;
use axum::{extract::Request, http::Method, response::Response};
use std::sync::Arc;

use crate::api::handlers::{ResolveHandler, UpdateHandler};
use crate::handler::{Processor, RequestHandler, Resolver};

/// Update handler served at `base_path`
pub struct NamespaceUpdateHandler<H = UpdateHandler> {
    base_path: String,
    inner: H,
}

impl<H: RequestHandler> NamespaceUpdateHandler<H> {
    pub fn new(base_path: impl Into<String>, inner: H) -> Self {
        Self {
            base_path: base_path.into(),
            inner,
        }
    }
}

#[async_trait]
impl<H: RequestHandler> RequestHandler for NamespaceUpdateHandler<H> {
    fn path(&self) -> String {
        self.base_path.clone()
    }

    fn method(&self) -> Method {
        self.inner.method()
    }

    async fn handle(&self, request: Request) -> Response {
        self.inner.handle(request).await
    }
}

/// Resolve handler served at `base_path/{id}`
pub struct NamespaceResolveHandler<H = ResolveHandler> {
    base_path: String,
    inner: H,
}

impl<H: RequestHandler> NamespaceResolveHandler<H> {
    pub fn new(base_path: impl Into<String>, inner: H) -> Self {
        Self {
            base_path: base_path.into(),
            inner,
        }
    }
}

#[async_trait]
impl<H: RequestHandler> RequestHandler for NamespaceResolveHandler<H> {
    fn path(&self) -> String {
        format!("{}/{{id}}", self.base_path)
    }

    fn method(&self) -> Method {
        self.inner.method()
    }

    async fn handle(&self, request: Request) -> Response {
        self.inner.handle(request).await
    }
}

/// Create/update route for `processor` at `base_path`
pub fn new_update_handler(base_path: &str, processor: Arc<dyn Processor>) -> NamespaceUpdateHandler {
    NamespaceUpdateHandler::new(base_path, UpdateHandler::new(processor))
}

/// Resolve route for `resolver` at `base_path/{id}`
pub fn new_resolve_handler(base_path: &str, resolver: Arc<dyn Resolver>) -> NamespaceResolveHandler {
    NamespaceResolveHandler::new(base_path, ResolveHandler::new(resolver))
}
