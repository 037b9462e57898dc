//! Resolve Handler
//!
//! Extracts the `{id}` path parameter and hands it to a [`Resolver`].

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, Request},
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

use docgate_core::ResolutionResult;

use crate::api::error::ProcessingError;
use crate::api::handlers::DEFAULT_BASE_PATH;
use crate::handler::{RequestHandler, Resolver};

/// Serves `GET /document/{id}` by delegating to a [`Resolver`]
#[derive(Clone)]
pub struct ResolveHandler {
    resolver: Arc<dyn Resolver>,
}

impl ResolveHandler {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self { resolver }
    }

    /// Resolve a document by id
    ///
    /// GET /document/{id}
    pub async fn resolve(&self, request: Request) -> Result<Json<ResolutionResult>, ProcessingError> {
        let (mut parts, _body) = request.into_parts();
        let Path(id) = Path::<String>::from_request_parts(&mut parts, &())
            .await
            .map_err(|e| ProcessingError::BadRequest(e.body_text()))?;

        debug!(id = %id, "Resolving document");

        let result = self.resolver.resolve_document(&id).await.inspect_err(|e| {
            warn!(id = %id, error = %e, status = %e.status(), "Document resolution failed");
        })?;

        Ok(Json(result))
    }
}

#[async_trait]
impl RequestHandler for ResolveHandler {
    fn path(&self) -> String {
        format!("{}/{{id}}", DEFAULT_BASE_PATH)
    }

    fn method(&self) -> Method {
        Method::GET
    }

    async fn handle(&self, request: Request) -> Response {
        self.resolve(request).await.into_response()
    }
}
