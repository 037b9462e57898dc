//! Create/Update Handler
//!
//! Reads the raw operation body and hands it to a [`Processor`].

use async_trait::async_trait;
use axum::{
    body::to_bytes,
    extract::Request,
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

use docgate_core::ResolutionResult;

use crate::api::error::ProcessingError;
use crate::api::handlers::DEFAULT_BASE_PATH;
use crate::handler::{Processor, RequestHandler};

/// Upper bound on accepted operation bodies
pub const MAX_OPERATION_BYTES: usize = 1024 * 1024;

/// Serves `POST /document` by delegating to a [`Processor`]
#[derive(Clone)]
pub struct UpdateHandler {
    processor: Arc<dyn Processor>,
}

impl UpdateHandler {
    pub fn new(processor: Arc<dyn Processor>) -> Self {
        Self { processor }
    }

    /// Create or update a document
    ///
    /// POST /document
    pub async fn update(&self, request: Request) -> Result<Json<ResolutionResult>, ProcessingError> {
        let body = to_bytes(request.into_body(), MAX_OPERATION_BYTES)
            .await
            .map_err(|e| ProcessingError::BadRequest(format!("failed to read request body: {}", e)))?;

        debug!(bytes = body.len(), "Processing document operation");

        let result = self.processor.process_operation(body).await.inspect_err(|e| {
            warn!(error = %e, status = %e.status(), "Document operation failed");
        })?;

        Ok(Json(result))
    }
}

#[async_trait]
impl RequestHandler for UpdateHandler {
    fn path(&self) -> String {
        DEFAULT_BASE_PATH.to_string()
    }

    fn method(&self) -> Method {
        Method::POST
    }

    async fn handle(&self, request: Request) -> Response {
        self.update(request).await.into_response()
    }
}
