//! HTTP client for document routes

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use docgate_core::ResolutionResult;

use crate::error::{ClientError, Result};
use crate::response::handle_response;
use crate::retry::RetryPolicy;

/// Client for a docgate server at `base_url`
///
/// Sending is retried per the [`RetryPolicy`]; non-200 responses are not
/// retried and surface as [`ClientError::Status`].
#[derive(Debug, Clone)]
pub struct DocumentClient {
    base_url: String,
    http: reqwest::Client,
    retry: RetryPolicy,
}

impl DocumentClient {
    /// Create a client with the default retry policy (20 attempts, 100 ms apart)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body to `path` and return the raw response body
    pub async fn post(&self, path: &str, body: impl Into<Bytes>) -> Result<Bytes> {
        let url = self.url(path);
        let body = body.into();
        debug!(url = %url, bytes = body.len(), "POST");

        let response = self
            .retry
            .invoke(|| {
                self.http
                    .post(&url)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.clone())
                    .send()
            })
            .await
            .map_err(ClientError::Request)?;

        handle_response(response).await
    }

    /// GET `path` and return the raw response body
    pub async fn get(&self, path: &str) -> Result<Bytes> {
        let url = self.url(path);
        debug!(url = %url, "GET");

        let response = self
            .retry
            .invoke(|| self.http.get(&url).send())
            .await
            .map_err(ClientError::Request)?;

        handle_response(response).await
    }

    /// Submit a create or update operation at `path`
    pub async fn create(&self, path: &str, operation: impl Into<Bytes>) -> Result<ResolutionResult> {
        let body = self.post(path, operation).await?;
        Ok(ResolutionResult::from_bytes(&body)?)
    }

    /// Resolve `id` under the resolve route rooted at `base_path`
    pub async fn resolve(&self, base_path: &str, id: &str) -> Result<ResolutionResult> {
        let path = format!("{}/{}", base_path.trim_end_matches('/'), id);
        let body = self.get(&path).await?;
        Ok(ResolutionResult::from_bytes(&body)?)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
