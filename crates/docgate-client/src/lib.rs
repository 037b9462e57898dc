//! Docgate Client
//!
//! Client-side helpers for talking to a docgate server:
//!
//! - [`RetryPolicy`]: retries a call with a fixed interval, tolerating a server
//!   that is still starting or briefly unreachable
//! - [`handle_response`]: turns an HTTP response into body bytes or an error
//!   carrying the server's plain-text message
//! - [`DocumentClient`]: POST/GET helpers built on both
//!
//! ## Usage
//!
//! ```ignore
//! use docgate_client::DocumentClient;
//!
//! let client = DocumentClient::new("http://localhost:8080");
//! let created = client.create("/document", request_bytes).await?;
//! let resolved = client.resolve("/document", created.id().unwrap()).await?;
//! ```

pub mod client;
pub mod error;
pub mod response;
pub mod retry;

pub use client::DocumentClient;
pub use error::{ClientError, Result};
pub use response::handle_response;
pub use retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL};
