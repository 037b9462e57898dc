//! Docgate Server
//!
//! An embeddable HTTP front end for document operations. Independent document
//! namespaces attach to one listener by registering [`RequestHandler`]s.
//!
//! ## Components
//!
//! - [`RequestHandler`]: `{path, method, handle}` contract for anything servable
//! - [`UpdateHandler`] / [`ResolveHandler`]: generic routes over a [`Processor`] or [`Resolver`]
//! - [`NamespaceUpdateHandler`] / [`NamespaceResolveHandler`]: re-expose a handler under another path
//! - [`HttpServer`]: owns the listener; `Idle -> Running -> Stopped`
//!
//! ## Default Endpoints
//!
//! - `POST /document` - Create or update a document
//! - `GET /document/{id}` - Resolve a document
//!
//! Error responses carry a plain-text message body.

pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod server;
pub mod storage;

pub use api::create_router;
pub use api::error::ProcessingError;
pub use api::handlers::{
    new_resolve_handler, new_update_handler, NamespaceResolveHandler, NamespaceUpdateHandler,
    ResolveHandler, UpdateHandler,
};
pub use config::DocgateConfig;
pub use error::{Result, ServerError};
pub use handler::{Processor, RequestHandler, Resolver};
pub use server::{HttpServer, ServerState};
pub use storage::MemoryDocumentHandler;
