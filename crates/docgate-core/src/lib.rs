//! # Docgate Core
//!
//! Document model shared by the docgate server and client.
//!
//! ## Key Concepts
//!
//! - **Namespace**: a prefix such as `did:sidetree` that scopes document identifiers
//! - **Suffix data**: the content-derived part of a create operation, hashed to form the id
//! - **Resolution result**: the JSON view of a document returned by create and resolve
//!
//! Identifiers are derived as `namespace:base64url(multihash(suffix_data))`, so the
//! same create request yields a different id in every namespace it is posted to.

pub mod error;
pub mod id;
pub mod request;
pub mod types;

pub use error::{CoreError, Result};
pub use id::{calculate_id, calculate_unique_suffix, compute_multihash, SHA2_256};
pub use request::{new_create_request, new_update_request, CreateRequestInfo};
pub use types::{
    CreateRequest, Delta, Document, Jwk, MethodMetadata, Operation, ResolutionResult, SuffixData,
    UpdateRequest,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
