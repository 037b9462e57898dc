//! Wire types for document operations and resolution results

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::id;

/// Default JSON-LD context attached to resolution results
pub const RESOLUTION_CONTEXT: &str = "https://w3id.org/did-resolution/v1";

/// A document is an open JSON object; `id` is always present once resolved
pub type Document = Map<String, Value>;

/// JSON Web Key as carried in suffix data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kty: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub crv: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub x: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub y: String,
}

/// Document operation envelope, dispatched on its `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    Create(CreateRequest),
    Update(UpdateRequest),
}

impl Operation {
    /// Parse an operation from a raw request body
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Create operation body (without the `type` tag)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    /// base64url-encoded [`SuffixData`]
    pub suffix_data: String,

    /// base64url-encoded [`Delta`]
    pub delta: String,
}

impl CreateRequest {
    pub fn decode_suffix_data(&self) -> Result<SuffixData> {
        Ok(serde_json::from_slice(&id::decode(&self.suffix_data)?)?)
    }

    pub fn decode_delta(&self) -> Result<Delta> {
        decode_delta(&self.delta)
    }
}

/// Update operation body (without the `type` tag)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// Unique suffix of the document being replaced
    pub did_suffix: String,

    /// base64url-encoded [`Delta`]
    pub delta: String,
}

impl UpdateRequest {
    pub fn decode_delta(&self) -> Result<Delta> {
        decode_delta(&self.delta)
    }
}

fn decode_delta(encoded: &str) -> Result<Delta> {
    let delta: Delta = serde_json::from_slice(&id::decode(encoded)?)?;
    if !delta.document.is_object() {
        return Err(CoreError::InvalidDocument("delta document must be a JSON object".into()));
    }
    Ok(delta)
}

/// Hashed portion of a create operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixData {
    /// Encoded multihash of the encoded delta bytes
    pub delta_hash: String,

    pub recovery_key: Jwk,
}

/// Document content carried by create and update operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub document: Value,
}

/// Metadata reported alongside a resolved document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodMetadata {
    pub published: bool,

    #[serde(rename = "recoveryKey", skip_serializing_if = "Option::is_none")]
    pub recovery_key: Option<Jwk>,
}

/// Result of a create, update or resolve operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    #[serde(rename = "@context")]
    pub context: String,

    #[serde(rename = "didDocument")]
    pub document: Document,

    #[serde(rename = "methodMetadata", default)]
    pub method_metadata: MethodMetadata,
}

impl ResolutionResult {
    /// Wrap a document, overwriting its `id` field
    pub fn new(id: impl Into<String>, mut document: Document) -> Self {
        document.insert("id".into(), Value::String(id.into()));
        Self {
            context: RESOLUTION_CONTEXT.into(),
            document,
            method_metadata: MethodMetadata::default(),
        }
    }

    pub fn with_method_metadata(mut self, metadata: MethodMetadata) -> Self {
        self.method_metadata = metadata;
        self
    }

    /// The document id, if the document carries a string `id`
    pub fn id(&self) -> Option<&str> {
        self.document.get("id").and_then(Value::as_str)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
