//! In-memory document handler
//!
//! Keeps documents of one namespace in a hashmap. Suitable for development
//! and tests. Data is lost on restart.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::info;

use docgate_core::id::encode;
use docgate_core::{
    calculate_id, compute_multihash, CreateRequest, Document, Jwk, MethodMetadata, Operation,
    ResolutionResult, UpdateRequest, SHA2_256,
};

use crate::api::error::ProcessingError;
use crate::handler::{Processor, Resolver};

#[derive(Debug, Clone)]
struct StoredDocument {
    document: Document,
    recovery_key: Jwk,
}

/// Namespaced in-memory document processor and resolver
#[derive(Debug)]
pub struct MemoryDocumentHandler {
    namespace: String,
    multihash_code: u64,
    documents: RwLock<HashMap<String, StoredDocument>>,
}

impl MemoryDocumentHandler {
    /// Create an empty handler for `namespace` using SHA2-256 ids
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            multihash_code: SHA2_256,
            documents: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_multihash_code(mut self, code: u64) -> Self {
        self.multihash_code = code;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn create(&self, request: CreateRequest) -> Result<ResolutionResult, ProcessingError> {
        let id = calculate_id(&self.namespace, &request.suffix_data, self.multihash_code)?;
        let suffix_data = request.decode_suffix_data()?;
        let delta = request.decode_delta()?;

        let delta_hash = encode(&compute_multihash(
            self.multihash_code,
            request.delta.as_bytes(),
        )?);
        if delta_hash != suffix_data.delta_hash {
            return Err(ProcessingError::BadRequest(
                "delta does not match delta hash".into(),
            ));
        }

        let stored = StoredDocument {
            document: into_document(delta.document)?,
            recovery_key: suffix_data.recovery_key,
        };

        let mut documents = self.write()?;
        if documents.contains_key(&id) {
            return Err(ProcessingError::BadRequest("document already exists".into()));
        }
        documents.insert(id.clone(), stored.clone());

        info!(id = %id, namespace = %self.namespace, "Created document");

        Ok(resolution_result(&id, stored))
    }

    fn update(&self, request: UpdateRequest) -> Result<ResolutionResult, ProcessingError> {
        let id = format!("{}:{}", self.namespace, request.did_suffix);
        let delta = request.decode_delta()?;
        let document = into_document(delta.document)?;

        let mut documents = self.write()?;
        let stored = documents
            .get_mut(&id)
            .ok_or_else(|| ProcessingError::NotFound("document not found".into()))?;
        stored.document = document;

        info!(id = %id, namespace = %self.namespace, "Updated document");

        Ok(resolution_result(&id, stored.clone()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, StoredDocument>>, ProcessingError>
    {
        self.documents
            .write()
            .map_err(|_| ProcessingError::Internal("document store lock poisoned".into()))
    }
}

fn into_document(value: Value) -> Result<Document, ProcessingError> {
    match value {
        Value::Object(document) => Ok(document),
        _ => Err(ProcessingError::BadRequest(
            "document must be a JSON object".into(),
        )),
    }
}

fn resolution_result(id: &str, stored: StoredDocument) -> ResolutionResult {
    ResolutionResult::new(id, stored.document).with_method_metadata(MethodMetadata {
        published: true,
        recovery_key: Some(stored.recovery_key),
    })
}

#[async_trait]
impl Processor for MemoryDocumentHandler {
    async fn process_operation(&self, operation: Bytes) -> Result<ResolutionResult, ProcessingError> {
        match Operation::from_bytes(&operation)? {
            Operation::Create(request) => self.create(request),
            Operation::Update(request) => self.update(request),
        }
    }
}

#[async_trait]
impl Resolver for MemoryDocumentHandler {
    async fn resolve_document(&self, id: &str) -> Result<ResolutionResult, ProcessingError> {
        let prefix = format!("{}:", self.namespace);
        if !id.starts_with(&prefix) {
            return Err(ProcessingError::BadRequest(format!(
                "must start with configured namespace '{}'",
                self.namespace
            )));
        }

        let documents = self
            .documents
            .read()
            .map_err(|_| ProcessingError::Internal("document store lock poisoned".into()))?;

        documents
            .get(id)
            .cloned()
            .map(|stored| resolution_result(id, stored))
            .ok_or_else(|| ProcessingError::NotFound("document not found".into()))
    }
}
