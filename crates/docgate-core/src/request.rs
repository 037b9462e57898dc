//! Construction of create and update request payloads

use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::id::{compute_multihash, encode};
use crate::types::{CreateRequest, Delta, Jwk, Operation, SuffixData, UpdateRequest};

/// Inputs for building a create request
#[derive(Debug, Clone)]
pub struct CreateRequestInfo {
    /// JSON object holding the initial document content
    pub opaque_document: String,

    pub recovery_key: Jwk,

    /// Multihash code used for the delta hash and the document id
    pub multihash_code: u64,
}

/// Serialize a create operation for `info`
pub fn new_create_request(info: &CreateRequestInfo) -> Result<Vec<u8>> {
    let document = parse_document(&info.opaque_document)?;
    let delta_bytes = serde_json::to_vec(&Delta { document })?;
    let delta = encode(&delta_bytes);

    let suffix_data = SuffixData {
        delta_hash: encode(&compute_multihash(info.multihash_code, delta.as_bytes())?),
        recovery_key: info.recovery_key.clone(),
    };
    let suffix_data = encode(&serde_json::to_vec(&suffix_data)?);

    let op = Operation::Create(CreateRequest { suffix_data, delta });
    Ok(serde_json::to_vec(&op)?)
}

/// Serialize an update operation replacing the content of `did_suffix`
pub fn new_update_request(did_suffix: &str, opaque_document: &str) -> Result<Vec<u8>> {
    if did_suffix.is_empty() {
        return Err(CoreError::MissingField("did_suffix".into()));
    }

    let document = parse_document(opaque_document)?;
    let delta = encode(&serde_json::to_vec(&Delta { document })?);

    let op = Operation::Update(UpdateRequest {
        did_suffix: did_suffix.to_string(),
        delta,
    });
    Ok(serde_json::to_vec(&op)?)
}

fn parse_document(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Err(CoreError::MissingField("opaque_document".into()));
    }

    let document: Value = serde_json::from_str(raw)
        .map_err(|e| CoreError::InvalidDocument(e.to_string()))?;
    if !document.is_object() {
        return Err(CoreError::InvalidDocument("document must be a JSON object".into()));
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{calculate_id, SHA2_256};

    fn info(doc: &str) -> CreateRequestInfo {
        CreateRequestInfo {
            opaque_document: doc.into(),
            recovery_key: Jwk::default(),
            multihash_code: SHA2_256,
        }
    }

    #[test]
    fn test_create_request_decodes() {
        let bytes = new_create_request(&info(r#"{"service":[]}"#)).unwrap();

        let Operation::Create(req) = Operation::from_bytes(&bytes).unwrap() else {
            panic!("Expected create operation");
        };
        let delta = req.decode_delta().unwrap();
        assert_eq!(delta.document["service"], serde_json::json!([]));

        let suffix = req.decode_suffix_data().unwrap();
        let expected = encode(&compute_multihash(SHA2_256, req.delta.as_bytes()).unwrap());
        assert_eq!(suffix.delta_hash, expected);
    }

    #[test]
    fn test_create_request_is_deterministic() {
        let a = new_create_request(&info(r#"{"b":1,"a":2}"#)).unwrap();
        let b = new_create_request(&info(r#"{"a":2,"b":1}"#)).unwrap();
        assert_eq!(a, b);

        let Operation::Create(req) = Operation::from_bytes(&a).unwrap() else {
            panic!("Expected create operation");
        };
        assert!(calculate_id("did:sidetree", &req.suffix_data, SHA2_256).is_ok());
    }

    #[test]
    fn test_empty_document_rejected() {
        let result = new_create_request(&info("  "));
        assert_eq!(result, Err(CoreError::MissingField("opaque_document".into())));
    }

    #[test]
    fn test_non_object_document_rejected() {
        let result = new_create_request(&info("[1, 2]"));
        assert!(matches!(result, Err(CoreError::InvalidDocument(_))));
    }

    #[test]
    fn test_unsupported_multihash_rejected() {
        let mut info = info("{}");
        info.multihash_code = 0x11;
        assert_eq!(
            new_create_request(&info),
            Err(CoreError::UnsupportedMultihash(0x11))
        );
    }

    #[test]
    fn test_update_request_requires_suffix() {
        let result = new_update_request("", "{}");
        assert_eq!(result, Err(CoreError::MissingField("did_suffix".into())));
    }
}
