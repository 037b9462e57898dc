//! Content-addressed identifier derivation
//!
//! A document id is the namespace followed by the base64url (unpadded)
//! encoding of the multihash of the decoded suffix data.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha2::{Digest, Sha256};

use crate::error::{CoreError, Result};

/// Multihash code for SHA2-256
pub const SHA2_256: u64 = 0x12;

/// Separator between namespace and unique suffix
pub const NAMESPACE_DELIMITER: &str = ":";

/// Hash `data` and prefix it with the multihash code and digest length.
pub fn compute_multihash(code: u64, data: &[u8]) -> Result<Vec<u8>> {
    if code != SHA2_256 {
        return Err(CoreError::UnsupportedMultihash(code));
    }

    let digest = Sha256::digest(data);
    let mut out = Vec::with_capacity(digest.len() + 2);
    out.push(code as u8);
    out.push(digest.len() as u8);
    out.extend_from_slice(&digest);
    Ok(out)
}

/// Unique suffix for encoded suffix data
pub fn calculate_unique_suffix(encoded_suffix_data: &str, code: u64) -> Result<String> {
    let bytes = decode(encoded_suffix_data)?;
    let hash = compute_multihash(code, &bytes)?;
    Ok(encode(&hash))
}

/// Full document id within `namespace`
pub fn calculate_id(namespace: &str, encoded_suffix_data: &str, code: u64) -> Result<String> {
    let suffix = calculate_unique_suffix(encoded_suffix_data, code)?;
    Ok(format!("{}{}{}", namespace, NAMESPACE_DELIMITER, suffix))
}

/// base64url without padding
pub fn encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Inverse of [`encode`]
pub fn decode(data: &str) -> Result<Vec<u8>> {
    Ok(URL_SAFE_NO_PAD.decode(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multihash_prefix() {
        let hash = compute_multihash(SHA2_256, b"hello").unwrap();
        assert_eq!(hash.len(), 34);
        assert_eq!(hash[0], 0x12);
        assert_eq!(hash[1], 32);
    }

    #[test]
    fn test_unsupported_code() {
        let result = compute_multihash(0x13, b"hello");
        assert_eq!(result, Err(CoreError::UnsupportedMultihash(0x13)));
    }

    #[test]
    fn test_namespace_prefix() {
        let encoded = encode(b"{\"delta_hash\":\"abc\"}");
        let id = calculate_id("did:sidetree", &encoded, SHA2_256).unwrap();

        assert!(id.starts_with("did:sidetree:"));
        let suffix = id.trim_start_matches("did:sidetree:");
        assert_eq!(suffix, calculate_unique_suffix(&encoded, SHA2_256).unwrap());
    }

    #[test]
    fn test_namespaces_share_suffix() {
        let encoded = encode(b"suffix");
        let did = calculate_id("did:sidetree", &encoded, SHA2_256).unwrap();
        let sample = calculate_id("sample:sidetree", &encoded, SHA2_256).unwrap();

        assert_ne!(did, sample);
        assert_eq!(
            did.rsplit(':').next(),
            sample.rsplit(':').next()
        );
    }

    #[test]
    fn test_invalid_encoding() {
        let result = calculate_id("did:sidetree", "not base64!", SHA2_256);
        assert!(matches!(result, Err(CoreError::InvalidEncoding(_))));
    }
}
