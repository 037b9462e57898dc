//! Property-Based Tests for Identifier Derivation
//!
//! These tests verify that document ids behave as content addresses:
//! 1. The same create payload always yields the same id
//! 2. The id is scoped by namespace
//! 3. Different document content yields different ids

use docgate_core::{
    calculate_id, new_create_request, CreateRequestInfo, Jwk, Operation, SHA2_256,
};
use proptest::prelude::*;

fn create_suffix_data(key: &str, value: &str) -> String {
    let info = CreateRequestInfo {
        opaque_document: serde_json::json!({ key: value }).to_string(),
        recovery_key: Jwk::default(),
        multihash_code: SHA2_256,
    };
    let bytes = new_create_request(&info).expect("Create request should build");
    match Operation::from_bytes(&bytes).expect("Create request should parse") {
        Operation::Create(req) => req.suffix_data,
        other => panic!("Expected create operation, got {:?}", other),
    }
}

proptest! {
    /// Rebuilding the same request yields the same id
    #[test]
    fn prop_id_is_deterministic(
        key in "[a-z]{1,10}",
        value in "[a-zA-Z0-9 ]{0,40}",
    ) {
        let first = calculate_id("did:sidetree", &create_suffix_data(&key, &value), SHA2_256).unwrap();
        let second = calculate_id("did:sidetree", &create_suffix_data(&key, &value), SHA2_256).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The namespace is a prefix and never leaks into the suffix
    #[test]
    fn prop_id_scoped_by_namespace(
        namespace in "[a-z]{2,8}:[a-z]{2,8}",
        value in "[a-z]{1,20}",
    ) {
        let suffix_data = create_suffix_data("name", &value);
        let did = calculate_id("did:sidetree", &suffix_data, SHA2_256).unwrap();
        let other = calculate_id(&namespace, &suffix_data, SHA2_256).unwrap();

        let prefix = format!("{}:", namespace);
        prop_assert!(other.starts_with(&prefix));
        prop_assert_eq!(
            did.trim_start_matches("did:sidetree:"),
            other.trim_start_matches(prefix.as_str())
        );
    }

    /// Distinct content produces distinct ids
    #[test]
    fn prop_content_changes_id(
        a in "[a-z]{1,20}",
        b in "[a-z]{1,20}",
    ) {
        prop_assume!(a != b);
        let id_a = calculate_id("did:sidetree", &create_suffix_data("name", &a), SHA2_256).unwrap();
        let id_b = calculate_id("did:sidetree", &create_suffix_data("name", &b), SHA2_256).unwrap();
        prop_assert_ne!(id_a, id_b);
    }
}
