use futures::StreamExt;
use futures::executor::block_on;

use super::*;
use crate::net::types::BackendKind;

fn config() -> BackendConfig {
    BackendConfig {
        backend: BackendKind::Firebase,
        api_key: "k123".to_owned(),
        project_id: "office".to_owned(),
        auth_base_url: String::new(),
        store_base_url: "https://store.test/v1/".to_owned(),
    }
}

// =============================================================================
// URLs
// =============================================================================

#[test]
fn auth_endpoint_formats_operation_and_key() {
    assert_eq!(
        auth_endpoint(DEFAULT_AUTH_BASE_URL, "signInWithPassword", "k123"),
        "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key=k123"
    );
}

#[test]
fn documents_root_uses_default_database() {
    let backend = FirebaseBackend::new(&config());
    assert_eq!(backend.documents_root(), "https://store.test/v1/projects/office/databases/(default)/documents");
}

#[test]
fn empty_base_url_falls_back_to_default() {
    assert_eq!(non_empty_or("  ", DEFAULT_STORE_BASE_URL), DEFAULT_STORE_BASE_URL);
    assert_eq!(non_empty_or("https://x.test/", DEFAULT_STORE_BASE_URL), "https://x.test");
}

#[test]
fn document_and_collection_urls() {
    assert_eq!(document_url("root", "usuarios", "u1"), "root/usuarios/u1");
    assert_eq!(collection_url("root", "registros"), "root/registros");
}

#[test]
fn key_from_document_name_takes_last_segment() {
    assert_eq!(
        key_from_document_name("projects/p/databases/(default)/documents/registros/abc123"),
        Some("abc123".to_owned())
    );
    assert_eq!(key_from_document_name("registros/"), None);
}

// =============================================================================
// Auth errors
// =============================================================================

#[test]
fn readable_auth_code_lowercases_and_spaces() {
    assert_eq!(readable_auth_code("EMAIL_EXISTS"), "email exists");
    assert_eq!(readable_auth_code("INVALID_LOGIN_CREDENTIALS"), "invalid login credentials");
}

#[test]
fn readable_auth_code_keeps_detail() {
    assert_eq!(
        readable_auth_code("WEAK_PASSWORD : Password should be at least 6 characters"),
        "weak password : Password should be at least 6 characters"
    );
}

#[test]
fn auth_error_from_body_reads_error_message() {
    let body = r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND","errors":[]}}"#;
    assert_eq!(auth_error_from_body(400, body), AuthError::Rejected("email not found".to_owned()));
}

#[test]
fn auth_error_from_unparseable_body_is_network_error() {
    assert_eq!(
        auth_error_from_body(502, "<html>bad gateway</html>"),
        AuthError::Network("auth request failed: 502".to_owned())
    );
}

// =============================================================================
// Firestore codec
// =============================================================================

#[test]
fn encode_document_wraps_typed_fields() {
    let doc = match serde_json::json!({"rol": "admin", "n": 3, "ok": true, "x": 1.5, "none": null}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    let encoded = encode_document(&doc);
    assert_eq!(encoded["fields"]["rol"], json!({"stringValue": "admin"}));
    assert_eq!(encoded["fields"]["n"], json!({"integerValue": "3"}));
    assert_eq!(encoded["fields"]["ok"], json!({"booleanValue": true}));
    assert_eq!(encoded["fields"]["x"], json!({"doubleValue": 1.5}));
    assert_eq!(encoded["fields"]["none"], json!({"nullValue": null}));
}

#[test]
fn encode_nested_values() {
    let doc = match json!({"tags": ["a"], "meta": {"k": "v"}}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    let encoded = encode_document(&doc);
    assert_eq!(encoded["fields"]["tags"], json!({"arrayValue": {"values": [{"stringValue": "a"}]}}));
    assert_eq!(encoded["fields"]["meta"], json!({"mapValue": {"fields": {"k": {"stringValue": "v"}}}}));
}

#[test]
fn decode_document_flattens_fields() {
    let resource = json!({
        "name": "projects/p/databases/(default)/documents/usuarios/u1",
        "fields": {
            "rol": {"stringValue": "oficina_partes"},
            "n": {"integerValue": "42"},
            "tags": {"arrayValue": {"values": [{"booleanValue": false}]}},
            "empty": {"arrayValue": {}},
            "meta": {"mapValue": {"fields": {"k": {"nullValue": null}}}}
        }
    });
    let doc = decode_document(&resource).unwrap();
    assert_eq!(doc["rol"], "oficina_partes");
    assert_eq!(doc["n"], 42);
    assert_eq!(doc["tags"], json!([false]));
    assert_eq!(doc["empty"], json!([]));
    assert_eq!(doc["meta"], json!({"k": null}));
}

#[test]
fn decode_document_without_fields_is_empty() {
    let doc = decode_document(&json!({"name": "x"})).unwrap();
    assert!(doc.is_empty());
}

#[test]
fn decode_rejects_unknown_value_type() {
    let resource = json!({"fields": {"pt": {"geoPointValue": {"latitude": 1.0}}}});
    assert!(matches!(decode_document(&resource), Err(StoreError::Decode(_))));
}

#[test]
fn codec_round_trips_a_dispatch_record() {
    let record = crate::state::records::DispatchRecord {
        id: "A1".to_owned(),
        kind: "Legal".to_owned(),
        notes: "needs, commas".to_owned(),
        ..Default::default()
    };
    let Value::Object(doc) = serde_json::to_value(&record).unwrap() else {
        unreachable!()
    };
    let decoded = decode_document(&encode_document(&doc)).unwrap();
    assert_eq!(decoded, doc);
}

// =============================================================================
// Off-browser behavior
// =============================================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn network_calls_are_unavailable_off_browser() {
    let backend = FirebaseBackend::new(&config());
    assert_eq!(block_on(backend.sign_in("a@b.com", "pw")), Err(AuthError::Unavailable));
    assert_eq!(block_on(backend.get_document("usuarios", "u1")), Err(StoreError::Unavailable));
}

#[test]
fn sign_out_publishes_no_identity() {
    let backend = FirebaseBackend::new(&config());
    let mut sub = backend.subscribe();
    assert_eq!(block_on(sub.next()), Some(None));
    block_on(backend.sign_out());
    assert_eq!(block_on(sub.next()), Some(None));
}
