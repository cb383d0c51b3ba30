use super::*;

#[test]
fn backend_kind_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&BackendKind::Memory).unwrap(), "\"memory\"");
    assert_eq!(serde_json::to_string(&BackendKind::Firebase).unwrap(), "\"firebase\"");
}

#[test]
fn backend_config_parses_full_payload() {
    let raw = r#"{
        "backend": "firebase",
        "api_key": "key",
        "project_id": "office",
        "auth_base_url": "https://identitytoolkit.googleapis.com/v1",
        "store_base_url": "https://firestore.googleapis.com/v1"
    }"#;
    let config: BackendConfig = serde_json::from_str(raw).unwrap();
    assert_eq!(config.backend, BackendKind::Firebase);
    assert_eq!(config.project_id, "office");
}

#[test]
fn backend_config_memory_needs_no_firebase_fields() {
    let config: BackendConfig = serde_json::from_str(r#"{"backend":"memory"}"#).unwrap();
    assert_eq!(config.backend, BackendKind::Memory);
    assert!(config.api_key.is_empty());
}
