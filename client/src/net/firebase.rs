//! Firebase Authentication + Cloud Firestore over their REST APIs.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails with `Unavailable`; the panel only
//! talks to Firebase from the browser.
//!
//! DESIGN
//! ======
//! One value implements both `IdentityProvider` and `DocumentStore` because
//! Firestore requests carry the signed-in user's ID token. The identity is
//! persisted to `localStorage` so a page reload restores the session the way
//! the JS SDK does.
//!
//! ERROR HANDLING
//! ==============
//! Identity Toolkit error codes (`EMAIL_EXISTS`, `INVALID_PASSWORD`, ...) are
//! turned into readable text and surfaced as `AuthError::Rejected`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "firebase_test.rs"]
mod firebase_test;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use super::identity::{AuthError, AuthHub, AuthSubscription, Identity, IdentityProvider};
use super::store::{Document, DocumentStore, StoreError};
use super::types::BackendConfig;
use crate::util::storage;

pub const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_STORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// `localStorage` key for the signed-in identity.
pub const IDENTITY_STORAGE_KEY: &str = "mensajeria.identity";

/// Firebase-backed identity provider and document store.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub struct FirebaseBackend {
    api_key: String,
    auth_base_url: String,
    documents_root: String,
    hub: AuthHub,
}

impl FirebaseBackend {
    /// Build from server-provided settings, restoring any persisted identity.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let auth_base = non_empty_or(&config.auth_base_url, DEFAULT_AUTH_BASE_URL);
        let store_base = non_empty_or(&config.store_base_url, DEFAULT_STORE_BASE_URL);
        let restored = storage::load_json::<Identity>(IDENTITY_STORAGE_KEY);
        Self {
            api_key: config.api_key.clone(),
            auth_base_url: auth_base,
            documents_root: documents_root(&store_base, &config.project_id),
            hub: AuthHub::new(restored),
        }
    }

    #[must_use]
    pub fn documents_root(&self) -> &str {
        &self.documents_root
    }

    fn bearer(&self) -> Option<String> {
        self.hub
            .current()
            .and_then(|identity| identity.id_token)
            .map(|token| format!("Bearer {token}"))
    }

    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    fn remember(&self, identity: &Identity) {
        storage::save_json(IDENTITY_STORAGE_KEY, identity);
        self.hub.publish(Some(identity.clone()));
    }

    #[cfg(feature = "hydrate")]
    async fn password_call(&self, op: &str, email: &str, password: &str) -> Result<Identity, AuthError> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct AuthResponse {
            local_id: String,
            #[serde(default)]
            email: Option<String>,
            id_token: String,
        }

        let url = auth_endpoint(&self.auth_base_url, op, &self.api_key);
        let payload = json!({ "email": email, "password": password, "returnSecureToken": true });
        let resp = gloo_net::http::Request::post(&url)
            .json(&payload)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        if !resp.ok() {
            let body = resp.text().await.unwrap_or_default();
            return Err(auth_error_from_body(resp.status(), &body));
        }
        let body: AuthResponse = resp.json().await.map_err(|e| AuthError::Network(e.to_string()))?;
        let identity = Identity {
            uid: body.local_id,
            email: body.email.unwrap_or_else(|| email.to_owned()),
            id_token: Some(body.id_token),
        };
        self.remember(&identity);
        Ok(identity)
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            self.password_call("signUp", email, password).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AuthError::Unavailable)
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            self.password_call("signInWithPassword", email, password).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AuthError::Unavailable)
        }
    }

    async fn sign_out(&self) {
        storage::remove(IDENTITY_STORAGE_KEY);
        self.hub.publish(None);
    }

    fn subscribe(&self) -> AuthSubscription {
        self.hub.subscribe()
    }

    fn reload(&self) {
        self.hub.republish();
    }
}

#[async_trait(?Send)]
impl DocumentStore for FirebaseBackend {
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        let url = document_url(&self.documents_root, collection, key);
        #[cfg(feature = "hydrate")]
        {
            let mut request = gloo_net::http::Request::get(&url);
            if let Some(bearer) = self.bearer() {
                request = request.header("Authorization", &bearer);
            }
            let resp = request.send().await.map_err(|e| StoreError::Request(e.to_string()))?;
            if resp.status() == 404 {
                return Ok(None);
            }
            if !resp.ok() {
                let message = resp.text().await.unwrap_or_default();
                return Err(StoreError::Status { status: resp.status(), message });
            }
            let body: Value = resp.json().await.map_err(|e| StoreError::Decode(e.to_string()))?;
            decode_document(&body).map(Some)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, self.bearer());
            Err(StoreError::Unavailable)
        }
    }

    async fn set_document(&self, collection: &str, key: &str, value: Document) -> Result<(), StoreError> {
        let url = document_url(&self.documents_root, collection, key);
        let body = encode_document(&value);
        #[cfg(feature = "hydrate")]
        {
            let mut request = gloo_net::http::Request::patch(&url);
            if let Some(bearer) = self.bearer() {
                request = request.header("Authorization", &bearer);
            }
            let resp = request
                .json(&body)
                .map_err(|e| StoreError::Request(e.to_string()))?
                .send()
                .await
                .map_err(|e| StoreError::Request(e.to_string()))?;
            if !resp.ok() {
                let message = resp.text().await.unwrap_or_default();
                return Err(StoreError::Status { status: resp.status(), message });
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, body);
            Err(StoreError::Unavailable)
        }
    }

    async fn add_document(&self, collection: &str, value: Document) -> Result<String, StoreError> {
        let url = collection_url(&self.documents_root, collection);
        let body = encode_document(&value);
        #[cfg(feature = "hydrate")]
        {
            let mut request = gloo_net::http::Request::post(&url);
            if let Some(bearer) = self.bearer() {
                request = request.header("Authorization", &bearer);
            }
            let resp = request
                .json(&body)
                .map_err(|e| StoreError::Request(e.to_string()))?
                .send()
                .await
                .map_err(|e| StoreError::Request(e.to_string()))?;
            if !resp.ok() {
                let message = resp.text().await.unwrap_or_default();
                return Err(StoreError::Status { status: resp.status(), message });
            }
            let created: Value = resp.json().await.map_err(|e| StoreError::Decode(e.to_string()))?;
            created
                .get("name")
                .and_then(Value::as_str)
                .and_then(key_from_document_name)
                .ok_or_else(|| StoreError::Decode("created document has no name".to_owned()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, body);
            Err(StoreError::Unavailable)
        }
    }
}

// =============================================================================
// URLS
// =============================================================================

fn non_empty_or(value: &str, default: &str) -> String {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() { default.to_owned() } else { trimmed.to_owned() }
}

#[cfg(any(test, feature = "hydrate"))]
fn auth_endpoint(base: &str, op: &str, api_key: &str) -> String {
    format!("{base}/accounts:{op}?key={api_key}")
}

fn documents_root(store_base: &str, project_id: &str) -> String {
    format!("{store_base}/projects/{project_id}/databases/(default)/documents")
}

fn document_url(root: &str, collection: &str, key: &str) -> String {
    format!("{root}/{collection}/{key}")
}

fn collection_url(root: &str, collection: &str) -> String {
    format!("{root}/{collection}")
}

/// Last path segment of a Firestore resource name.
fn key_from_document_name(name: &str) -> Option<String> {
    name.rsplit('/').next().filter(|key| !key.is_empty()).map(str::to_owned)
}

// =============================================================================
// AUTH ERRORS
// =============================================================================

/// `EMAIL_EXISTS` -> `email exists`; any ` : detail` suffix is kept as-is.
#[cfg(any(test, feature = "hydrate"))]
fn readable_auth_code(raw: &str) -> String {
    let (code, detail) = match raw.split_once(" : ") {
        Some((code, detail)) => (code, Some(detail)),
        None => (raw, None),
    };
    let code = code.trim().to_ascii_lowercase().replace('_', " ");
    match detail {
        Some(detail) => format!("{code} : {detail}"),
        None => code,
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn auth_error_from_body(status: u16, body: &str) -> AuthError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_owned));
    match message {
        Some(code) => AuthError::Rejected(readable_auth_code(&code)),
        None => AuthError::Network(format!("auth request failed: {status}")),
    }
}

// =============================================================================
// FIRESTORE VALUE CODEC
// =============================================================================

/// Wrap a plain JSON object as a Firestore `{ "fields": … }` body.
#[must_use]
pub fn encode_document(doc: &Document) -> Value {
    json!({ "fields": encode_fields(doc) })
}

fn encode_fields(doc: &Map<String, Value>) -> Value {
    Value::Object(doc.iter().map(|(k, v)| (k.clone(), encode_value(v))).collect())
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Flatten a Firestore document resource back into a plain JSON object.
///
/// # Errors
///
/// Returns `StoreError::Decode` for values of an unsupported type.
pub fn decode_document(resource: &Value) -> Result<Document, StoreError> {
    match resource.get("fields") {
        Some(fields) => decode_fields(fields),
        None => Ok(Document::new()),
    }
}

fn decode_fields(fields: &Value) -> Result<Document, StoreError> {
    let Some(fields) = fields.as_object() else {
        return Err(StoreError::Decode("fields is not an object".to_owned()));
    };
    fields
        .iter()
        .map(|(k, v)| decode_value(v).map(|v| (k.clone(), v)))
        .collect()
}

fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err(StoreError::Decode(format!("not a typed value: {value}")));
    };
    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "doubleValue" | "stringValue" | "timestampValue" | "referenceValue" => Ok(inner.clone()),
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| inner.as_i64())
            .map(Value::from)
            .ok_or_else(|| StoreError::Decode(format!("bad integerValue: {inner}"))),
        "arrayValue" => inner
            .get("values")
            .and_then(Value::as_array)
            .map_or_else(|| Ok(Vec::<Value>::new()), |items| items.iter().map(decode_value).collect())
            .map(Value::Array),
        "mapValue" => match inner.get("fields") {
            Some(fields) => decode_fields(fields).map(Value::Object),
            None => Ok(Value::Object(Map::new())),
        },
        other => Err(StoreError::Decode(format!("unsupported value type: {other}"))),
    }
}
