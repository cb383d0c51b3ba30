//! Document-store contract.
//!
//! Documents are flat JSON objects. The panel uses two collections: profile
//! documents keyed by identity id, and the append-only dispatch log.

use async_trait::async_trait;

/// Profile documents, keyed by identity id: `{ "rol": <role> }`.
pub const PROFILES_COLLECTION: &str = "usuarios";

/// Dispatch records, auto-keyed.
pub const RECORDS_COLLECTION: &str = "registros";

/// A stored document body.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(String),
    #[error("store responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed store response: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

#[async_trait(?Send)]
pub trait DocumentStore: Send + Sync {
    /// Fetch `collection/key`; `Ok(None)` when the document does not exist.
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError>;

    /// Create or overwrite `collection/key`.
    async fn set_document(&self, collection: &str, key: &str, value: Document) -> Result<(), StoreError>;

    /// Append `value` under a store-generated key and return that key.
    async fn add_document(&self, collection: &str, value: Document) -> Result<String, StoreError>;
}
