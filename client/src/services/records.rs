//! Dispatch-record submission.
//!
//! `submit` is split into a synchronous check, the store write, and a
//! synchronous commit so the record form can run the write between two
//! signal updates without holding snapshots of shared state across the await.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use serde_json::Value;

use super::PanelError;
use crate::net::store::{Document, DocumentStore, RECORDS_COLLECTION, StoreError};
use crate::state::records::{DispatchRecord, RecordCollection};

/// Validate the draft and build the document to store.
///
/// # Errors
///
/// `PanelError::MissingFields` when `id`, `type`, `date` or `time` is empty.
pub fn prepare_submission(draft: &DispatchRecord) -> Result<Document, PanelError> {
    let missing = draft.missing_required();
    if !missing.is_empty() {
        return Err(PanelError::MissingFields(missing));
    }
    Ok(record_document(draft)?)
}

/// Write a prepared record to the append-only collection.
///
/// # Errors
///
/// Returns the store's error; nothing is retried.
pub async fn store_record(store: &dyn DocumentStore, document: Document) -> Result<String, PanelError> {
    let key = store
        .add_document(RECORDS_COLLECTION, document)
        .await
        .inspect_err(|e| log::error!("record write failed: {e}"))?;
    log::info!("record stored key={key}");
    Ok(key)
}

/// Append the stored record to the list and empty the form.
pub fn commit_submission(record: DispatchRecord, draft: &mut DispatchRecord, records: &mut RecordCollection) {
    records.push(record);
    draft.reset();
}

/// Submit the draft: check, store, append, reset.
///
/// On any error the draft and the collection are left untouched.
///
/// # Errors
///
/// `PanelError::MissingFields` before any store call, or the store's error.
pub async fn submit(
    store: &dyn DocumentStore,
    draft: &mut DispatchRecord,
    records: &mut RecordCollection,
) -> Result<String, PanelError> {
    let document = prepare_submission(draft)?;
    let key = store_record(store, document).await?;
    let record = draft.clone();
    commit_submission(record, draft, records);
    Ok(key)
}

/// Stored document body for `record`.
///
/// # Errors
///
/// `StoreError::Decode` if the record does not serialize to a JSON object.
pub fn record_document(record: &DispatchRecord) -> Result<Document, StoreError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Decode(format!("record is not an object: {other}"))),
        Err(e) => Err(StoreError::Decode(e.to_string())),
    }
}
