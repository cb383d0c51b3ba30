//! Panel operations over the external collaborators.
//!
//! ARCHITECTURE
//! ============
//! Service functions take the collaborator traits and plain state values, so
//! they run the same under the browser, SSR, and native tests. Components
//! only translate their results into signal updates and notices.

pub mod auth;
pub mod export;
pub mod records;

use crate::net::identity::AuthError;
use crate::net::store::StoreError;
use crate::state::records::RecordField;

/// Failure of a user-triggered panel action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Missing required fields: {}", field_labels(.0))]
    MissingFields(Vec<RecordField>),
    #[error("Only administrators can export records")]
    ExportForbidden,
}

fn field_labels(fields: &[RecordField]) -> String {
    fields.iter().map(|f| f.label()).collect::<Vec<_>>().join(", ")
}
