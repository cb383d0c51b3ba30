//! DTOs shared with the host server.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Which collaborator implementation the browser should build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Firebase,
    Memory,
}

/// Public backend settings served at `GET /api/config`.
///
/// The API key is a browser key, not a secret; Firestore rules do the
/// actual access control.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub backend: BackendKind,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub auth_base_url: String,
    #[serde(default)]
    pub store_base_url: String,
}
