//! Backend settings route.

use axum::extract::State;
use axum::response::Json;
use panel::net::types::BackendConfig;

use crate::state::AppState;

/// `GET /api/config` — public settings the browser uses to reach identity
/// and storage.
pub async fn backend_config(State(state): State<AppState>) -> Json<BackendConfig> {
    Json(state.backend.as_ref().clone())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
