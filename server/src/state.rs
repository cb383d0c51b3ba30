//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! host keeps no per-user state; it only carries the backend settings the
//! browser needs to reach identity and storage on its own.

use std::sync::Arc;

use panel::net::types::BackendConfig;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self { backend: Arc::new(config.backend.clone()) }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
