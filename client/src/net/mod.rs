//! External collaborators and the wire types used to reach them.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity`, `store` and `export` define the contracts the panel depends on.
//! `firebase` and `memory` implement them; `api` talks to the host server and
//! `types` holds the DTOs shared with it.

pub mod api;
pub mod export;
pub mod firebase;
pub mod identity;
pub mod memory;
pub mod store;
pub mod types;

use std::sync::Arc;

use self::export::FileExport;
use self::identity::IdentityProvider;
use self::store::DocumentStore;

/// The three collaborators the panel is wired to.
#[derive(Clone)]
pub struct Collaborators {
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn DocumentStore>,
    pub export: Arc<dyn FileExport>,
}

impl Collaborators {
    /// Build the collaborators described by `config`.
    #[must_use]
    pub fn from_config(config: &types::BackendConfig, export: Arc<dyn FileExport>) -> Self {
        match config.backend {
            types::BackendKind::Firebase => {
                let backend = Arc::new(firebase::FirebaseBackend::new(config));
                Self { identity: backend.clone(), store: backend, export }
            }
            types::BackendKind::Memory => Self {
                identity: Arc::new(memory::InMemoryIdentity::new()),
                store: Arc::new(memory::InMemoryStore::new()),
                export,
            },
        }
    }
}
