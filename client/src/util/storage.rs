//! Persisted sign-in state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Firebase identity provider keeps the signed-in `Identity` (uid, email,
//! ID token) under one `localStorage` key so a page reload comes back signed
//! in. Values are JSON. A missing, unreadable or corrupt entry reads as
//! "nothing stored"; write failures are logged and otherwise ignored, the
//! in-memory session stays authoritative. SSR builds store nothing.

#[cfg(all(test, not(feature = "hydrate")))]
#[path = "storage_test.rs"]
mod storage_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Stored value under `key`, if any decodes as `T`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let raw = local_storage()?.get_item(key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("discarding stored {key}: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Replace the value under `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            log::warn!("localStorage unavailable, {key} not persisted");
            return;
        };
        let written = serde_json::to_string(value)
            .map_err(|e| e.to_string())
            .and_then(|raw| storage.set_item(key, &raw).map_err(|e| format!("{e:?}")));
        if let Err(e) = written {
            log::warn!("could not persist {key}: {e}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

/// Forget the value under `key` (sign-out).
pub fn remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}
