//! In-process collaborators with the same contracts as the Firebase ones.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backs the `memory` backend mode for local development and every service
//! test. State lives only as long as the value; nothing is persisted.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::export::FileExport;
use super::identity::{AuthError, AuthHub, AuthSubscription, Identity, IdentityProvider};
use super::store::{Document, DocumentStore, StoreError};

const MIN_PASSWORD_LEN: usize = 6;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// IDENTITY
// =============================================================================

struct Account {
    uid: String,
    password: String,
}

/// Email/password accounts held in memory.
#[derive(Default)]
pub struct InMemoryIdentity {
    accounts: Mutex<HashMap<String, Account>>,
    hub: AuthHub,
}

impl InMemoryIdentity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The broadcast this provider publishes to.
    #[must_use]
    pub fn hub(&self) -> &AuthHub {
        &self.hub
    }

    fn identity(uid: &str, email: &str) -> Identity {
        Identity { uid: uid.to_owned(), email: email.to_owned(), id_token: None }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for InMemoryIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::Rejected("invalid email".to_owned()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Rejected(format!(
                "weak password : Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let identity = {
            let mut accounts = lock(&self.accounts);
            if accounts.contains_key(email) {
                return Err(AuthError::Rejected("email exists".to_owned()));
            }
            let uid = uuid::Uuid::new_v4().simple().to_string();
            accounts.insert(email.to_owned(), Account { uid: uid.clone(), password: password.to_owned() });
            Self::identity(&uid, email)
        };

        self.hub.publish(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = email.trim();
        let identity = {
            let accounts = lock(&self.accounts);
            match accounts.get(email) {
                Some(account) if account.password == password => Self::identity(&account.uid, email),
                _ => return Err(AuthError::Rejected("invalid login credentials".to_owned())),
            }
        };

        self.hub.publish(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) {
        self.hub.publish(None);
    }

    fn subscribe(&self) -> AuthSubscription {
        self.hub.subscribe()
    }

    fn reload(&self) {
        self.hub.republish();
    }
}

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Collections of documents held in memory, in insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<String, Vec<(String, Document)>>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail with a request error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Number of write calls received, failed ones included.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Snapshot of `collection` as `(key, document)` pairs.
    #[must_use]
    pub fn documents(&self, collection: &str) -> Vec<(String, Document)> {
        lock(&self.collections).get(collection).cloned().unwrap_or_default()
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Request("write rejected".to_owned()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl DocumentStore for InMemoryStore {
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        let collections = lock(&self.collections);
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|(k, _)| k == key))
            .map(|(_, doc)| doc.clone()))
    }

    async fn set_document(&self, collection: &str, key: &str, value: Document) -> Result<(), StoreError> {
        self.begin_write()?;
        let mut collections = lock(&self.collections);
        let docs = collections.entry(collection.to_owned()).or_default();
        match docs.iter_mut().find(|(k, _)| k == key) {
            Some((_, doc)) => *doc = value,
            None => docs.push((key.to_owned(), value)),
        }
        Ok(())
    }

    async fn add_document(&self, collection: &str, value: Document) -> Result<String, StoreError> {
        self.begin_write()?;
        let key = uuid::Uuid::new_v4().simple().to_string();
        lock(&self.collections)
            .entry(collection.to_owned())
            .or_default()
            .push((key.clone(), value));
        Ok(key)
    }
}

// =============================================================================
// FILE EXPORT
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
}

/// Keeps every downloaded file instead of saving it.
#[derive(Default)]
pub struct RecordingExport {
    files: Mutex<Vec<ExportedFile>>,
}

impl RecordingExport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn files(&self) -> Vec<ExportedFile> {
        lock(&self.files).clone()
    }
}

impl FileExport for RecordingExport {
    fn download(&self, bytes: &[u8], mime_type: &str, filename: &str) {
        lock(&self.files).push(ExportedFile {
            bytes: bytes.to_vec(),
            mime_type: mime_type.to_owned(),
            filename: filename.to_owned(),
        });
    }
}
