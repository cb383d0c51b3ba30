//! Identity-provider contract and the auth-state broadcast it publishes.
//!
//! ARCHITECTURE
//! ============
//! Providers own an `AuthHub`. Every successful sign-in, sign-up or sign-out
//! goes through the hub, which remembers the current identity and fans the
//! change out to live subscriptions. A subscription first yields the state
//! current at subscribe time, then every later change.
//!
//! Subscriptions are plain `Stream`s; dropping one unsubscribes it.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::Stream;
use futures::channel::mpsc;
use serde::{Deserialize, Serialize};

/// Authenticated identity as reported by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    /// Bearer token for document-store requests, when the provider issues one.
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Failure signaled by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The provider refused the credentials or the account operation.
    #[error("{0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not available on server")]
    Unavailable,
}

#[async_trait(?Send)]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_out(&self);

    /// Stream of auth-state changes, starting with the current state.
    fn subscribe(&self) -> AuthSubscription;

    /// Re-announce the current state to every subscriber.
    fn reload(&self);
}

#[derive(Default)]
struct HubInner {
    current: Option<Identity>,
    next_id: u64,
    listeners: Vec<(u64, mpsc::UnboundedSender<Option<Identity>>)>,
}

/// Current identity plus the set of live subscriptions.
#[derive(Clone, Default)]
pub struct AuthHub {
    inner: Arc<Mutex<HubInner>>,
}

impl AuthHub {
    #[must_use]
    pub fn new(current: Option<Identity>) -> Self {
        let hub = Self::default();
        hub.lock().current = current;
        hub
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.lock().current.clone()
    }

    /// Record `identity` as current and notify subscribers.
    pub fn publish(&self, identity: Option<Identity>) {
        let mut inner = self.lock();
        inner.current = identity.clone();
        inner
            .listeners
            .retain(|(_, tx)| tx.unbounded_send(identity.clone()).is_ok());
    }

    /// Send the current state again without changing it.
    pub fn republish(&self) {
        let current = self.current();
        self.publish(current);
    }

    #[must_use]
    pub fn subscribe(&self) -> AuthSubscription {
        let (tx, rx) = mpsc::unbounded();
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        // The receiver is alive, so this cannot fail.
        let _ = tx.unbounded_send(inner.current.clone());
        inner.listeners.push((id, tx));
        drop(inner);
        AuthSubscription { id, rx, hub: self.clone() }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn unsubscribe(&self, id: u64) {
        self.lock().listeners.retain(|(listener, _)| *listener != id);
    }
}

/// Live auth-state subscription. Unsubscribes when dropped.
pub struct AuthSubscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<Option<Identity>>,
    hub: AuthHub,
}

impl Stream for AuthSubscription {
    type Item = Option<Identity>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}
