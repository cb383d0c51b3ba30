//! Sign-in, registration, sign-out, and the session gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider announces identities; the gate turns each one into
//! a `SessionChange` by looking up the role profile in the document store.
//! The gate is the only code path that writes `SessionState`.
//!
//! TRADE-OFFS
//! ==========
//! Registration asks the provider to re-announce the identity after the
//! profile is written. The sign-up announcement usually arrives before the
//! profile exists, so without the re-announcement a fresh account would stay
//! on the login view until the next reload.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use futures::StreamExt;
use serde_json::Value;

use super::PanelError;
use crate::net::identity::{AuthError, Identity, IdentityProvider};
use crate::net::store::{Document, DocumentStore, PROFILES_COLLECTION};
use crate::state::records::RecordCollection;
use crate::state::session::{PROFILE_ROLE_FIELD, Role, Session, SessionState};

/// Outcome of resolving one auth-state announcement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionChange {
    Established(Session),
    /// The provider reports no signed-in identity.
    Cleared,
    /// Signed in, but no usable role profile was found.
    Unresolved { uid: String, reason: String },
}

impl SessionChange {
    /// Apply to the shared state.
    ///
    /// A session for a different user (or the first one) starts with an empty
    /// record list; a repeated announcement for the same user keeps it.
    /// `Unresolved` for the user already signed in leaves the session alone.
    pub fn apply(self, session: &mut SessionState, records: &mut RecordCollection) {
        match self {
            Self::Established(next) => {
                let same_user = session.current().is_some_and(|s| s.user_id == next.user_id);
                if !same_user {
                    records.clear();
                }
                session.establish(next);
            }
            Self::Cleared => session.clear(),
            // A failed lookup for the signed-in user keeps their session;
            // any other identity without a profile ends it.
            Self::Unresolved { uid, .. } => {
                if session.current().is_none_or(|s| s.user_id != uid) {
                    session.clear();
                }
            }
        }
    }
}

/// Sign in with email and password.
///
/// # Errors
///
/// Returns the provider's `AuthError` unchanged.
pub async fn login(identity: &dyn IdentityProvider, email: &str, password: &str) -> Result<Identity, AuthError> {
    let signed_in = identity.sign_in(email, password).await?;
    log::info!("signed in uid={}", signed_in.uid);
    Ok(signed_in)
}

/// Create an account and write its role profile.
///
/// # Errors
///
/// Returns `PanelError::Auth` when the provider refuses the account and
/// `PanelError::Store` when the profile write fails.
pub async fn register(
    identity: &dyn IdentityProvider,
    store: &dyn DocumentStore,
    email: &str,
    password: &str,
    role: Role,
) -> Result<Identity, PanelError> {
    let created = identity.sign_up(email, password).await?;
    store
        .set_document(PROFILES_COLLECTION, &created.uid, profile_document(role))
        .await
        .inspect_err(|e| log::error!("profile write failed uid={}: {e}", created.uid))?;
    log::info!("registered uid={} role={role}", created.uid);
    identity.reload();
    Ok(created)
}

pub async fn sign_out(identity: &dyn IdentityProvider) {
    identity.sign_out().await;
    log::info!("signed out");
}

/// Profile body for `role`.
#[must_use]
pub fn profile_document(role: Role) -> Document {
    let mut doc = Document::new();
    doc.insert(PROFILE_ROLE_FIELD.to_owned(), Value::String(role.wire_value().to_owned()));
    doc
}

/// Read the role out of a profile document.
///
/// # Errors
///
/// Returns a description of why the profile carries no usable role.
pub fn role_from_profile(profile: &Document) -> Result<Role, String> {
    let raw = profile
        .get(PROFILE_ROLE_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("profile has no `{PROFILE_ROLE_FIELD}` field"))?;
    raw.parse::<Role>().map_err(|e| e.to_string())
}

/// Turn one auth-state announcement into a session change.
pub async fn resolve_session(store: &dyn DocumentStore, announced: Option<Identity>) -> SessionChange {
    let Some(identity) = announced else {
        return SessionChange::Cleared;
    };

    let unresolved = |reason: String| {
        log::warn!("no session for uid={}: {reason}", identity.uid);
        SessionChange::Unresolved { uid: identity.uid.clone(), reason }
    };

    match store.get_document(PROFILES_COLLECTION, &identity.uid).await {
        Ok(Some(profile)) => match role_from_profile(&profile) {
            Ok(role) => SessionChange::Established(Session {
                user_id: identity.uid.clone(),
                email: identity.email.clone(),
                role,
            }),
            Err(reason) => unresolved(reason),
        },
        Ok(None) => unresolved("profile not found".to_owned()),
        Err(e) => unresolved(e.to_string()),
    }
}

/// Follow the provider's announcements until the subscription ends.
///
/// Each announcement is fully resolved before the next one is read, so
/// changes are applied in arrival order.
pub async fn run_session_gate<F>(identity: &dyn IdentityProvider, store: &dyn DocumentStore, mut apply: F)
where
    F: FnMut(SessionChange),
{
    let mut changes = identity.subscribe();
    while let Some(announced) = changes.next().await {
        apply(resolve_session(store, announced).await);
    }
}
