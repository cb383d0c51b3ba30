use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;

use super::*;
use crate::net::memory::{InMemoryIdentity, InMemoryStore};
use crate::state::records::DispatchRecord;

fn identity(uid: &str) -> Identity {
    Identity { uid: uid.to_owned(), email: format!("{uid}@example.com"), id_token: None }
}

fn session(uid: &str, role: Role) -> Session {
    Session { user_id: uid.to_owned(), email: format!("{uid}@example.com"), role }
}

fn seed_profile(store: &InMemoryStore, uid: &str, role: Role) {
    block_on(store.set_document(PROFILES_COLLECTION, uid, profile_document(role))).unwrap();
}

#[derive(Default)]
struct GateState {
    session: SessionState,
    records: RecordCollection,
}

/// Spawn the gate on `pool`, applying changes to a shared `GateState`.
fn spawn_gate(
    pool: &LocalPool,
    idp: Arc<InMemoryIdentity>,
    store: Arc<InMemoryStore>,
) -> Rc<RefCell<GateState>> {
    let state = Rc::new(RefCell::new(GateState::default()));
    let sink = state.clone();
    pool.spawner()
        .spawn_local(async move {
            run_session_gate(&*idp, &*store, move |change| {
                let mut s = sink.borrow_mut();
                let GateState { session, records } = &mut *s;
                change.apply(session, records);
            })
            .await;
        })
        .unwrap();
    state
}

// =============================================================================
// profile documents
// =============================================================================

#[test]
fn profile_document_stores_wire_role() {
    let doc = profile_document(Role::IntakeOffice);
    assert_eq!(doc["rol"], "oficina_partes");
}

#[test]
fn role_from_profile_reads_role() {
    assert_eq!(role_from_profile(&profile_document(Role::Admin)), Ok(Role::Admin));
}

#[test]
fn role_from_profile_rejects_missing_or_unknown_role() {
    assert!(role_from_profile(&Document::new()).is_err());
    let mut doc = Document::new();
    doc.insert("rol".to_owned(), Value::String("boss".to_owned()));
    assert_eq!(role_from_profile(&doc), Err("unknown role: boss".to_owned()));
}

// =============================================================================
// resolve_session
// =============================================================================

#[test]
fn resolve_none_clears() {
    let store = InMemoryStore::new();
    assert_eq!(block_on(resolve_session(&store, None)), SessionChange::Cleared);
}

#[test]
fn resolve_with_profile_establishes_session() {
    let store = InMemoryStore::new();
    seed_profile(&store, "u1", Role::Admin);
    let change = block_on(resolve_session(&store, Some(identity("u1"))));
    assert_eq!(change, SessionChange::Established(session("u1", Role::Admin)));
}

#[test]
fn resolve_without_profile_is_unresolved() {
    let store = InMemoryStore::new();
    let change = block_on(resolve_session(&store, Some(identity("u1"))));
    assert!(matches!(change, SessionChange::Unresolved { ref uid, .. } if uid == "u1"));
}

// =============================================================================
// SessionChange::apply
// =============================================================================

#[test]
fn establishing_a_new_user_resets_records() {
    let mut state = SessionState::default();
    let mut records = RecordCollection::default();
    records.push(DispatchRecord::default());

    SessionChange::Established(session("u1", Role::Admin)).apply(&mut state, &mut records);
    assert!(records.is_empty());
    assert_eq!(state.role(), Some(Role::Admin));
}

#[test]
fn repeated_announcement_for_same_user_keeps_records() {
    let mut state = SessionState::default();
    let mut records = RecordCollection::default();
    SessionChange::Established(session("u1", Role::Admin)).apply(&mut state, &mut records);
    records.push(DispatchRecord::default());

    SessionChange::Established(session("u1", Role::Admin)).apply(&mut state, &mut records);
    assert_eq!(records.len(), 1);
}

#[test]
fn cleared_and_unresolved_remove_session() {
    let mut state = SessionState::default();
    let mut records = RecordCollection::default();
    SessionChange::Established(session("u1", Role::Admin)).apply(&mut state, &mut records);
    SessionChange::Cleared.apply(&mut state, &mut records);
    assert!(!state.is_authenticated());

    SessionChange::Established(session("u1", Role::Admin)).apply(&mut state, &mut records);
    SessionChange::Unresolved { uid: "u2".to_owned(), reason: "profile not found".to_owned() }
        .apply(&mut state, &mut records);
    assert!(!state.is_authenticated());
}

#[test]
fn unresolved_lookup_for_current_user_keeps_session_and_records() {
    let mut state = SessionState::default();
    let mut records = RecordCollection::default();
    SessionChange::Established(session("u1", Role::IntakeOffice)).apply(&mut state, &mut records);
    records.push(DispatchRecord::default());

    SessionChange::Unresolved { uid: "u1".to_owned(), reason: "request failed".to_owned() }
        .apply(&mut state, &mut records);

    assert_eq!(state.role(), Some(Role::IntakeOffice));
    assert_eq!(records.len(), 1);
}

// =============================================================================
// login / register through the gate
// =============================================================================

#[test]
fn rejected_login_reports_error_and_establishes_no_session() {
    let mut pool = LocalPool::new();
    let idp = Arc::new(InMemoryIdentity::new());
    let store = Arc::new(InMemoryStore::new());
    block_on(idp.sign_up("a@b.com", "secret1")).unwrap();
    seed_profile(&store, &idp.hub().current().unwrap().uid, Role::Admin);
    block_on(idp.sign_out());

    let gate = spawn_gate(&pool, idp.clone(), store.clone());
    pool.run_until_stalled();

    let result = block_on(login(&*idp, "a@b.com", "wrong-password"));
    pool.run_until_stalled();

    assert!(matches!(result, Err(AuthError::Rejected(_))));
    assert!(!gate.borrow().session.is_authenticated());
}

#[test]
fn login_with_profile_establishes_session_with_profile_role() {
    let mut pool = LocalPool::new();
    let idp = Arc::new(InMemoryIdentity::new());
    let store = Arc::new(InMemoryStore::new());
    let created = block_on(idp.sign_up("a@b.com", "secret1")).unwrap();
    seed_profile(&store, &created.uid, Role::IntakeOffice);
    block_on(idp.sign_out());

    let gate = spawn_gate(&pool, idp.clone(), store.clone());
    block_on(login(&*idp, "a@b.com", "secret1")).unwrap();
    pool.run_until_stalled();

    let state = gate.borrow();
    let active = state.session.current().unwrap();
    assert_eq!(active.user_id, created.uid);
    assert_eq!(active.email, "a@b.com");
    assert_eq!(active.role, Role::IntakeOffice);
}

#[test]
fn register_then_state_change_yields_session_with_registered_role() {
    let mut pool = LocalPool::new();
    let idp = Arc::new(InMemoryIdentity::new());
    let store = Arc::new(InMemoryStore::new());
    let gate = spawn_gate(&pool, idp.clone(), store.clone());
    pool.run_until_stalled();

    let created = block_on(register(&*idp, &*store, "new@b.com", "secret1", Role::Admin)).unwrap();
    pool.run_until_stalled();

    let profile = block_on(store.get_document(PROFILES_COLLECTION, &created.uid)).unwrap().unwrap();
    assert_eq!(role_from_profile(&profile), Ok(Role::Admin));
    assert_eq!(gate.borrow().session.role(), Some(Role::Admin));
}

#[test]
fn register_failure_writes_no_profile() {
    let idp = InMemoryIdentity::new();
    let store = InMemoryStore::new();
    block_on(idp.sign_up("taken@b.com", "secret1")).unwrap();

    let err = block_on(register(&idp, &store, "taken@b.com", "secret1", Role::Courier)).unwrap_err();
    assert_eq!(err, PanelError::Auth(AuthError::Rejected("email exists".to_owned())));
    assert_eq!(store.write_count(), 0);
}

#[test]
fn register_surfaces_profile_write_failure() {
    let idp = InMemoryIdentity::new();
    let store = InMemoryStore::new();
    store.set_fail_writes(true);
    let err = block_on(register(&idp, &store, "new@b.com", "secret1", Role::Courier)).unwrap_err();
    assert!(matches!(err, PanelError::Store(_)));
}

#[test]
fn identity_without_profile_stays_signed_out_in_ui() {
    let mut pool = LocalPool::new();
    let idp = Arc::new(InMemoryIdentity::new());
    let store = Arc::new(InMemoryStore::new());
    let gate = spawn_gate(&pool, idp.clone(), store.clone());

    block_on(idp.sign_up("orphan@b.com", "secret1")).unwrap();
    pool.run_until_stalled();

    assert!(!gate.borrow().session.is_authenticated());
}

#[test]
fn sign_out_clears_session() {
    let mut pool = LocalPool::new();
    let idp = Arc::new(InMemoryIdentity::new());
    let store = Arc::new(InMemoryStore::new());
    let gate = spawn_gate(&pool, idp.clone(), store.clone());
    block_on(register(&*idp, &*store, "a@b.com", "secret1", Role::Courier)).unwrap();
    pool.run_until_stalled();
    assert!(gate.borrow().session.is_authenticated());

    block_on(sign_out(&*idp));
    pool.run_until_stalled();
    assert!(!gate.borrow().session.is_authenticated());
}
