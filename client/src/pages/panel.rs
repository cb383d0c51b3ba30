//! The single panel route.
//!
//! SYSTEM CONTEXT
//! ==============
//! On hydrate the page fetches the backend settings from the host, wires the
//! collaborators and then follows auth announcements for as long as the page
//! is mounted. Every announcement is resolved to a `SessionChange` and folded
//! into the shared signals; components only ever render those signals.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use leptos::prelude::*;

use crate::components::session_gate::SessionGate;
use crate::net::Collaborators;
use crate::services::auth::SessionChange;
use crate::state::records::RecordCollection;
use crate::state::session::SessionState;
use crate::state::ui::UiState;

#[component]
pub fn PanelPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let records = expect_context::<RwSignal<RecordCollection>>();
    let backend = expect_context::<RwSignal<Option<Collaborators>>>();
    let ui = expect_context::<RwSignal<UiState>>();

    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;

        use futures::future::{AbortHandle, Abortable};

        use crate::net::api::fetch_backend_config;
        use crate::services::auth::run_session_gate;
        use crate::state::ui::Notice;
        use crate::util::download::BrowserDownload;

        let (abort, registration) = AbortHandle::new_pair();
        leptos::task::spawn_local(async move {
            let config = match fetch_backend_config().await {
                Ok(config) => config,
                Err(e) => {
                    log::error!("backend config unavailable: {e}");
                    let text = format!("Could not load backend settings: {e}");
                    ui.update(|u| u.notice = Some(Notice::error(text)));
                    return;
                }
            };
            log::info!("backend={:?}", config.backend);
            let collab = Collaborators::from_config(&config, Arc::new(BrowserDownload));
            backend.set(Some(collab.clone()));

            let gate = run_session_gate(&*collab.identity, &*collab.store, move |change| {
                session.update(|s| records.update(|r| ui.update(|u| apply_session_change(change, s, r, u))));
            });
            if Abortable::new(gate, registration).await.is_err() {
                log::debug!("session gate stopped");
            }
        });
        on_cleanup(move || abort.abort());
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (session, records, backend, ui);

    view! {
        <main class="panel-page">
            <SessionGate/>
        </main>
    }
}

/// Fold one resolved auth announcement into the panel state.
///
/// A fresh session starts on the role's default tab with no stale notice.
pub fn apply_session_change(
    change: SessionChange,
    session: &mut SessionState,
    records: &mut RecordCollection,
    ui: &mut UiState,
) {
    let established = matches!(change, SessionChange::Established(_));
    let previous = session.current().map(|s| s.user_id.clone());
    change.apply(session, records);
    if established && session.current().map(|s| s.user_id.clone()) != previous {
        ui.tab = None;
        ui.notice = None;
    }
}
