//! Authenticated panel chrome, or the credential form when signed out.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gate only renders what `SessionState` says. Establishing and clearing
//! the session happens in the page-level auth loop.

#[cfg(test)]
#[path = "session_gate_test.rs"]
mod session_gate_test;

use leptos::prelude::*;

use crate::components::credential_form::CredentialForm;
use crate::components::notice_bar::NoticeBar;
use crate::components::record_form::RecordForm;
use crate::components::record_list::RecordList;
use crate::net::Collaborators;
use crate::services::auth::sign_out;
use crate::state::session::{Role, SessionState};
use crate::state::ui::{PanelTab, UiState, effective_tab, visible_tabs};

#[component]
pub fn SessionGate() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    view! {
        <NoticeBar/>
        <Show when=move || session.with(SessionState::is_authenticated) fallback=|| view! { <CredentialForm/> }>
            <AuthenticatedPanel/>
        </Show>
    }
}

#[component]
fn AuthenticatedPanel() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let backend = expect_context::<RwSignal<Option<Collaborators>>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let role = move || session.with(|s| s.role().unwrap_or_default());
    let active = move || effective_tab(role(), ui.with(|u| u.tab));

    let on_sign_out = move |_| {
        let Some(collab) = backend.get_untracked() else {
            return;
        };
        leptos::task::spawn_local(async move {
            sign_out(&*collab.identity).await;
        });
    };

    view! {
        <div class="panel">
            <header class="panel-header">
                <h1 class="panel-header__title">{move || header_title(session.with(SessionState::role))}</h1>
                <button class="panel-button panel-button--ghost" on:click=on_sign_out>
                    "Sign out"
                </button>
            </header>
            <nav class="panel-tabs">
                {move || {
                    visible_tabs(role())
                        .into_iter()
                        .map(|tab| tab_button(tab, active, ui))
                        .collect_view()
                }}
            </nav>
            <section class="panel-content">
                {move || match active() {
                    PanelTab::Register => view! { <RecordForm/> }.into_any(),
                    PanelTab::List => view! { <RecordList/> }.into_any(),
                }}
            </section>
        </div>
    }
}

fn tab_button(tab: PanelTab, active: impl Fn() -> PanelTab + Send + Sync + 'static, ui: RwSignal<UiState>) -> impl IntoView {
    let class = move || {
        if active() == tab {
            "panel-tab panel-tab--active"
        } else {
            "panel-tab"
        }
    };
    view! {
        <button class=class on:click=move |_| ui.update(|u| u.tab = Some(tab))>
            {tab.label()}
        </button>
    }
}

/// Role label shown in the header, or an empty string without a session.
#[must_use]
pub fn header_title(role: Option<Role>) -> String {
    role.map_or_else(String::new, |r| format!("Panel - {}", r.label()))
}
