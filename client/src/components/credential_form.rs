//! Login/register form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shown by the session gate while no session exists. Submitting only talks
//! to the identity provider (and, on registration, the profile store); the
//! gate notices the resulting auth change on its own.

use leptos::prelude::*;

use crate::net::Collaborators;
use crate::services::PanelError;
use crate::services::auth::{login, register};
use crate::state::credentials::{AuthMode, Credentials};
use crate::state::session::Role;
use crate::state::ui::{Notice, UiState};
use crate::util::notify::{alert, failure_text};

#[component]
pub fn CredentialForm() -> impl IntoView {
    let backend = expect_context::<RwSignal<Option<Collaborators>>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let creds = RwSignal::new(Credentials::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let Some(collab) = backend.get_untracked() else {
            ui.update(|u| u.notice = Some(Notice::error("Backend is not ready yet.")));
            return;
        };
        let form = creds.get_untracked();
        busy.set(true);
        ui.update(|u| u.notice = None);

        leptos::task::spawn_local(async move {
            let result = match form.mode {
                AuthMode::SignIn => login(&*collab.identity, &form.email, &form.password)
                    .await
                    .map_err(PanelError::from),
                AuthMode::Register => {
                    register(&*collab.identity, &*collab.store, &form.email, &form.password, form.role).await
                }
            };
            if let Err(e) = result {
                let text = failure_text(form.mode.failure_prefix(), &e);
                log::warn!("{text}");
                alert(&text);
                ui.update(|u| u.notice = Some(Notice::error(text)));
            }
            busy.set(false);
        });
    };

    let mode = move || creds.with(|c| c.mode);

    view! {
        <div class="login-page">
            <div class="login-card">
                <h2>"Dispatch Panel Access"</h2>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="Email"
                        prop:value=move || creds.with(|c| c.email.clone())
                        on:input=move |ev| creds.update(|c| c.email = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || creds.with(|c| c.password.clone())
                        on:input=move |ev| creds.update(|c| c.password = event_target_value(&ev))
                    />
                    <Show when=move || creds.with(Credentials::shows_role_selector)>
                        <select
                            class="login-input"
                            prop:value=move || creds.with(|c| c.role.wire_value())
                            on:change=move |ev| {
                                if let Ok(role) = event_target_value(&ev).parse::<Role>() {
                                    creds.update(|c| c.role = role);
                                }
                            }
                        >
                            {Role::ALL
                                .into_iter()
                                .map(|role| view! { <option value=role.wire_value()>{role.label()}</option> })
                                .collect_view()}
                        </select>
                    </Show>
                    <div class="login-actions">
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            {move || mode().submit_label()}
                        </button>
                        <button
                            class="login-button login-button--ghost"
                            type="button"
                            on:click=move |_| creds.update(Credentials::toggle_mode)
                        >
                            {move || mode().toggle_label()}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
