//! Record cards for the current session plus the admin-only CSV export.

use leptos::prelude::*;

use crate::net::Collaborators;
use crate::services::export::export_csv;
use crate::state::records::{DispatchRecord, RecordCollection, RecordField};
use crate::state::session::{Role, SessionState};
use crate::state::ui::{Notice, UiState};

#[component]
pub fn RecordList() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let records = expect_context::<RwSignal<RecordCollection>>();
    let backend = expect_context::<RwSignal<Option<Collaborators>>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let can_export = move || session.with(|s| s.role().is_some_and(Role::can_export));

    let on_export = move |_| {
        let Some(collab) = backend.get_untracked() else {
            return;
        };
        let result = session.with_untracked(|s| records.with_untracked(|r| export_csv(&*collab.export, s, r)));
        if let Err(e) = result {
            ui.update(|u| u.notice = Some(Notice::error(e.to_string())));
        }
    };

    view! {
        <div class="record-list">
            <Show when=can_export>
                <button class="panel-button record-list__export" on:click=on_export>
                    "Export CSV"
                </button>
            </Show>
            <Show when=move || records.with(RecordCollection::is_empty)>
                <p class="record-list__empty">"No records yet."</p>
            </Show>
            {move || {
                records.with(|list| {
                    list.iter().cloned().map(|record| view! { <RecordCard record/> }).collect_view()
                })
            }}
        </div>
    }
}

#[component]
pub fn RecordCard(record: DispatchRecord) -> impl IntoView {
    view! {
        <div class="record-card">
            {RecordField::ALL
                .into_iter()
                .map(|field| {
                    view! {
                        <p class="record-card__line">
                            <strong>{field.label()}": "</strong>
                            {record.get(field).to_owned()}
                        </p>
                    }
                })
                .collect_view()}
        </div>
    }
}
