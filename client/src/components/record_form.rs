//! Dispatch-record creation form. Not rendered for couriers.

use leptos::prelude::*;

use crate::net::Collaborators;
use crate::services::records::{commit_submission, prepare_submission, store_record};
use crate::state::records::{DispatchRecord, RecordCollection, RecordField};
use crate::state::session::{Role, SessionState};
use crate::state::ui::{Notice, UiState};

#[component]
pub fn RecordForm() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let records = expect_context::<RwSignal<RecordCollection>>();
    let draft = expect_context::<RwSignal<DispatchRecord>>();
    let backend = expect_context::<RwSignal<Option<Collaborators>>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let busy = RwSignal::new(false);

    let can_create = move || session.with(|s| s.role().is_some_and(Role::can_create_records));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let record = draft.get_untracked();
        let document = match prepare_submission(&record) {
            Ok(document) => document,
            Err(e) => {
                ui.update(|u| u.notice = Some(Notice::error(e.to_string())));
                return;
            }
        };
        let Some(collab) = backend.get_untracked() else {
            ui.update(|u| u.notice = Some(Notice::error("Backend is not ready yet.")));
            return;
        };
        busy.set(true);

        leptos::task::spawn_local(async move {
            match store_record(&*collab.store, document).await {
                Ok(_) => {
                    let saved = Notice::info(format!("Record {} saved.", record.id));
                    let mut current = draft.get_untracked();
                    records.update(|list| commit_submission(record, &mut current, list));
                    draft.set(current);
                    ui.update(|u| u.notice = Some(saved));
                }
                Err(e) => ui.update(|u| u.notice = Some(Notice::error(format!("Could not save record: {e}")))),
            }
            busy.set(false);
        });
    };

    view! {
        <Show when=can_create>
            <form class="record-form" on:submit=on_submit>
                {RecordField::ALL.into_iter().map(|field| field_input(draft, field)).collect_view()}
                <button class="panel-button" type="submit" disabled=move || busy.get()>
                    "Register"
                </button>
            </form>
        </Show>
    }
}

fn field_input(draft: RwSignal<DispatchRecord>, field: RecordField) -> AnyView {
    let value = move || draft.with(|d| d.get(field).to_owned());
    if field == RecordField::Notes {
        view! {
            <textarea
                class="record-input record-input--notes"
                name=field.name()
                placeholder=field.placeholder()
                prop:value=value
                on:input=move |ev| draft.update(|d| d.set(field, event_target_value(&ev)))
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                class="record-input"
                name=field.name()
                type=field.input_type()
                placeholder=field.placeholder()
                prop:value=value
                on:input=move |ev| draft.update(|d| d.set(field, event_target_value(&ev)))
            />
        }
        .into_any()
    }
}
