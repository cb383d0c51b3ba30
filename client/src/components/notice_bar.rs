//! Inline notice line shown above the panel content.

use leptos::prelude::*;

use crate::state::ui::UiState;

#[component]
pub fn NoticeBar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    move || {
        ui.with(|u| u.notice.clone()).map(|notice| {
            let class = notice.css_class();
            view! {
                <div class=class role="status">
                    <span>{notice.text}</span>
                    <button class="panel-notice__close" on:click=move |_| ui.update(|u| u.notice = None)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
