//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::Collaborators;
use crate::pages::panel::PanelPage;
use crate::state::{records::DispatchRecord, records::RecordCollection, session::SessionState, ui::UiState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let records = RwSignal::new(RecordCollection::default());
    let draft = RwSignal::new(DispatchRecord::default());
    let ui = RwSignal::new(UiState::default());
    // Filled in once the backend settings arrive.
    let backend = RwSignal::new(None::<Collaborators>);

    provide_context(session);
    provide_context(records);
    provide_context(draft);
    provide_context(ui);
    provide_context(backend);

    view! {
        <Stylesheet id="leptos" href="/pkg/panel.css"/>
        <Title text="Dispatch Panel"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=PanelPage/>
            </Routes>
        </Router>
    }
}
