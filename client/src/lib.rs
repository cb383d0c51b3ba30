//! # panel
//!
//! Leptos + WASM frontend for the courier dispatch panel.
//!
//! Staff sign in or register with a role, intake office and admin users log
//! dispatch records, and admins export the session's records as CSV. Identity
//! and persistence go through the collaborator traits in `net`; the host
//! server only serves the app and its backend settings.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod services;
pub mod state;
pub mod util;

/// WASM entry point: attach to the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
