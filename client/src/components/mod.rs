//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the panel chrome and forms while reading/writing shared
//! state from Leptos context providers.

pub mod credential_form;
pub mod notice_bar;
pub mod record_form;
pub mod record_list;
pub mod session_gate;
