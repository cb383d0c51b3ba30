//! Browser helpers shared across UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic; each one no-ops outside the `hydrate` build.

pub mod download;
pub mod notify;
pub mod storage;
