//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `records`, `credentials`, `ui`) so
//! components depend on small focused models. Each model is a plain value;
//! the app wraps the shared ones in `RwSignal`s provided through context.

pub mod credentials;
pub mod records;
pub mod session;
pub mod ui;
