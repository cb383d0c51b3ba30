//! Blocking user alerts.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

/// Show `message` in a blocking browser alert. SSR no-op.
pub fn alert(message: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
    }
}

/// `"<prefix>: <error>"`, the text shown for a failed auth action.
#[must_use]
pub fn failure_text(prefix: &str, error: &impl std::fmt::Display) -> String {
    format!("{prefix}: {error}")
}
