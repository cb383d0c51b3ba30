//! Panel chrome state: active tab and the inline notice line.
//!
//! DESIGN
//! ======
//! Tab availability is derived from the role on every render so a courier can
//! never land on the register tab, even if it was the last active tab of a
//! previous session.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use super::session::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTab {
    Register,
    List,
}

impl PanelTab {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::List => "List",
        }
    }
}

/// Tabs offered to `role`, in display order.
#[must_use]
pub fn visible_tabs(role: Role) -> Vec<PanelTab> {
    if role.can_create_records() {
        vec![PanelTab::Register, PanelTab::List]
    } else {
        vec![PanelTab::List]
    }
}

/// Tab to show for `role` given the last requested one.
#[must_use]
pub fn effective_tab(role: Role, requested: Option<PanelTab>) -> PanelTab {
    let tabs = visible_tabs(role);
    match requested {
        Some(tab) if tabs.contains(&tab) => tab,
        _ => tabs[0],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line message shown above the active panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => "panel-notice panel-notice--info",
            NoticeKind::Error => "panel-notice panel-notice--error",
        }
    }
}

/// UI state shared through context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub tab: Option<PanelTab>,
    pub notice: Option<Notice>,
}
