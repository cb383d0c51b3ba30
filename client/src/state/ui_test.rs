use super::*;

// =============================================================
// visible_tabs / effective_tab
// =============================================================

#[test]
fn courier_sees_only_the_list() {
    assert_eq!(visible_tabs(Role::Courier), [PanelTab::List]);
}

#[test]
fn intake_office_and_admin_see_both_tabs() {
    assert_eq!(visible_tabs(Role::IntakeOffice), [PanelTab::Register, PanelTab::List]);
    assert_eq!(visible_tabs(Role::Admin), [PanelTab::Register, PanelTab::List]);
}

#[test]
fn default_tab_is_register_when_available() {
    assert_eq!(effective_tab(Role::Admin, None), PanelTab::Register);
    assert_eq!(effective_tab(Role::Courier, None), PanelTab::List);
}

#[test]
fn courier_never_lands_on_register() {
    assert_eq!(effective_tab(Role::Courier, Some(PanelTab::Register)), PanelTab::List);
}

#[test]
fn requested_tab_is_honoured_when_visible() {
    assert_eq!(effective_tab(Role::IntakeOffice, Some(PanelTab::List)), PanelTab::List);
}

// =============================================================
// Notice
// =============================================================

#[test]
fn notice_constructors_set_kind() {
    assert_eq!(Notice::info("ok").kind, NoticeKind::Info);
    assert_eq!(Notice::error("bad").kind, NoticeKind::Error);
}

#[test]
fn notice_css_class_reflects_kind() {
    assert!(Notice::error("x").css_class().ends_with("--error"));
    assert!(Notice::info("x").css_class().ends_with("--info"));
}

#[test]
fn ui_state_default_has_no_tab_or_notice() {
    let ui = UiState::default();
    assert!(ui.tab.is_none());
    assert!(ui.notice.is_none());
}
