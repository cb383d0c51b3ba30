use super::*;

#[test]
fn header_title_names_the_role() {
    assert_eq!(header_title(Some(Role::Admin)), "Panel - Administrator");
    assert_eq!(header_title(Some(Role::IntakeOffice)), "Panel - Intake office");
    assert_eq!(header_title(Some(Role::Courier)), "Panel - Courier");
}

#[test]
fn header_title_is_blank_without_a_session() {
    assert_eq!(header_title(None), "");
}
