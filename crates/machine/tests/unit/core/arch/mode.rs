//! Privilege mode conversion and formatting tests.

use rvdiff_core::core::arch::mode::PrivilegeMode;

#[test]
fn from_u8_maps_defined_encodings() {
    assert_eq!(PrivilegeMode::from_u8(0), PrivilegeMode::User);
    assert_eq!(PrivilegeMode::from_u8(1), PrivilegeMode::Supervisor);
    assert_eq!(PrivilegeMode::from_u8(3), PrivilegeMode::Machine);
}

#[test]
fn from_u8_defaults_unknown_encodings_to_machine() {
    assert_eq!(PrivilegeMode::from_u8(2), PrivilegeMode::Machine);
    assert_eq!(PrivilegeMode::from_u8(255), PrivilegeMode::Machine);
}

#[test]
fn to_u8_round_trips() {
    for mode in [
        PrivilegeMode::User,
        PrivilegeMode::Supervisor,
        PrivilegeMode::Machine,
    ] {
        assert_eq!(PrivilegeMode::from_u8(mode.to_u8()), mode);
    }
}

#[test]
fn ordering_follows_privilege_level() {
    assert!(PrivilegeMode::User < PrivilegeMode::Supervisor);
    assert!(PrivilegeMode::Supervisor < PrivilegeMode::Machine);
}

#[test]
fn display_uses_the_mode_name() {
    assert_eq!(PrivilegeMode::User.to_string(), "User");
    assert_eq!(PrivilegeMode::Machine.name(), "Machine");
}

#[test]
fn serde_uses_lowercase_names() {
    let mode: PrivilegeMode = serde_json::from_str("\"supervisor\"").unwrap();
    assert_eq!(mode, PrivilegeMode::Supervisor);
    assert_eq!(
        serde_json::to_string(&PrivilegeMode::Machine).unwrap(),
        "\"machine\""
    );
}
