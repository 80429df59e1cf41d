//! Unit tests for `ExtensionId` lookup keys.

use extension_gate::ExtensionId;

#[test]
fn keys_follow_list_entry_forms() {
    let id = ExtensionId::new("acme", "widgets", "1.0.0");

    assert_eq!(id.publisher_key(), "acme");
    assert_eq!(id.package_key(), "acme.widgets");
    assert_eq!(id.versioned_key(), "acme.widgets-1.0.0");
}

#[test]
fn keys_are_not_normalized() {
    let id = ExtensionId::new("Acme", "Widgets ", "1.0.0-beta");

    assert_eq!(id.package_key(), "Acme.Widgets ");
    assert_eq!(id.versioned_key(), "Acme.Widgets -1.0.0-beta");
}

#[test]
fn display_is_human_readable() {
    let id = ExtensionId::new("acme", "widgets", "2.1.0");
    assert_eq!(id.to_string(), "acme.widgets@2.1.0");
}
