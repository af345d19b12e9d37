use crate::state::login::NoticeLevel;

use super::*;

// =============================================================
// notice_class
// =============================================================

#[test]
fn notice_class_without_notice_is_base() {
    assert_eq!(notice_class(None), "login-notice");
}

#[test]
fn notice_class_carries_level_modifier() {
    let notice = Notice { level: NoticeLevel::Warning, text: "Please fill all password fields".to_owned() };
    assert_eq!(notice_class(Some(&notice)), "login-notice login-notice--warning");
}

// =============================================================
// selected_admin_label / submit_label
// =============================================================

#[test]
fn selected_admin_label_shows_name_and_email() {
    let admin = AdministratorRecord {
        id: "a1".to_owned(),
        email: "ops@example.com".to_owned(),
        password: "secret1".to_owned(),
        name: "Ops".to_owned(),
        role: "admin".to_owned(),
    };
    let label = selected_admin_label(Some(&admin));
    assert_eq!(label, "Ops (ops@example.com)");
    assert!(!label.contains("secret1"));
}

#[test]
fn selected_admin_label_without_admin() {
    assert_eq!(selected_admin_label(None), "No administrator selected");
}

#[test]
fn submit_label_reflects_loading() {
    assert_eq!(submit_label(true), "Loading admins...");
    assert_eq!(submit_label(false), "Sign in");
}
