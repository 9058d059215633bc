use super::*;
use crate::util::validation::{EMAIL_REQUIRED, PASSWORD_REQUIRED, PASSWORD_WEAK, USERNAME_REQUIRED};

fn filled_login() -> AuthForm {
    let mut form = AuthForm::default();
    form.set_field(Field::Email, "a@gmail.com");
    form.set_field(Field::Password, "Secret1!");
    form
}

fn filled_signup() -> AuthForm {
    let mut form = filled_login();
    form.toggle_signup();
    form.set_field(Field::Username, "alice");
    form.set_field(Field::WhatsappNumber, "+923001234567");
    form
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_form_is_idle_login_with_dial_code_prefilled() {
    let form = AuthForm::default();
    assert_eq!(form.mode(), AuthMode::Login);
    assert_eq!(form.value(Field::WhatsappNumber), "+92");
    assert_eq!(form.role(), Role::Buyer);
    assert!(!form.is_submitting());
    assert!(!form.has_errors());
    assert!(!form.can_submit());
}

// =============================================================
// Mode transitions
// =============================================================

#[test]
fn login_and_signup_toggle_both_ways() {
    let mut form = AuthForm::default();
    assert!(form.toggle_signup());
    assert_eq!(form.mode(), AuthMode::Signup);
    assert!(form.toggle_signup());
    assert_eq!(form.mode(), AuthMode::Login);
}

#[test]
fn forgot_is_reachable_only_from_login_and_returns_to_login() {
    let mut form = AuthForm::default();
    form.toggle_signup();
    assert!(!form.show_forgot());
    assert_eq!(form.mode(), AuthMode::Signup);

    form.toggle_signup();
    assert!(form.show_forgot());
    assert_eq!(form.mode(), AuthMode::Forgot);
    assert!(!form.toggle_signup());
    assert!(form.back_to_login());
    assert_eq!(form.mode(), AuthMode::Login);
    assert!(!form.back_to_login());
}

#[test]
fn switching_modes_clears_errors_but_keeps_values() {
    let mut form = AuthForm::default();
    form.set_field(Field::Email, "a@yahoo.com");
    assert_eq!(form.begin_submit(), Err(Blocked::Invalid));
    assert!(form.has_errors());

    form.toggle_signup();

    assert!(!form.has_errors());
    assert_eq!(form.value(Field::Email), "a@yahoo.com");
}

#[test]
fn switching_modes_resets_submission_and_retires_ticket() {
    let mut form = filled_login();
    let (ticket, _) = form.begin_submit().unwrap();
    assert!(form.is_submitting());

    form.show_forgot();

    assert!(!form.is_submitting());
    assert!(!form.finish_submit(ticket));
}

// =============================================================
// Validation and enablement
// =============================================================

#[test]
fn login_enables_submit_only_when_fields_pass() {
    let mut form = AuthForm::default();
    form.set_field(Field::Email, "a@gmail.com");
    assert!(!form.can_submit());
    form.set_field(Field::Password, "Secret1!");
    assert!(form.can_submit());
    form.set_field(Field::Email, "a@yahoo.com");
    assert!(!form.can_submit());
}

#[test]
fn signup_requires_every_field() {
    let mut form = filled_login();
    form.toggle_signup();
    assert!(!form.can_submit());
    assert_eq!(form.begin_submit(), Err(Blocked::Invalid));
    assert_eq!(form.error(Field::Username), Some(USERNAME_REQUIRED));
    assert!(form.error(Field::WhatsappNumber).is_some());
    assert!(form.error(Field::Email).is_none());
    assert!(!form.is_submitting());
}

#[test]
fn forgot_only_needs_a_non_empty_email() {
    let mut form = AuthForm::default();
    form.show_forgot();
    assert_eq!(form.begin_submit(), Err(Blocked::Invalid));
    assert_eq!(form.error(Field::Email), Some(EMAIL_REQUIRED));

    form.set_field(Field::Email, "someone@example.org");
    assert!(form.can_submit());
    let (_, submission) = form.begin_submit().unwrap();
    assert_eq!(submission, Submission::Forgot { email: "someone@example.org".to_owned() });
}

#[test]
fn submit_shows_inline_errors_and_typing_clears_them() {
    let mut form = AuthForm::default();
    form.set_field(Field::Password, "weak");
    assert_eq!(form.begin_submit(), Err(Blocked::Invalid));
    assert_eq!(form.error(Field::Password), Some(PASSWORD_WEAK));
    assert_eq!(form.error(Field::Email), Some(EMAIL_REQUIRED));

    form.set_field(Field::Password, "Still1weak");
    assert_eq!(form.error(Field::Password), Some(PASSWORD_WEAK));
    form.set_field(Field::Password, "Abcdef1!");
    assert_eq!(form.error(Field::Password), None);
    form.set_field(Field::Password, "");
    assert_eq!(form.error(Field::Password), None);
    assert_ne!(form.check(Field::Password), Ok(()));
    assert_eq!(form.check(Field::Password), Err(PASSWORD_REQUIRED.to_owned()));
}

// =============================================================
// Submission lifecycle
// =============================================================

#[test]
fn begin_submit_builds_login_request() {
    let mut form = filled_login();
    form.set_field(Field::Email, "  a@gmail.com ");
    let (_, submission) = form.begin_submit().unwrap();
    assert_eq!(
        submission,
        Submission::Login(LoginRequest { email: "a@gmail.com".to_owned(), password: "Secret1!".to_owned() })
    );
    assert!(form.is_submitting());
    assert!(!form.can_submit());
}

#[test]
fn begin_submit_builds_signup_request_with_role() {
    let mut form = filled_signup();
    form.set_role(Role::Supplier);
    let (_, submission) = form.begin_submit().unwrap();
    let Submission::Signup(request) = submission else {
        panic!("expected signup submission");
    };
    assert_eq!(request.username, "alice");
    assert_eq!(request.whatsapp_number, "+923001234567");
    assert_eq!(request.role, Role::Supplier);
}

#[test]
fn second_submit_while_outstanding_is_busy() {
    let mut form = filled_login();
    assert!(form.begin_submit().is_ok());
    assert_eq!(form.begin_submit(), Err(Blocked::Busy));
}

#[test]
fn finish_submit_accepts_only_current_ticket() {
    let mut form = filled_login();
    let (ticket, _) = form.begin_submit().unwrap();
    assert!(form.finish_submit(ticket));
    assert!(!form.is_submitting());

    let (newer, _) = form.begin_submit().unwrap();
    assert!(!form.finish_submit(ticket));
    assert!(form.is_submitting());
    assert!(form.finish_submit(newer));
}

#[test]
fn reset_to_login_clears_fields() {
    let mut form = filled_signup();
    form.set_role(Role::Supplier);
    form.reset_to_login();
    assert_eq!(form.mode(), AuthMode::Login);
    assert_eq!(form.value(Field::Email), "");
    assert_eq!(form.value(Field::Password), "");
    assert_eq!(form.value(Field::Username), "");
    assert_eq!(form.value(Field::WhatsappNumber), "+92");
    assert_eq!(form.role(), Role::Buyer);
}

#[test]
fn reject_field_attaches_server_error() {
    let mut form = filled_signup();
    form.reject_field(Field::Email, EMAIL_TAKEN);
    assert_eq!(form.error(Field::Email), Some(EMAIL_TAKEN));
}
