//! Submit flows connecting the credential and reset forms to the session
//! store and the API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Called from the gate modal and the reset-password page. Each flow claims
//! the form's `submitting` flag before any request, which is what keeps a
//! double click down to one network call. Results that arrive after the form
//! is gone are dropped without touching it or notifying.
//!
//! ERROR HANDLING
//! ==============
//! Local validation failures stay inline on the form. Server and network
//! failures become one error toast with the server's message when present.
//! The signup email pre-check is best effort: its failures are only logged.

#[cfg(test)]
#[path = "auth_flow_test.rs"]
mod auth_flow_test;

use crate::net::api::AuthApi;
use crate::state::auth_form::{AuthForm, EMAIL_TAKEN, Field, Submission};
use crate::state::form_slot::{Blocked, FormSlot};
use crate::state::reset_form::ResetPasswordForm;
use crate::state::session::{AuthFailure, SessionStore};
use crate::util::token_store::TokenStore;

pub const RESET_LINK_SENT: &str = "Password reset link sent to your email";
pub const RESET_LINK_FAILED: &str = "Failed to send reset link";
pub const PASSWORD_RESET_DONE: &str = "Password has been reset. Please log in.";
pub const PASSWORD_RESET_FAILED: &str = "Failed to reset password";

/// How a submit click ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No request was sent.
    Blocked(Blocked),
    /// The signup pre-check found the email registered; no signup was sent.
    EmailTaken,
    /// The server or network failed; an error toast was shown.
    Failed(AuthFailure),
    Succeeded,
    /// The form unmounted before the response arrived.
    Discarded,
}

enum Settled {
    SignedIn,
    EmailTaken,
    ResetLinkSent(Option<String>),
    Failed(AuthFailure),
}

/// Submit the credential form in whatever mode it is in.
pub async fn submit_auth_form<S, A, T>(slot: &S, store: &SessionStore<A, T>) -> SubmitOutcome
where
    S: FormSlot<AuthForm>,
    A: AuthApi,
    T: TokenStore,
{
    let Some(begun) = slot.with_form(AuthForm::begin_submit) else {
        return SubmitOutcome::Discarded;
    };
    let (ticket, submission) = match begun {
        Ok(begun) => begun,
        Err(blocked) => return SubmitOutcome::Blocked(blocked),
    };

    let settled = match submission {
        Submission::Login(request) => match store.login(&request).await {
            Ok(()) => Settled::SignedIn,
            Err(failure) => Settled::Failed(failure),
        },
        Submission::Signup(request) => {
            if email_taken(store.api(), &request.email).await {
                Settled::EmailTaken
            } else {
                match store.signup(&request).await {
                    Ok(()) => Settled::SignedIn,
                    Err(failure) => Settled::Failed(failure),
                }
            }
        }
        Submission::Forgot { email } => match store.api().forgot_password(&email).await {
            Ok(message) => Settled::ResetLinkSent(message),
            Err(err) => {
                log::warn!("auth form: forgot-password failed: {err}");
                Settled::Failed(AuthFailure::from_api(&err, RESET_LINK_FAILED))
            }
        },
    };

    let alive = slot.with_form(|form| {
        if !form.finish_submit(ticket) {
            return;
        }
        match &settled {
            Settled::EmailTaken => form.reject_field(Field::Email, EMAIL_TAKEN),
            Settled::ResetLinkSent(_) => form.reset_to_login(),
            Settled::SignedIn | Settled::Failed(_) => {}
        }
    });
    if alive.is_none() {
        log::debug!("auth form: gone before response arrived; discarding");
        return SubmitOutcome::Discarded;
    }

    let notifier = store.notifier();
    match settled {
        Settled::SignedIn => SubmitOutcome::Succeeded,
        Settled::EmailTaken => SubmitOutcome::EmailTaken,
        Settled::ResetLinkSent(message) => {
            notifier.success(message.unwrap_or_else(|| RESET_LINK_SENT.to_owned()));
            SubmitOutcome::Succeeded
        }
        Settled::Failed(failure) => {
            notifier.error(failure.message.clone());
            SubmitOutcome::Failed(failure)
        }
    }
}

/// Submit the reset-password form. On success the caller navigates away.
pub async fn submit_reset_password<S, A, T>(slot: &S, store: &SessionStore<A, T>) -> SubmitOutcome
where
    S: FormSlot<ResetPasswordForm>,
    A: AuthApi,
    T: TokenStore,
{
    let Some(begun) = slot.with_form(ResetPasswordForm::begin_submit) else {
        return SubmitOutcome::Discarded;
    };
    let (ticket, request) = match begun {
        Ok(begun) => begun,
        Err(blocked) => return SubmitOutcome::Blocked(blocked),
    };

    let result = store.api().reset_password(&request).await;

    let alive = slot.with_form(|form| {
        if form.finish_submit(ticket) && result.is_ok() {
            form.clear_passwords();
        }
    });
    if alive.is_none() {
        log::debug!("reset form: gone before response arrived; discarding");
        return SubmitOutcome::Discarded;
    }

    let notifier = store.notifier();
    match result {
        Ok(message) => {
            notifier.success(message.unwrap_or_else(|| PASSWORD_RESET_DONE.to_owned()));
            SubmitOutcome::Succeeded
        }
        Err(err) => {
            log::warn!("reset form: reset-password failed: {err}");
            let failure = AuthFailure::from_api(&err, PASSWORD_RESET_FAILED);
            notifier.error(failure.message.clone());
            SubmitOutcome::Failed(failure)
        }
    }
}

/// Best-effort pre-check: only a definite `exists: true` blocks signup.
async fn email_taken<A: AuthApi>(api: &A, email: &str) -> bool {
    match api.check_email(email).await {
        Ok(exists) => exists,
        Err(err) if err.is_not_found() => false,
        Err(err) => {
            log::warn!("auth form: email pre-check failed, continuing with signup: {err}");
            false
        }
    }
}
