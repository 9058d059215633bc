//! Client-side state for the session, the auth gate and notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the token and user and is the only writer of either.
//! Components observe it through `auth::AuthState` snapshots and report to
//! the user through `notify`. The form modules are plain data driven by the
//! submit flows in `auth_flow`, so the whole layer runs on the host in tests.

pub mod auth;
pub mod auth_flow;
pub mod auth_form;
pub mod form_slot;
pub mod gate;
pub mod notify;
pub mod reset_form;
pub mod session;

#[cfg(test)]
pub mod test_helpers;
