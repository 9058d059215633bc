//! Observable auth snapshot for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store publishes one of these after every change. Components
//! read it through a `RwSignal<AuthState>` context to decide gating and
//! identity-dependent rendering; none of them can write the session back.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;
use crate::state::gate::GateState;
use crate::state::session::Session;

/// Who is signed in, and whether the startup check is still running.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    /// Matches a freshly created session: verification has not settled.
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl From<&Session> for AuthState {
    fn from(session: &Session) -> Self {
        Self { user: session.user().cloned(), loading: session.is_loading() }
    }
}

impl AuthState {
    #[must_use]
    pub fn gate(&self) -> GateState {
        GateState::of(self.loading, self.user.is_some())
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}
