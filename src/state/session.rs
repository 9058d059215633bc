//! Session store: the single owner of "who is signed in".
//!
//! SYSTEM CONTEXT
//! ==============
//! Created once per app instance and shared through context. Only its four
//! operations (`initialize`, `login`, `signup`, `logout`) mutate the session
//! or the persisted token; everything else observes snapshots via
//! [`SessionStore::subscribe`].
//!
//! CONCURRENCY
//! ===========
//! Runs on the browser's single thread. The token write and the session update
//! it pairs with happen with no `.await` between them, so observers never see
//! one without the other. The store does not serialize overlapping
//! `login`/`signup` calls; forms prevent them with their `submitting` flag.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::net::api::{ApiError, AuthApi};
use crate::net::types::{AuthResponse, LoginRequest, SignupRequest, User};
use crate::state::auth::AuthState;
use crate::state::notify::Notifier;
use crate::util::token_store::TokenStore;

/// Where successful login, signup and logout send the user.
pub const ROOT_PATH: &str = "/";

pub const AUTH_FAILED: &str = "Authentication failed";
pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const SIGNUP_SUCCESS: &str = "Welcome! Your account has been created.";
pub const LOGOUT_INFO: &str = "You have been logged out";

/// Session data. Fresh sessions are `loading` until `initialize` settles.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self { token: None, user: None, loading: true }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }
}

/// Whether a failed auth call was answered by the server or never completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Rejected,
    Network,
}

/// A failed login or signup, carrying the message to show the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl AuthFailure {
    /// Use the server's `message` when it sent one, else `fallback`.
    #[must_use]
    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        let kind = match err {
            ApiError::Rejected { .. } => FailureKind::Rejected,
            ApiError::Transport(_) | ApiError::Decode(_) => FailureKind::Network,
        };
        let message = err.server_message().unwrap_or(fallback).to_owned();
        Self { kind, message }
    }
}

type Listener = Rc<dyn Fn(&Session)>;

pub struct SessionStore<A, T> {
    api: A,
    tokens: T,
    notifier: Notifier,
    navigate: Rc<dyn Fn(&str)>,
    session: RefCell<Session>,
    initialized: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

impl<A: AuthApi, T: TokenStore> SessionStore<A, T> {
    pub fn new(api: A, tokens: T, notifier: Notifier, navigate: impl Fn(&str) + 'static) -> Self {
        Self {
            api,
            tokens,
            notifier,
            navigate: Rc::new(navigate),
            session: RefCell::new(Session::new()),
            initialized: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        AuthState::from(&*self.session.borrow())
    }

    /// Call `listener` with the new session after every change.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Verify the persisted token, if any. Runs at most once; later calls
    /// return immediately. Never fails: a rejected or unreachable verify
    /// leaves the user signed out and drops the stored token.
    pub async fn initialize(&self) {
        if self.initialized.replace(true) {
            log::debug!("session: initialize already ran");
            return;
        }

        let Some(token) = self.tokens.load() else {
            log::debug!("session: no stored token");
            self.commit(|s| s.loading = false);
            return;
        };

        match self.api.verify(&token).await {
            Ok(_) if self.tokens.load().as_deref() != Some(token.as_str()) => {
                log::debug!("session: verify settled after a newer sign-in; ignoring");
                self.commit(|s| s.loading = false);
            }
            Ok(user) => {
                log::debug!("session: token verified for user {}", user.id);
                self.commit(|s| {
                    s.token = Some(token);
                    s.user = Some(user);
                    s.loading = false;
                });
            }
            Err(err) => {
                log::warn!("session: stored token rejected: {err}");
                // A login that landed while verify was in flight owns the slot now.
                if self.tokens.load().as_deref() == Some(token.as_str()) {
                    self.tokens.clear();
                }
                self.commit(|s| s.loading = false);
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthFailure`] with the server's message, or
    /// [`AUTH_FAILED`] when there is none. Failure is not notified here.
    pub async fn login(&self, request: &LoginRequest) -> Result<(), AuthFailure> {
        let resp = self
            .api
            .login(request)
            .await
            .map_err(|err| Self::failure("login", &err))?;
        self.establish(resp);
        self.notifier.success(LOGIN_SUCCESS);
        (self.navigate)(ROOT_PATH);
        Ok(())
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// Same contract as [`SessionStore::login`].
    pub async fn signup(&self, request: &SignupRequest) -> Result<(), AuthFailure> {
        let resp = self
            .api
            .signup(request)
            .await
            .map_err(|err| Self::failure("signup", &err))?;
        self.establish(resp);
        self.notifier.success(SIGNUP_SUCCESS);
        (self.navigate)(ROOT_PATH);
        Ok(())
    }

    /// Drop the token and user. Local only, and safe when already signed out.
    pub fn logout(&self) {
        self.tokens.clear();
        self.commit(|s| {
            s.token = None;
            s.user = None;
            s.loading = false;
        });
        self.notifier.info(LOGOUT_INFO);
        (self.navigate)(ROOT_PATH);
    }

    fn establish(&self, resp: AuthResponse) {
        let AuthResponse { token, user } = resp;
        log::debug!("session: signed in as user {}", user.id);
        self.tokens.save(&token);
        self.commit(|s| {
            s.token = Some(token);
            s.user = Some(user);
            s.loading = false;
        });
    }

    fn failure(op: &str, err: &ApiError) -> AuthFailure {
        log::warn!("session: {op} failed: {err}");
        AuthFailure::from_api(err, AUTH_FAILED)
    }

    fn commit(&self, change: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut session = self.session.borrow_mut();
            change(&mut session);
            session.clone()
        };
        let listeners = self.listeners.borrow().clone();
        for listener in &listeners {
            listener(&snapshot);
        }
    }
}
