//! Scripted `AuthApi` and store builders shared by state tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::net::api::{ApiError, AuthApi};
use crate::net::types::{AuthResponse, LoginRequest, ResetPasswordRequest, Role, SignupRequest, User};
use crate::state::notify::Notifier;
use crate::state::session::SessionStore;
use crate::util::token_store::MemoryTokens;

pub type TestStore = SessionStore<MockApi, MemoryTokens>;

/// Mock API answering from per-endpoint queues and recording every call.
#[derive(Default)]
pub struct MockApi {
    verify: RefCell<VecDeque<Result<User, ApiError>>>,
    auth: RefCell<VecDeque<Result<AuthResponse, ApiError>>>,
    check_email: RefCell<VecDeque<Result<bool, ApiError>>>,
    message: RefCell<VecDeque<Result<Option<String>, ApiError>>>,
    hold: RefCell<Option<oneshot::Receiver<()>>>,
    calls: RefCell<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_verify(self, result: Result<User, ApiError>) -> Self {
        self.verify.borrow_mut().push_back(result);
        self
    }

    /// Queue a login or signup answer.
    pub fn on_auth(self, result: Result<AuthResponse, ApiError>) -> Self {
        self.auth.borrow_mut().push_back(result);
        self
    }

    pub fn on_check_email(self, result: Result<bool, ApiError>) -> Self {
        self.check_email.borrow_mut().push_back(result);
        self
    }

    /// Queue a forgot-password or reset-password answer.
    pub fn on_message(self, result: Result<Option<String>, ApiError>) -> Self {
        self.message.borrow_mut().push_back(result);
        self
    }

    /// Make the next call wait until the returned sender fires (or drops).
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.hold.borrow_mut() = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(endpoint)).count()
    }

    async fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
        let hold = self.hold.borrow_mut().take();
        if let Some(rx) = hold {
            let _ = rx.await;
        }
    }
}

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected { status, message: Some(message.to_owned()) }
}

#[async_trait(?Send)]
impl AuthApi for MockApi {
    async fn verify(&self, token: &str) -> Result<User, ApiError> {
        self.record(format!("verify {token}")).await;
        self.verify
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(rejected(401, "Token expired")))
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.record(format!("login {}", request.email)).await;
        self.auth
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(rejected(401, "Invalid credentials")))
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.record(format!("signup {}", request.email)).await;
        self.auth
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(rejected(409, "User already exists")))
    }

    async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        self.record(format!("check-email {email}")).await;
        self.check_email.borrow_mut().pop_front().unwrap_or(Ok(false))
    }

    async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError> {
        self.record(format!("forgot-password {email}")).await;
        self.message.borrow_mut().pop_front().unwrap_or(Ok(None))
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Option<String>, ApiError> {
        self.record(format!("reset-password {}", request.token)).await;
        self.message.borrow_mut().pop_front().unwrap_or(Ok(None))
    }
}

pub fn user(id: &str, username: &str) -> User {
    User {
        id: id.to_owned(),
        username: username.to_owned(),
        email: format!("{username}@gmail.com"),
        whatsapp_number: "+923001234567".to_owned(),
        role: Role::Buyer,
        seller_profile: None,
        supplier_profile: None,
    }
}

pub fn signed_in(token: &str, user: User) -> Result<AuthResponse, ApiError> {
    Ok(AuthResponse { token: token.to_owned(), user })
}

/// Store over `api` and `tokens`, with a log of every navigation it signals.
pub fn test_store(api: MockApi, tokens: MemoryTokens) -> (TestStore, Rc<RefCell<Vec<String>>>) {
    let navigations = Rc::new(RefCell::new(Vec::new()));
    let sink = navigations.clone();
    let store = SessionStore::new(api, tokens, Notifier::new(3000), move |path: &str| {
        sink.borrow_mut().push(path.to_owned());
    });
    (store, navigations)
}
