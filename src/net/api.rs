//! REST client for the `/auth/*` endpoints.
//!
//! Browser (csr): real HTTP calls via `gloo-net`.
//! Host builds: every call fails with [`ApiError::Transport`], so session
//! logic can be exercised against mock [`AuthApi`] implementations.
//!
//! ERROR HANDLING
//! ==============
//! Calls return `Result<_, ApiError>` instead of panicking. Non-2xx bodies are
//! parsed for their `{message}` so callers can show the server's wording.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    AuthResponse, CheckEmailResponse, LoginRequest, MessageBody, ResetPasswordRequest, SignupRequest, User,
    VerifyResponse,
};

pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGNUP_PATH: &str = "/auth/signup";
pub const VERIFY_PATH: &str = "/auth/verify";
pub const CHECK_EMAIL_PATH: &str = "/auth/check-email";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

/// Failure of a single REST call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),
    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 404, .. })
    }

    /// The server-supplied `message`, when the server sent a non-empty one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message: Some(message), .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// The auth endpoints the session store and credential forms depend on.
///
/// Futures are `?Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `GET /auth/verify` with `token` as bearer credential.
    async fn verify(&self, token: &str) -> Result<User, ApiError>;
    /// `POST /auth/login`.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;
    /// `POST /auth/signup`.
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError>;
    /// `POST /auth/check-email`; `Ok(true)` when the address is already registered.
    async fn check_email(&self, email: &str) -> Result<bool, ApiError>;
    /// `POST /auth/forgot-password`; returns the server's confirmation message, if any.
    async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError>;
    /// `POST /auth/reset-password`; returns the server's confirmation message, if any.
    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Option<String>, ApiError>;
}

/// [`AuthApi`] over HTTP against the configured base URL.
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    base_url: String,
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, bearer: &str) -> Result<T, ApiError> {
        let url = endpoint(&self.base_url, path);
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::get(&url)
                .header("Authorization", &bearer_header(bearer))
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            decode(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, bearer);
            Err(unavailable())
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = endpoint(&self.base_url, path);
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&url)
                .json(body)
                .map_err(|e| ApiError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            decode(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, body);
            Err(unavailable())
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn verify(&self, token: &str) -> Result<User, ApiError> {
        let resp: VerifyResponse = self.get(VERIFY_PATH, token).await?;
        Ok(resp.user)
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post(LOGIN_PATH, request).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.post(SIGNUP_PATH, request).await
    }

    async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        let payload = serde_json::json!({ "email": email });
        let resp: CheckEmailResponse = self.post(CHECK_EMAIL_PATH, &payload).await?;
        Ok(resp.exists)
    }

    async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError> {
        let payload = serde_json::json!({ "email": email });
        let resp: MessageBody = self.post(FORGOT_PASSWORD_PATH, &payload).await?;
        Ok(resp.message)
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Option<String>, ApiError> {
        let resp: MessageBody = self.post(RESET_PASSWORD_PATH, request).await?;
        Ok(resp.message)
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(any(test, feature = "csr"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Map a non-2xx status and raw body to [`ApiError::Rejected`].
#[cfg(any(test, feature = "csr"))]
fn rejection(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());
    ApiError::Rejected { status, message }
}

#[cfg(feature = "csr")]
async fn decode<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(rejection(status, &body));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> ApiError {
    ApiError::Transport("not available outside the browser".to_owned())
}
