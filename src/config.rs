//! Client configuration resolved once at startup.
//!
//! Each key is looked up in the process environment first and then in the
//! value captured when the crate was built. A WASM build has no process
//! environment, so there only the build-time value (or the default) applies.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_EMAIL_DOMAINS: &str = "gmail.com,hotmail.com";
pub const DEFAULT_DIAL_CODE: &str = "+92";
pub const DEFAULT_TOAST_MS: u64 = 3000;

const API_URL_KEY: &str = "STOREFRONT_API_URL";
const EMAIL_DOMAINS_KEY: &str = "STOREFRONT_EMAIL_DOMAINS";
const DIAL_CODE_KEY: &str = "STOREFRONT_DIAL_CODE";
const TOAST_MS_KEY: &str = "STOREFRONT_TOAST_MS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("STOREFRONT_API_URL must start with http:// or https://, got '{0}'")]
    InvalidApiUrl(String),
    #[error("STOREFRONT_EMAIL_DOMAINS must name at least one domain")]
    NoEmailDomains,
    #[error("STOREFRONT_DIAL_CODE must be '+' followed by 1-4 digits, got '{0}'")]
    InvalidDialCode(String),
    #[error("STOREFRONT_TOAST_MS must be a positive integer, got '{0}'")]
    InvalidToastDuration(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST base URL without a trailing slash.
    pub api_base_url: String,
    /// Lowercased email domains accepted by the credential form.
    pub email_domains: Vec<String>,
    /// Dial-code prefix pre-filled into the WhatsApp field.
    pub dial_code: String,
    /// How long a notification stays up before it dismisses itself.
    pub toast_duration_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            email_domains: parse_domains(DEFAULT_EMAIL_DOMAINS),
            dial_code: DEFAULT_DIAL_CODE.to_owned(),
            toast_duration_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from the environment.
    ///
    /// Optional:
    /// - `STOREFRONT_API_URL`: default `http://localhost:5000/api`
    /// - `STOREFRONT_EMAIL_DOMAINS`: comma-separated, default `gmail.com,hotmail.com`
    /// - `STOREFRONT_DIAL_CODE`: default `+92`
    /// - `STOREFRONT_TOAST_MS`: default 3000
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first key with an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| build_time(key).map(str::to_owned)))
    }

    /// Build typed client config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first key with an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = parse_api_url(lookup(API_URL_KEY).as_deref().unwrap_or(DEFAULT_API_URL))?;

        let email_domains = parse_domains(lookup(EMAIL_DOMAINS_KEY).as_deref().unwrap_or(DEFAULT_EMAIL_DOMAINS));
        if email_domains.is_empty() {
            return Err(ConfigError::NoEmailDomains);
        }

        let dial_code = parse_dial_code(lookup(DIAL_CODE_KEY).as_deref().unwrap_or(DEFAULT_DIAL_CODE))?;

        let toast_duration_ms = match lookup(TOAST_MS_KEY) {
            None => DEFAULT_TOAST_MS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => return Err(ConfigError::InvalidToastDuration(raw)),
            },
        };

        Ok(Self { api_base_url, email_domains, dial_code, toast_duration_ms })
    }
}

fn build_time(key: &str) -> Option<&'static str> {
    match key {
        API_URL_KEY => option_env!("STOREFRONT_API_URL"),
        EMAIL_DOMAINS_KEY => option_env!("STOREFRONT_EMAIL_DOMAINS"),
        DIAL_CODE_KEY => option_env!("STOREFRONT_DIAL_CODE"),
        TOAST_MS_KEY => option_env!("STOREFRONT_TOAST_MS"),
        _ => None,
    }
}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidApiUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().trim_start_matches('@').to_ascii_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}

fn parse_dial_code(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or_default();
    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidDialCode(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}
