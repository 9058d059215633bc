//! Field rules for the credential and reset-password forms.
//!
//! Each check returns the inline message to show beside the field. The same
//! checks gate the submit button while typing and run again on submit.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::config::ClientConfig;

/// Symbols of which a password needs at least one.
pub const PASSWORD_SYMBOLS: &str = "@$!%*#?&";
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_USERNAME_LEN: usize = 5;
/// Digits a WhatsApp number needs beyond its dial code.
pub const WHATSAPP_SUBSCRIBER_DIGITS: usize = 10;

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const USERNAME_INVALID: &str =
    "Username must start with a letter and have at least 5 letters, digits or underscores";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_WEAK: &str =
    "Password must be at least 8 characters with an uppercase letter, a digit and one of @$!%*#?&";
pub const WHATSAPP_REQUIRED: &str = "WhatsApp number is required";
pub const WHATSAPP_INVALID: &str = "WhatsApp number must have at least 10 digits after the country code";
pub const CONFIRM_MISMATCH: &str = "Passwords do not match";

/// Rules that depend on configuration: the email allow-list and dial code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validator {
    email_domains: Vec<String>,
    dial_code: String,
}

impl Default for Validator {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl Validator {
    #[must_use]
    pub fn new(email_domains: Vec<String>, dial_code: impl Into<String>) -> Self {
        let email_domains = email_domains.into_iter().map(|d| d.to_ascii_lowercase()).collect();
        Self { email_domains, dial_code: dial_code.into() }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.email_domains.clone(), config.dial_code.clone())
    }

    #[must_use]
    pub fn dial_code(&self) -> &str {
        &self.dial_code
    }

    /// `local@domain` with `domain` on the allow-list (case-insensitive).
    /// Anything else that is not blank, malformed addresses included, gets
    /// the allow-list message.
    ///
    /// # Errors
    ///
    /// Returns [`EMAIL_REQUIRED`] for a blank value, otherwise the allow-list
    /// message naming the accepted domains.
    pub fn email(&self, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(EMAIL_REQUIRED.to_owned());
        }
        if self.is_allowed_address(value) {
            Ok(())
        } else {
            Err(self.domain_message())
        }
    }

    fn is_allowed_address(&self, value: &str) -> bool {
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        let local_ok = !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
        let domain = domain.to_ascii_lowercase();
        local_ok && self.email_domains.iter().any(|allowed| *allowed == domain)
    }

    /// Not blank, not just the dial code, and at least ten digits past it.
    ///
    /// # Errors
    ///
    /// Returns the inline message for a missing or too-short number.
    pub fn whatsapp(&self, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() || value == self.dial_code {
            return Err(WHATSAPP_REQUIRED.to_owned());
        }
        let prefix_digits = digit_count(&self.dial_code);
        if digit_count(value) < prefix_digits + WHATSAPP_SUBSCRIBER_DIGITS {
            return Err(WHATSAPP_INVALID.to_owned());
        }
        Ok(())
    }

    fn domain_message(&self) -> String {
        let domains = self
            .email_domains
            .iter()
            .map(|d| format!("@{d}"))
            .collect::<Vec<_>>()
            .join(" or ");
        format!("Only {domains} addresses are accepted")
    }
}

/// A letter followed by at least four letters, digits or underscores.
///
/// # Errors
///
/// Returns the inline message for a missing or malformed username.
pub fn username(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(USERNAME_REQUIRED.to_owned());
    }
    let mut chars = value.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !starts_with_letter || !rest_ok || value.chars().count() < MIN_USERNAME_LEN {
        return Err(USERNAME_INVALID.to_owned());
    }
    Ok(())
}

/// At least 8 characters including an uppercase letter, a digit and a symbol
/// from [`PASSWORD_SYMBOLS`].
///
/// # Errors
///
/// Returns the inline message for a missing or weak password.
pub fn password(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(PASSWORD_REQUIRED.to_owned());
    }
    let long_enough = value.chars().count() >= MIN_PASSWORD_LEN;
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_symbol = value.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
    if !(long_enough && has_upper && has_digit && has_symbol) {
        return Err(PASSWORD_WEAK.to_owned());
    }
    Ok(())
}

/// Presence-only email check used by the forgot-password form.
///
/// # Errors
///
/// Returns [`EMAIL_REQUIRED`] for a blank value.
pub fn email_present(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(EMAIL_REQUIRED.to_owned());
    }
    Ok(())
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}
