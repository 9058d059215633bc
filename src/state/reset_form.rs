//! Reset-password form state for the page emailed reset links open.

#[cfg(test)]
#[path = "reset_form_test.rs"]
mod reset_form_test;

use std::collections::BTreeMap;

use crate::net::types::ResetPasswordRequest;
use crate::state::form_slot::{Blocked, SubmitTicket};
use crate::util::validation::{self, CONFIRM_MISMATCH};

pub const TOKEN_MISSING: &str = "This reset link is missing its token. Request a new one.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResetField {
    Token,
    NewPassword,
    ConfirmPassword,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    token: Option<String>,
    new_password: String,
    confirm_password: String,
    errors: BTreeMap<ResetField, String>,
    submitting: bool,
    generation: u64,
}

impl ResetPasswordForm {
    /// Form for the token carried by the reset link, if the link had one.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        let token = token.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty());
        let mut form = Self { token, ..Self::default() };
        if form.token.is_none() {
            form.errors.insert(ResetField::Token, TOKEN_MISSING.to_owned());
        }
        form
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn value(&self, field: ResetField) -> &str {
        match field {
            ResetField::Token => self.token.as_deref().unwrap_or_default(),
            ResetField::NewPassword => &self.new_password,
            ResetField::ConfirmPassword => &self.confirm_password,
        }
    }

    #[must_use]
    pub fn error(&self, field: ResetField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.new_password = value.into();
        self.drop_fixed_errors();
    }

    pub fn set_confirmation(&mut self, value: impl Into<String>) {
        self.confirm_password = value.into();
        self.drop_fixed_errors();
    }

    /// # Errors
    ///
    /// Returns the inline message when `field` does not pass.
    pub fn check(&self, field: ResetField) -> Result<(), String> {
        match field {
            ResetField::Token => match self.token {
                Some(_) => Ok(()),
                None => Err(TOKEN_MISSING.to_owned()),
            },
            ResetField::NewPassword => validation::password(&self.new_password),
            ResetField::ConfirmPassword => {
                if self.confirm_password == self.new_password {
                    Ok(())
                } else {
                    Err(CONFIRM_MISMATCH.to_owned())
                }
            }
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting && Self::FIELDS.iter().all(|f| self.check(*f).is_ok())
    }

    /// # Errors
    ///
    /// [`Blocked::Busy`] while a request is outstanding; [`Blocked::Invalid`]
    /// after filling inline errors.
    pub fn begin_submit(&mut self) -> Result<(SubmitTicket, ResetPasswordRequest), Blocked> {
        if self.submitting {
            return Err(Blocked::Busy);
        }
        self.errors = Self::FIELDS
            .iter()
            .filter_map(|f| self.check(*f).err().map(|msg| (*f, msg)))
            .collect();
        let Some(token) = self.token.clone().filter(|_| self.errors.is_empty()) else {
            return Err(Blocked::Invalid);
        };
        self.generation += 1;
        self.submitting = true;
        let request = ResetPasswordRequest { token, new_password: self.new_password.clone() };
        Ok((SubmitTicket(self.generation), request))
    }

    pub fn finish_submit(&mut self, ticket: SubmitTicket) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.submitting = false;
        true
    }

    /// Clear both password fields after the server accepted the reset.
    pub fn clear_passwords(&mut self) {
        self.new_password.clear();
        self.confirm_password.clear();
    }

    const FIELDS: [ResetField; 3] = [ResetField::Token, ResetField::NewPassword, ResetField::ConfirmPassword];

    fn drop_fixed_errors(&mut self) {
        let fixed: Vec<ResetField> = self
            .errors
            .keys()
            .copied()
            .filter(|f| self.check(*f).is_ok())
            .collect();
        for field in fixed {
            self.errors.remove(&field);
        }
    }
}
