//! Credential form state for the gate modal: login, signup and forgot-password.
//!
//! DESIGN
//! ======
//! Pure state, no I/O. The submit flow in `auth_flow` drives it through
//! `begin_submit` / `finish_submit`; the modal renders it. Typed values are
//! kept across mode switches; errors and submission state are not.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use std::collections::BTreeMap;

use crate::net::types::{LoginRequest, Role, SignupRequest};
use crate::state::form_slot::{Blocked, SubmitTicket};
use crate::util::validation::{self, Validator};

pub const EMAIL_TAKEN: &str = "This email is already registered";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
    Forgot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Username,
    Email,
    Password,
    WhatsappNumber,
}

/// The request a validated form turns into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Login(LoginRequest),
    Signup(SignupRequest),
    Forgot { email: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthForm {
    mode: AuthMode,
    username: String,
    email: String,
    password: String,
    whatsapp_number: String,
    role: Role,
    errors: BTreeMap<Field, String>,
    submitting: bool,
    generation: u64,
    rules: Validator,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new(Validator::default())
    }
}

impl AuthForm {
    #[must_use]
    pub fn new(rules: Validator) -> Self {
        Self {
            mode: AuthMode::Login,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            whatsapp_number: rules.dial_code().to_owned(),
            role: Role::Buyer,
            errors: BTreeMap::new(),
            submitting: false,
            generation: 0,
            rules,
        }
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::WhatsappNumber => &self.whatsapp_number,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Fields the current mode submits.
    #[must_use]
    pub fn fields(&self) -> &'static [Field] {
        match self.mode {
            AuthMode::Login => &[Field::Email, Field::Password],
            AuthMode::Signup => &[Field::Username, Field::Email, Field::Password, Field::WhatsappNumber],
            AuthMode::Forgot => &[Field::Email],
        }
    }

    /// Store a typed value. An inline error on the field is dropped as soon
    /// as the value passes; new errors only appear on submit.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Username => self.username = value,
            Field::Email => self.email = value,
            Field::Password => self.password = value,
            Field::WhatsappNumber => self.whatsapp_number = value,
        }
        if self.errors.contains_key(&field) && self.check(field).is_ok() {
            self.errors.remove(&field);
        }
    }

    /// Login ⇄ signup.
    pub fn toggle_signup(&mut self) -> bool {
        match self.mode {
            AuthMode::Login => self.switch(AuthMode::Signup),
            AuthMode::Signup => self.switch(AuthMode::Login),
            AuthMode::Forgot => return false,
        }
        true
    }

    /// Login → forgot-password.
    pub fn show_forgot(&mut self) -> bool {
        if self.mode != AuthMode::Login {
            return false;
        }
        self.switch(AuthMode::Forgot);
        true
    }

    /// Forgot-password → login.
    pub fn back_to_login(&mut self) -> bool {
        if self.mode != AuthMode::Forgot {
            return false;
        }
        self.switch(AuthMode::Login);
        true
    }

    /// Return to login with every field cleared, after a reset link went out.
    pub fn reset_to_login(&mut self) {
        self.username.clear();
        self.email.clear();
        self.password.clear();
        self.whatsapp_number = self.rules.dial_code().to_owned();
        self.role = Role::Buyer;
        self.switch(AuthMode::Login);
    }

    /// Rule for `field` in the current mode.
    ///
    /// # Errors
    ///
    /// Returns the inline message when the value does not pass.
    pub fn check(&self, field: Field) -> Result<(), String> {
        match (self.mode, field) {
            (AuthMode::Forgot, Field::Email) => validation::email_present(&self.email),
            (_, Field::Email) => self.rules.email(&self.email),
            (_, Field::Username) => validation::username(&self.username),
            (_, Field::Password) => validation::password(&self.password),
            (_, Field::WhatsappNumber) => self.rules.whatsapp(&self.whatsapp_number),
        }
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.fields().iter().all(|f| self.check(*f).is_ok())
    }

    /// Validate authoritatively and mark the form as submitting.
    ///
    /// # Errors
    ///
    /// [`Blocked::Busy`] while a request is outstanding; [`Blocked::Invalid`]
    /// after filling inline errors for every failing field.
    pub fn begin_submit(&mut self) -> Result<(SubmitTicket, Submission), Blocked> {
        if self.submitting {
            return Err(Blocked::Busy);
        }
        self.errors = self
            .fields()
            .iter()
            .filter_map(|f| self.check(*f).err().map(|msg| (*f, msg)))
            .collect();
        if !self.errors.is_empty() {
            return Err(Blocked::Invalid);
        }

        let email = self.email.trim().to_owned();
        let submission = match self.mode {
            AuthMode::Login => Submission::Login(LoginRequest { email, password: self.password.clone() }),
            AuthMode::Signup => Submission::Signup(SignupRequest {
                username: self.username.trim().to_owned(),
                email,
                password: self.password.clone(),
                whatsapp_number: self.whatsapp_number.trim().to_owned(),
                role: self.role,
            }),
            AuthMode::Forgot => Submission::Forgot { email },
        };
        self.generation += 1;
        self.submitting = true;
        Ok((SubmitTicket(self.generation), submission))
    }

    /// Settle `ticket`. Returns false, changing nothing, when the ticket was
    /// retired by a mode switch in the meantime.
    pub fn finish_submit(&mut self, ticket: SubmitTicket) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.submitting = false;
        true
    }

    /// Attach a server-derived error to a field.
    pub fn reject_field(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    fn switch(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.errors.clear();
        self.submitting = false;
        self.generation += 1;
    }
}
