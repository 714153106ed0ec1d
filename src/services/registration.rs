//! Account registration: form validation, uniqueness, hashing, insert.
//!
//! Validation rules:
//! - `email`: syntactically valid address (checked after normalization)
//! - `username`: required, non-blank
//! - `password`: 3-30 ASCII letters or digits
//! - `confirmationPassword`: must equal `password` exactly
//!
//! Unknown form fields reject the whole submission. Nothing is written to the
//! store unless every rule passes.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::account::{Account, NewAccount, normalize_email};
use super::password::{self, PasswordError};
use super::store::{AccountStore, StoreError};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

static PASSWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{3,30}$").expect("password pattern compiles"));

/// Raw registration form body. Missing fields deserialize as empty strings
/// and then fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(rename = "confirmationPassword")]
    pub confirmation_password: String,
}

/// A registration that passed every rule. The confirmation field is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("email is not a valid address")]
    InvalidEmail,
    #[error("username is required")]
    MissingUsername,
    #[error("password must be 3-30 letters or digits")]
    InvalidPassword,
    #[error("password confirmation does not match")]
    ConfirmationMismatch,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("invalid registration: {0}")]
    Invalid(#[from] ValidationError),
    #[error("email already in use")]
    EmailInUse,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RegisterError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken => Self::EmailInUse,
            other => Self::Store(other),
        }
    }
}

impl RegisterForm {
    /// Check every rule, returning the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first rule that fails.
    pub fn validate(self) -> Result<ValidRegistration, ValidationError> {
        let email = normalize_email(&self.email);
        if !EMAIL_RE.is_match(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        let username = self.username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingUsername);
        }

        if !PASSWORD_RE.is_match(&self.password) {
            return Err(ValidationError::InvalidPassword);
        }

        if self.confirmation_password != self.password {
            return Err(ValidationError::ConfirmationMismatch);
        }

        Ok(ValidRegistration { email, username: username.to_owned(), password: self.password })
    }
}

/// Validate, check uniqueness, hash, and persist a new account.
///
/// The early lookup avoids hashing for an email that is already taken; the
/// store's own uniqueness check still decides concurrent races.
///
/// # Errors
///
/// [`RegisterError::Invalid`] and [`RegisterError::EmailInUse`] are
/// user-facing. The remaining variants are system failures.
pub async fn register(store: &dyn AccountStore, bcrypt_cost: u32, form: RegisterForm) -> Result<Account, RegisterError> {
    let valid = form.validate()?;

    if store.find_by_email(&valid.email).await?.is_some() {
        return Err(RegisterError::EmailInUse);
    }

    let password_hash = password::hash_password(valid.password, bcrypt_cost).await?;
    let account = store
        .insert_account(NewAccount { email: valid.email, username: valid.username, password_hash })
        .await?;

    tracing::info!(account_id = %account.id, "account registered");
    Ok(account)
}

#[cfg(test)]
#[path = "registration_test.rs"]
mod tests;
