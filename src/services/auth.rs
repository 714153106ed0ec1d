//! Local credential strategy and session lifecycle.
//!
//! The gateway routes never compare passwords themselves. They call
//! [`login`], which either opens a session or reports a user-facing failure
//! message, and [`logout`] / [`current_user`] for the rest of the lifecycle.

use super::account::{Account, SessionUser, normalize_email};
use super::password::{self, PasswordError};
use super::session;
use super::store::{AccountStore, StoreError};

pub const MISSING_CREDENTIALS: &str = "Missing credentials";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Password(#[from] PasswordError),
}

#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials matched; `token` is the raw cookie value for the new session.
    Success { user: SessionUser, token: String },
    /// Credentials were missing or wrong. Carries the flash message to show.
    Failure(&'static str),
}

/// Look up an account by email and check its password.
///
/// Returns `Ok(None)` for an unknown email or a wrong password.
///
/// # Errors
///
/// Store or hashing failures.
pub async fn verify_credentials(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
) -> Result<Option<Account>, AuthError> {
    let Some(account) = store.find_by_email(&normalize_email(email)).await? else {
        return Ok(None);
    };

    let matches = password::verify_password(password.to_owned(), account.password_hash.clone()).await?;
    Ok(matches.then_some(account))
}

/// Check credentials and, on success, open a session that expires after `ttl`.
///
/// # Errors
///
/// Store or hashing failures. Bad credentials are a [`LoginOutcome::Failure`].
pub async fn login(
    store: &dyn AccountStore,
    ttl: time::Duration,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Ok(LoginOutcome::Failure(MISSING_CREDENTIALS));
    }

    let Some(account) = verify_credentials(store, email, password).await? else {
        tracing::info!("login rejected");
        return Ok(LoginOutcome::Failure(INVALID_CREDENTIALS));
    };

    let token = session::generate_token();
    store
        .create_session(&session::hash_token(&token), account.id, session::expires_at(ttl))
        .await?;

    Ok(LoginOutcome::Success { user: SessionUser::from(&account), token })
}

/// End the session identified by the raw cookie token.
///
/// # Errors
///
/// Store failures.
pub async fn logout(store: &dyn AccountStore, token: &str) -> Result<(), StoreError> {
    store.delete_session(&session::hash_token(token)).await
}

/// Resolve the raw cookie token to the logged-in user, if the session is live.
///
/// # Errors
///
/// Store failures.
pub async fn current_user(store: &dyn AccountStore, token: &str) -> Result<Option<SessionUser>, StoreError> {
    store.session_user(&session::hash_token(token)).await
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
