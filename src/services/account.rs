//! Account records as the gateway sees them.

use uuid::Uuid;

/// A persisted account. `password_hash` is a bcrypt digest, never plaintext.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    /// Normalized (trimmed, lowercase) email. Unique across accounts.
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Insert payload for a new account. Built only from a validated
/// registration, after hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// The identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

impl From<&Account> for SessionUser {
    fn from(account: &Account) -> Self {
        Self { id: account.id, email: account.email.clone(), username: account.username.clone() }
    }
}

/// Canonical form used for lookups and storage so uniqueness is
/// case-insensitive.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
