//! Account store seam.
//!
//! ARCHITECTURE
//! ============
//! Route handlers and services only see `dyn AccountStore`. Production wires
//! [`super::pg_store::PgAccountStore`]; development without `DATABASE_URL`
//! and the test suite use [`super::memory_store::MemoryAccountStore`].
//!
//! Sessions live here too. Stores only ever see the SHA-256 hash of a
//! session token, never the cookie value itself.

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::account::{Account, NewAccount, SessionUser};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another account already owns this email. Raised by the uniqueness
    /// constraint, so it also covers concurrent registrations.
    #[error("email already in use")]
    EmailTaken,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by its normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Persist a new account. Fails with [`StoreError::EmailTaken`] if the
    /// email is already registered.
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Record a new session. Sessions already past their expiry are pruned
    /// on the way.
    async fn create_session(
        &self,
        token_hash: &str,
        account_id: Uuid,
        expires_at: OffsetDateTime,
    ) -> Result<(), StoreError>;

    /// Resolve a live (unexpired) session to its account.
    async fn session_user(&self, token_hash: &str) -> Result<Option<SessionUser>, StoreError>;

    /// Delete a session. Deleting an unknown session is not an error.
    async fn delete_session(&self, token_hash: &str) -> Result<(), StoreError>;
}
