//! In-memory account store.
//!
//! Backs the gateway when no `DATABASE_URL` is configured and drives the
//! test suite. Email uniqueness is checked and enforced under one write lock.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::account::{Account, NewAccount, SessionUser};
use super::store::{AccountStore, StoreError};

struct StoredSession {
    account_id: Uuid,
    expires_at: OffsetDateTime,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<Uuid, Account>,
    /// Normalized email -> account id.
    by_email: HashMap<String, Uuid>,
    /// Token hash -> session.
    sessions: HashMap<String, StoredSession>,
}

#[derive(Default)]
pub struct MemoryAccountStore {
    inner: RwLock<Inner>,
}

impl MemoryAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn account_count(&self) -> usize {
        self.inner.read().await.accounts.len()
    }

    #[cfg(test)]
    pub async fn session_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_email
            .get(email)
            .and_then(|id| inner.accounts.get(id))
            .cloned())
    }

    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.by_email.contains_key(&account.email) {
            return Err(StoreError::EmailTaken);
        }

        let record = Account {
            id: Uuid::new_v4(),
            email: account.email,
            username: account.username,
            password_hash: account.password_hash,
        };
        inner.by_email.insert(record.email.clone(), record.id);
        inner.accounts.insert(record.id, record.clone());
        Ok(record)
    }

    async fn create_session(
        &self,
        token_hash: &str,
        account_id: Uuid,
        expires_at: OffsetDateTime,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let now = OffsetDateTime::now_utc();
        inner.sessions.retain(|_, s| s.expires_at > now);
        inner
            .sessions
            .insert(token_hash.to_owned(), StoredSession { account_id, expires_at });
        Ok(())
    }

    async fn session_user(&self, token_hash: &str) -> Result<Option<SessionUser>, StoreError> {
        let inner = self.inner.read().await;
        let now = OffsetDateTime::now_utc();
        Ok(inner
            .sessions
            .get(token_hash)
            .filter(|s| s.expires_at > now)
            .and_then(|s| inner.accounts.get(&s.account_id))
            .map(SessionUser::from))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), StoreError> {
        self.inner.write().await.sessions.remove(token_hash);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_store_test.rs"]
mod tests;
