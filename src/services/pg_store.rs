//! Postgres-backed account store.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use super::account::{Account, NewAccount, SessionUser};
use super::store::{AccountStore, StoreError};

pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(row: &PgRow) -> Account {
    Account {
        id: row.get("id"),
        email: row.get("email"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query(
            r"SELECT id, email, username, password_hash
              FROM accounts
              WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(account_from_row))
    }

    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let result = sqlx::query(
            r"INSERT INTO accounts (id, email, username, password_hash)
              VALUES ($1, $2, $3, $4)
              RETURNING id, email, username, password_hash",
        )
        .bind(Uuid::new_v4())
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(account_from_row(&row)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(StoreError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_session(
        &self,
        token_hash: &str,
        account_id: Uuid,
        expires_at: OffsetDateTime,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?;
        sqlx::query("INSERT INTO sessions (token_hash, account_id, expires_at) VALUES ($1, $2, $3)")
            .bind(token_hash)
            .bind(account_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn session_user(&self, token_hash: &str) -> Result<Option<SessionUser>, StoreError> {
        let row = sqlx::query(
            r"SELECT a.id, a.email, a.username
              FROM sessions s
              JOIN accounts a ON a.id = s.account_id
              WHERE s.token_hash = $1 AND s.expires_at > now()",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| SessionUser { id: r.get("id"), email: r.get("email"), username: r.get("username") }))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
