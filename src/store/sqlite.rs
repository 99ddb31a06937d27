//! SQLite backend via sqlx
//!
//! One `accounts` table with the observed relational column names. The table
//! is created if absent and seeded with one admin row iff it is empty.

use super::AccountStore;
use crate::account::Account;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info};

/// SQLite-backed account store
#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a store over an existing pool
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to the given sqlite URL (`mode=rwc` creates the file)
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(url).await?;
        Ok(Self::new(pool))
    }

    /// In-memory database (for tests). One connection, so every query sees
    /// the same database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self::new(pool))
    }

    /// Underlying pool; tests insert fixture rows directly
    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Account {
        Account {
            username: row.get("username"),
            password_digest: row.get("passwordHash"),
            display_name: row.get("displayName"),
            is_admin: row.get("admin"),
        }
    }
}

#[async_trait]
impl AccountStore for SqliteStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                passwordHash TEXT NOT NULL,
                displayName TEXT NOT NULL,
                admin BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        if count > 0 {
            debug!(count, "Accounts table already seeded");
            return Ok(());
        }

        let seed = Account::seed_admin();
        sqlx::query(
            r#"
            INSERT INTO accounts (username, passwordHash, displayName, admin)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&seed.username)
        .bind(&seed.password_digest)
        .bind(&seed.display_name)
        .bind(seed.is_admin)
        .execute(&self.pool)
        .await?;

        info!("Accounts table empty, seeded default admin");
        Ok(())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            r#"
            SELECT username, passwordHash, displayName, admin
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_account).collect())
    }

    async fn find_by_username(&self, name: &str) -> Result<Option<Account>> {
        // lowest id wins if the uniqueness invariant is ever violated
        let row = sqlx::query(
            r#"
            SELECT username, passwordHash, displayName, admin
            FROM accounts
            WHERE LOWER(username) = LOWER(?)
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_account))
    }
}
