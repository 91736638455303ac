//! SQLite store
//!
//! Record storage and retrieval for the two resource collections. Schema is
//! created at startup; uniqueness conflicts and lookup misses are mapped to
//! the core error taxonomy here, at the persistence boundary. Connections
//! are checked out of the pool per operation and returned on every exit
//! path, including errors.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use pinboard_core::permissions::OwnershipLookup;
use pinboard_core::Error;

use crate::error::{ApiError, Result};

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn connect(db_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(db_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database only exists on the connection that opened
        // it, so the pool must not grow past one connection there.
        let max_connections = if db_url.contains(":memory:") { 1 } else { 8 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> anyhow::Result<()> {
        let queries = [
            r#"CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                registered_at TEXT NOT NULL
            );"#,
            r#"CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
                title TEXT NOT NULL UNIQUE,
                body TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );"#,
        ];

        for q in queries {
            sqlx::query(q).execute(&self.pool).await?;
        }

        Ok(())
    }

    // ── accounts ─────────────────────────────────────────────────────────

    pub async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AccountRow> {
        let registered_at = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"INSERT INTO accounts (username, password_hash, registered_at)
               VALUES (?1, ?2, ?3)"#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(registered_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or_db(e, "account"))?;

        self.get_account(result.last_insert_rowid()).await
    }

    pub async fn get_account(&self, id: i64) -> Result<AccountRow> {
        self.find_account(id).await?.ok_or_else(|| {
            Error::NotFound {
                what: "account",
                id,
            }
            .into()
        })
    }

    pub async fn find_account(&self, id: i64) -> Result<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"SELECT id, username, password_hash, registered_at
               FROM accounts WHERE id = ?1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_account_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"SELECT id, username, password_hash, registered_at
               FROM accounts WHERE username = ?1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_accounts(&self) -> Result<Vec<AccountRow>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"SELECT id, username, password_hash, registered_at
               FROM accounts ORDER BY id ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn update_account(
        &self,
        id: i64,
        username: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<AccountRow> {
        self.get_account(id).await?;

        sqlx::query(
            r#"UPDATE accounts
               SET username = COALESCE(?1, username),
                   password_hash = COALESCE(?2, password_hash)
               WHERE id = ?3"#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or_db(e, "account"))?;

        self.get_account(id).await
    }

    pub async fn delete_account(&self, id: i64) -> Result<()> {
        // Owned posts go with the account (ON DELETE CASCADE).
        let result = sqlx::query(r#"DELETE FROM accounts WHERE id = ?1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound {
                what: "account",
                id,
            }
            .into());
        }
        Ok(())
    }

    // ── posts ────────────────────────────────────────────────────────────

    pub async fn create_post(&self, account_id: i64, title: &str, body: &str) -> Result<PostRow> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"INSERT INTO posts (account_id, title, body, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?4)"#,
        )
        .bind(account_id)
        .bind(title)
        .bind(body)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or_db(e, "post"))?;

        self.get_post(result.last_insert_rowid()).await
    }

    pub async fn get_post(&self, id: i64) -> Result<PostRow> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"SELECT id, account_id, title, body, created_at, updated_at
               FROM posts WHERE id = ?1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| Error::NotFound { what: "post", id }.into())
    }

    pub async fn list_posts(&self) -> Result<Vec<PostRow>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"SELECT id, account_id, title, body, created_at, updated_at
               FROM posts ORDER BY id ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn update_post(
        &self,
        id: i64,
        title: Option<&str>,
        body: Option<&str>,
    ) -> Result<PostRow> {
        self.get_post(id).await?;

        sqlx::query(
            r#"UPDATE posts
               SET title = COALESCE(?1, title),
                   body = COALESCE(?2, body),
                   updated_at = ?3
               WHERE id = ?4"#,
        )
        .bind(title)
        .bind(body)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or_db(e, "post"))?;

        self.get_post(id).await
    }

    pub async fn delete_post(&self, id: i64) -> Result<()> {
        let result = sqlx::query(r#"DELETE FROM posts WHERE id = ?1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound { what: "post", id }.into());
        }
        Ok(())
    }
}

#[async_trait]
impl OwnershipLookup for Store {
    async fn post_owner(&self, post_id: i64) -> pinboard_core::Result<Option<i64>> {
        sqlx::query_scalar::<_, i64>(r#"SELECT account_id FROM posts WHERE id = ?1"#)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Internal {
                message: format!("ownership lookup failed: {e}"),
            })
    }
}

/// Map a uniqueness violation to the 409 taxonomy; anything else stays a
/// database error.
fn conflict_or_db(e: sqlx::Error, what: &'static str) -> ApiError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => Error::Conflict { what }.into(),
        _ => ApiError::Database(e),
    }
}

/// One `accounts` row. The password hash never serializes into responses.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub registered_at: String,
}

/// One `posts` row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub account_id: i64,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}
