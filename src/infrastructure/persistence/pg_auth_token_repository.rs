//! PostgreSQL implementation of the auth token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AuthToken, NewAuthToken, TokenStats};
use crate::domain::repositories::AuthTokenRepository;
use crate::error::AppError;

const TOKEN_COLUMNS: &str = "id, token_hash, telegram_id, telegram_username, \
    telegram_first_name, telegram_last_name, telegram_photo_url, created_at, expires_at, used";

#[derive(sqlx::FromRow)]
struct AuthTokenRow {
    id: i64,
    token_hash: String,
    telegram_id: String,
    telegram_username: Option<String>,
    telegram_first_name: Option<String>,
    telegram_last_name: Option<String>,
    telegram_photo_url: Option<String>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    used: bool,
}

impl From<AuthTokenRow> for AuthToken {
    fn from(row: AuthTokenRow) -> Self {
        Self {
            id: row.id,
            token_hash: row.token_hash,
            telegram_id: row.telegram_id,
            telegram_username: row.telegram_username,
            telegram_first_name: row.telegram_first_name,
            telegram_last_name: row.telegram_last_name,
            telegram_photo_url: row.telegram_photo_url,
            created_at: row.created_at,
            expires_at: row.expires_at,
            used: row.used,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total: i64,
    active: i64,
    used: i64,
    expired: i64,
}

/// PostgreSQL repository for single-use auth tokens.
///
/// Stores SHA-256 hashes only. Uniqueness of `token_hash` is enforced by the
/// `telegram_auth_tokens_token_hash_key` constraint.
pub struct PgAuthTokenRepository {
    pool: Arc<PgPool>,
}

impl PgAuthTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthTokenRepository for PgAuthTokenRepository {
    async fn insert(&self, token: NewAuthToken) -> Result<AuthToken, AppError> {
        let query = format!(
            r#"
            INSERT INTO telegram_auth_tokens
                (token_hash, telegram_id, telegram_username, telegram_first_name,
                 telegram_last_name, telegram_photo_url, created_at, expires_at, used)
            VALUES ($1, $2, $3, $4, $5, NULL, $6, $7, FALSE)
            RETURNING {TOKEN_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AuthTokenRow>(&query)
            .bind(&token.token_hash)
            .bind(&token.identity.telegram_id)
            .bind(&token.identity.username)
            .bind(&token.identity.first_name)
            .bind(&token.identity.last_name)
            .bind(token.created_at)
            .bind(token.expires_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<AuthToken>, AppError> {
        let query = format!(
            r#"
            SELECT {TOKEN_COLUMNS}
            FROM telegram_auth_tokens
            WHERE token_hash = $1
            "#
        );

        let row = sqlx::query_as::<_, AuthTokenRow>(&query)
            .bind(token_hash)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn consume(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AuthToken>, AppError> {
        let query = format!(
            r#"
            UPDATE telegram_auth_tokens
            SET used = TRUE
            WHERE token_hash = $1
              AND used = FALSE
              AND expires_at > $2
            RETURNING {TOKEN_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AuthTokenRow>(&query)
            .bind(token_hash)
            .bind(now)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn purge(&self, before: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM telegram_auth_tokens
            WHERE used = TRUE
               OR expires_at <= $1
            "#,
        )
        .bind(before)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<TokenStats, AppError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                COUNT(*)                                                AS total,
                COUNT(*) FILTER (WHERE used = FALSE AND expires_at > $1) AS active,
                COUNT(*) FILTER (WHERE used = TRUE)                     AS used,
                COUNT(*) FILTER (WHERE used = FALSE AND expires_at <= $1) AS expired
            FROM telegram_auth_tokens
            "#,
        )
        .bind(now)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(TokenStats {
            total: row.total,
            active: row.active,
            used: row.used,
            expired: row.expired,
        })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
