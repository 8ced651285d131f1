//! Repository trait for auth token storage.

use crate::domain::entities::{AuthToken, NewAuthToken, TokenStats};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for single-use auth tokens.
///
/// Tokens are addressed by the SHA-256 hash of the raw value; raw tokens never
/// reach this layer.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAuthTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_auth_token.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthTokenRepository: Send + Sync {
    /// Stores a freshly issued token in a single atomic insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the hash already exists or the
    /// database is unavailable. An existing row is never overwritten.
    async fn insert(&self, token: NewAuthToken) -> Result<AuthToken, AppError>;

    /// Finds a token by its hash regardless of its state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<AuthToken>, AppError>;

    /// Marks a token used if it is still valid at `now`.
    ///
    /// The check and the update happen in one statement, so concurrent callers
    /// cannot both consume the same token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(token))` with `used = true` if the token was consumed
    /// - `Ok(None)` if the token is unknown, expired, or already used
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn consume(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AuthToken>, AppError>;

    /// Deletes used tokens and tokens that expired before `before`.
    ///
    /// Returns the number of deleted rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn purge(&self, before: DateTime<Utc>) -> Result<u64, AppError>;

    /// Counts tokens by state as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn stats(&self, now: DateTime<Utc>) -> Result<TokenStats, AppError>;

    /// Checks that the store is reachable.
    async fn health_check(&self) -> Result<(), AppError>;
}
