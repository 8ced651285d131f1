//! Token issuance and redemption service.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use url::Url;

use crate::domain::entities::{AuthToken, ChatIdentity, NewAuthToken};
use crate::domain::repositories::AuthTokenRepository;
use crate::error::AppError;
use crate::utils::token::{generate_token, hash_token};

/// Path on the website that redeems a token.
pub const CALLBACK_PATH: &str = "/auth/telegram/callback";

/// A freshly issued token.
///
/// Holds the raw token, which exists only in memory and in the link sent to
/// the user. `Debug` output redacts it.
pub struct IssuedToken {
    pub raw_token: String,
    pub redemption_url: String,
    pub record: AuthToken,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("raw_token", &"<redacted>")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

/// Service for minting and redeeming single-use auth tokens.
///
/// Tokens are hashed with plain SHA-256 before storage so the website can
/// look them up with the same digest.
pub struct TokenService<R: AuthTokenRepository> {
    repository: Arc<R>,
    site_url: String,
}

impl<R: AuthTokenRepository> TokenService<R> {
    /// Creates a new token service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `site_url` - website base URL the redemption link points to
    pub fn new(repository: Arc<R>, site_url: impl Into<String>) -> Self {
        Self {
            repository,
            site_url: site_url.into(),
        }
    }

    /// Issues a token bound to `identity`.
    ///
    /// The row is committed before this returns, so a caller may only promise
    /// the link to the user after `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the row cannot be stored, including
    /// a hash collision. Returns [`AppError::Internal`] if the configured site
    /// URL cannot form a redemption link.
    pub async fn issue(&self, identity: ChatIdentity) -> Result<IssuedToken, AppError> {
        let raw_token = generate_token();
        let redemption_url = self.redemption_url(&raw_token)?;
        let new_token = NewAuthToken::issue(hash_token(&raw_token), identity, Utc::now());

        let record = self.repository.insert(new_token).await?;

        tracing::info!(
            token_id = record.id,
            telegram_id = %record.telegram_id,
            expires_at = %record.expires_at,
            "Issued web auth token"
        );
        metrics::counter!("auth_tokens_issued_total").increment(1);

        Ok(IssuedToken {
            raw_token,
            redemption_url,
            record,
        })
    }

    /// Builds `{site_url}/auth/telegram/callback?token={raw_token}`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the site URL is not a valid base URL.
    pub fn redemption_url(&self, raw_token: &str) -> Result<String, AppError> {
        let base = format!("{}{}", self.site_url.trim_end_matches('/'), CALLBACK_PATH);

        let mut url = Url::parse(&base).map_err(|e| {
            AppError::internal(
                "Invalid site URL",
                json!({ "site_url": self.site_url, "reason": e.to_string() }),
            )
        })?;
        url.query_pairs_mut().append_pair("token", raw_token);

        Ok(url.into())
    }

    /// Redeems a raw token, marking it used.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, expired or
    /// already used; the cases are not distinguished.
    /// Returns [`AppError::Persistence`] on database errors.
    pub async fn redeem(&self, raw_token: &str) -> Result<AuthToken, AppError> {
        let token_hash = hash_token(raw_token.trim());

        let Some(token) = self.repository.consume(&token_hash, Utc::now()).await? else {
            metrics::counter!("auth_tokens_rejected_total").increment(1);
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid, expired or already used token" }),
            ));
        };

        tracing::info!(
            token_id = token.id,
            telegram_id = %token.telegram_id,
            "Redeemed web auth token"
        );
        metrics::counter!("auth_tokens_redeemed_total").increment(1);

        Ok(token)
    }

    /// Checks token store connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.health_check().await
    }
}
