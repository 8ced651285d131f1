//! Auth token entity: a single-use, short-lived web sign-in credential.

use chrono::{DateTime, Duration, SubsecRound, Utc};

use super::identity::ChatIdentity;

/// How long an issued token stays redeemable.
pub const TOKEN_TTL_MINUTES: i64 = 5;

/// Validity window of an issued token.
pub fn token_ttl() -> Duration {
    Duration::minutes(TOKEN_TTL_MINUTES)
}

/// A stored auth token.
///
/// Only the SHA-256 hash of the raw token is kept. All fields except `used`
/// are written once at issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub id: i64,
    pub token_hash: String,
    pub telegram_id: String,
    pub telegram_username: Option<String>,
    pub telegram_first_name: Option<String>,
    pub telegram_last_name: Option<String>,
    pub telegram_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl AuthToken {
    /// Returns true if the token can still be redeemed at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
    }

    /// Returns true if the validity window has closed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
impl AuthToken {
    /// Builds the record a store would return for `new`, unused.
    pub(crate) fn from_new(id: i64, new: NewAuthToken) -> Self {
        Self {
            id,
            token_hash: new.token_hash,
            telegram_id: new.identity.telegram_id,
            telegram_username: new.identity.username,
            telegram_first_name: new.identity.first_name,
            telegram_last_name: new.identity.last_name,
            telegram_photo_url: None,
            created_at: new.created_at,
            expires_at: new.expires_at,
            used: false,
        }
    }
}

/// Input data for storing a freshly issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthToken {
    pub token_hash: String,
    pub identity: ChatIdentity,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewAuthToken {
    /// Prepares a token issued at `now`, expiring [`TOKEN_TTL_MINUTES`] later.
    ///
    /// `now` is truncated to microseconds, the resolution of `TIMESTAMPTZ`, so
    /// the stored window is exactly the TTL.
    pub fn issue(token_hash: String, identity: ChatIdentity, now: DateTime<Utc>) -> Self {
        let created_at = now.trunc_subsecs(6);

        Self {
            token_hash,
            identity,
            created_at,
            expires_at: created_at + token_ttl(),
        }
    }
}

/// Row counts of the token table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenStats {
    pub total: i64,
    pub active: i64,
    pub used: i64,
    pub expired: i64,
}
