//! DTOs for the token redemption endpoint.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::AuthToken;

/// Characters a raw token may contain.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").unwrap());

/// Request to redeem a raw token taken from the sign-in link.
#[derive(Debug, Deserialize, Validate)]
pub struct RedeemRequest {
    #[validate(length(min = 1, max = 128))]
    #[validate(regex(path = "*TOKEN_REGEX", message = "Token contains invalid characters"))]
    pub token: String,
}

/// Identity captured when the redeemed token was issued.
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    pub telegram_id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
    pub issued_at: DateTime<Utc>,
}

impl From<AuthToken> for RedeemResponse {
    fn from(token: AuthToken) -> Self {
        Self {
            telegram_id: token.telegram_id,
            username: token.telegram_username,
            first_name: token.telegram_first_name,
            last_name: token.telegram_last_name,
            photo_url: token.telegram_photo_url,
            issued_at: token.created_at,
        }
    }
}
