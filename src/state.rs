//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{StartService, TokenService};
use crate::infrastructure::persistence::PgAuthTokenRepository;
use crate::infrastructure::telegram::ReplySender;

/// Services and settings shared by all handlers.
///
/// Built once at startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService<PgAuthTokenRepository>>,
    pub start_service: Arc<StartService<PgAuthTokenRepository>>,
    /// Expected `X-Telegram-Bot-Api-Secret-Token` value; `None` disables the check.
    pub webhook_secret: Option<Arc<str>>,
}

impl AppState {
    /// Wires repositories and services over a connection pool.
    ///
    /// # Arguments
    ///
    /// - `pool` - PostgreSQL pool holding the token table
    /// - `reply_sender` - capability used to answer chat users
    /// - `site_url` - website base URL for redemption links
    /// - `webhook_secret` - optional shared secret; empty strings disable the check
    pub fn new(
        pool: Arc<PgPool>,
        reply_sender: Arc<dyn ReplySender>,
        site_url: impl Into<String>,
        webhook_secret: Option<String>,
    ) -> Self {
        let repository = Arc::new(PgAuthTokenRepository::new(pool));
        let token_service = Arc::new(TokenService::new(repository, site_url));
        let start_service = Arc::new(StartService::new(token_service.clone(), reply_sender));

        Self {
            token_service,
            start_service,
            webhook_secret: webhook_secret
                .filter(|s| !s.is_empty())
                .map(Arc::from),
        }
    }
}
