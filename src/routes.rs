//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST    /webhook/telegram`     - Bot update webhook (secret header when configured)
//! - `OPTIONS /webhook/telegram`     - CORS preflight
//! - `POST    /auth/telegram/redeem` - Token redemption (rate limited)
//! - `GET     /health`               - Health check (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Webhook secret** - `X-Telegram-Bot-Api-Secret-Token` verification
//! - **Rate limiting** - Per-IP token bucket on redemption
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RedeemRateLimit};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `redeem_limits` - per-client limits on the redemption endpoint
pub fn app_router(state: AppState, redeem_limits: RedeemRateLimit) -> NormalizePath<Router> {
    let webhook_router = api::routes::webhook_routes(state.clone());

    let auth_router = api::routes::auth_routes().layer(rate_limit::redeem_layer(redeem_limits));

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(webhook_router)
        .merge(auth_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
