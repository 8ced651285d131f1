//! API route configuration.

use crate::api::handlers::{redeem_handler, webhook_handler, webhook_preflight_handler};
use crate::api::middleware::webhook_secret;
use crate::state::AppState;
use axum::{Router, middleware, routing::post};

/// Bot webhook routes, gated by the webhook secret header.
///
/// # Endpoints
///
/// - `POST    /webhook/telegram` - Process a bot update
/// - `OPTIONS /webhook/telegram` - CORS preflight
pub fn webhook_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/webhook/telegram",
            post(webhook_handler).options(webhook_preflight_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            webhook_secret::layer,
        ))
}

/// Token redemption routes used by the website's backend.
///
/// # Endpoints
///
/// - `POST /auth/telegram/redeem` - Redeem a sign-in token once
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/telegram/redeem", post(redeem_handler))
}
