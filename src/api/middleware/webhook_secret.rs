//! Webhook secret verification middleware.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::{error::AppError, state::AppState};

/// Header carrying the secret configured via `setWebhook`.
pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Rejects webhook calls whose secret header does not match the configured one.
///
/// # Header Format
///
/// ```text
/// X-Telegram-Bot-Api-Secret-Token: <secret>
/// ```
///
/// Runs before the webhook handler, so a rejected request never reaches the
/// token store or the bot platform. Without a configured secret every request
/// passes. `OPTIONS` preflight requests always pass.
///
/// # Errors
///
/// Returns `401 Unauthorized` if a secret is configured and the header is
/// missing or different.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::webhook_secret;
///
/// let webhook = Router::new()
///     .route("/webhook/telegram", post(webhook_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), webhook_secret::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if let Some(expected) = st.webhook_secret.as_deref() {
        let provided = req
            .headers()
            .get(SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if !secret_matches(provided, expected) {
            tracing::warn!(
                header_present = !provided.is_empty(),
                "Rejected webhook call with invalid secret"
            );
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Webhook secret is missing or invalid" }),
            ));
        }
    }

    Ok(next.run(req).await)
}

/// Compares fixed-length digests so the match time does not depend on how
/// much of the secret was guessed.
fn secret_matches(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_matches_exact_value() {
        assert!(secret_matches("S1", "S1"));
    }

    #[test]
    fn test_secret_mismatch() {
        assert!(!secret_matches("S2", "S1"));
        assert!(!secret_matches("", "S1"));
        assert!(!secret_matches("S1 ", "S1"));
        assert!(!secret_matches("s1", "S1"));
    }
}
