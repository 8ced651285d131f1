//! Handler for token redemption endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::redeem::{RedeemRequest, RedeemResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Redeems a sign-in token, returning the chat identity it was issued to.
///
/// # Endpoint
///
/// `POST /auth/telegram/redeem`
///
/// Called by the website's backend with the token from the callback URL.
/// A token can be redeemed once and only within its validity window.
///
/// # Request Body
///
/// ```json
/// { "token": "0b6f1c1e-3f43-4a8e-9a5c-2f0d1b7a9e11" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "telegram_id": "12345",
///   "username": "alice",
///   "first_name": "Alice",
///   "last_name": null,
///   "photo_url": null,
///   "issued_at": "2025-06-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` - malformed token
/// - `401 Unauthorized` - token unknown, expired or already used
pub async fn redeem_handler(
    State(state): State<AppState>,
    Json(payload): Json<RedeemRequest>,
) -> Result<Json<RedeemResponse>, AppError> {
    payload.validate()?;

    let token = state.token_service.redeem(&payload.token).await?;

    Ok(Json(token.into()))
}
