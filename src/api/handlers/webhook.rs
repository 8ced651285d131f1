//! Handlers for the bot webhook endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::telegram::Update;
use crate::api::dto::webhook::WebhookAck;
use crate::error::AppError;
use crate::state::AppState;

/// Processes a bot update.
///
/// # Endpoint
///
/// `POST /webhook/telegram`
///
/// The secret header has already been checked by
/// [`crate::api::middleware::webhook_secret`]. Only `/start` commands are
/// acted on; any other update is acknowledged untouched.
///
/// # Response
///
/// ```json
/// { "ok": true }
/// ```
///
/// A sign-in request without a usable sender is logged and acknowledged:
/// redelivering it cannot succeed.
///
/// # Errors
///
/// - `500 Internal Server Error` - token could not be stored; no reply was sent
/// - `502 Bad Gateway` - token stored but the reply could not be delivered
///
/// A non-2xx status makes the platform redeliver the update.
pub async fn webhook_handler(
    State(state): State<AppState>,
    Json(update): Json<Update>,
) -> Result<Json<WebhookAck>, AppError> {
    let Some((chat_id, command)) = update.start_command() else {
        tracing::debug!(update_id = update.update_id, "Ignoring non-start update");
        return Ok(Json(WebhookAck::ok()));
    };

    tracing::info!(
        update_id = update.update_id,
        chat_id,
        web_auth = command.is_web_auth(),
        "Handling start command"
    );

    match state.start_service.handle_start(chat_id, &command).await {
        Ok(_) => {}
        Err(AppError::InvalidIdentity { message, .. }) => {
            tracing::warn!(
                update_id = update.update_id,
                chat_id,
                reason = %message,
                "Dropping sign-in request without a usable sender"
            );
        }
        Err(e) => return Err(e),
    }

    Ok(Json(WebhookAck::ok()))
}

/// Answers a CORS preflight request.
///
/// # Endpoint
///
/// `OPTIONS /webhook/telegram`
///
/// Returns `200 OK` with permissive CORS headers and an empty body.
pub async fn webhook_preflight_handler() -> Response {
    (
        StatusCode::OK,
        [
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("POST, OPTIONS"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(PREFLIGHT_ALLOW_HEADERS),
            ),
        ],
    )
        .into_response()
}

const PREFLIGHT_ALLOW_HEADERS: &str = "Content-Type, X-Telegram-Bot-Api-Secret-Token";
