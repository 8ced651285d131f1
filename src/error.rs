//! Application error type and its HTTP representation.
//!
//! Every layer returns [`AppError`]. Handlers let axum render it through
//! [`IntoResponse`] as:
//!
//! ```json
//! { "error": { "code": "persistence_error", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::is_unique_violation_on_token_hash;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload embedded in every error response.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The chat user behind an update is missing or malformed.
    #[error("{message}")]
    InvalidIdentity { message: String, details: Value },

    /// The token store rejected or failed the operation.
    #[error("{message}")]
    Persistence { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The bot platform refused or failed to deliver a reply.
    #[error("{message}")]
    Upstream { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_identity(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidIdentity {
            message: message.into(),
            details,
        }
    }
    pub fn persistence(message: impl Into<String>, details: Value) -> Self {
        Self::Persistence {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status and stable error code for this variant.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidIdentity { .. } => (StatusCode::BAD_REQUEST, "invalid_identity"),
            Self::Persistence { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error"),
            Self::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Upstream { .. } => (StatusCode::BAD_GATEWAY, "upstream_error"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    fn into_info(self) -> (StatusCode, ErrorInfo) {
        let (status, code) = self.status_and_code();
        let (message, details) = match self {
            Self::InvalidIdentity { message, details }
            | Self::Persistence { message, details }
            | Self::Unauthorized { message, details }
            | Self::Validation { message, details }
            | Self::Upstream { message, details }
            | Self::Internal { message, details } => (message, details),
        };

        (
            status,
            ErrorInfo {
                code,
                message,
                details,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.into_info();

        if status.is_server_error() {
            tracing::error!(code = error.code, message = %error.message, "Request failed");
        }

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_token_hash(&e) {
            return AppError::persistence(
                "Token hash collision",
                json!({ "constraint": "telegram_auth_tokens_token_hash_key" }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::persistence("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = e
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages: Vec<Value> = errors
                    .iter()
                    .map(|err| {
                        err.message
                            .as_ref()
                            .map(|m| Value::String(m.to_string()))
                            .unwrap_or_else(|| Value::String(err.code.to_string()))
                    })
                    .collect();
                (field.to_string(), Value::Array(messages))
            })
            .collect();

        AppError::bad_request("Validation failed", json!({ "fields": fields }))
    }
}
