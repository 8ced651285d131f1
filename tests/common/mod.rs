#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use telegram_web_auth::domain::reply::ReplyAction;
use telegram_web_auth::error::AppError;
use telegram_web_auth::infrastructure::telegram::ReplySender;
use telegram_web_auth::state::AppState;

pub const SITE_URL: &str = "https://example.com";

/// Captures replies instead of calling the Bot API.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(i64, ReplyAction)>>,
    fail: bool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(i64, ReplyAction)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySender for RecordingSender {
    async fn send_reply(&self, chat_id: i64, reply: &ReplyAction) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::upstream(
                "Failed to deliver reply",
                json!({ "reason": "test sender" }),
            ));
        }
        self.sent.lock().unwrap().push((chat_id, reply.clone()));
        Ok(())
    }
}

pub fn create_test_state(pool: PgPool) -> (AppState, Arc<RecordingSender>) {
    create_test_state_with_secret(pool, None)
}

pub fn create_test_state_with_secret(
    pool: PgPool,
    secret: Option<&str>,
) -> (AppState, Arc<RecordingSender>) {
    let sender = Arc::new(RecordingSender::default());
    let state = AppState::new(
        Arc::new(pool),
        sender.clone(),
        SITE_URL,
        secret.map(str::to_string),
    );
    (state, sender)
}

pub fn create_failing_state(pool: PgPool) -> (AppState, Arc<RecordingSender>) {
    let sender = Arc::new(RecordingSender::failing());
    let state = AppState::new(Arc::new(pool), sender.clone(), SITE_URL, None);
    (state, sender)
}

pub async fn count_tokens(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM telegram_auth_tokens")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Inserts a token row directly, bypassing the service.
pub async fn insert_token(
    pool: &PgPool,
    token_hash: &str,
    telegram_id: &str,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    used: bool,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO telegram_auth_tokens (token_hash, telegram_id, created_at, expires_at, used)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(token_hash)
    .bind(telegram_id)
    .bind(created_at)
    .bind(expires_at)
    .bind(used)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn start_update(text: &str, user_id: i64) -> serde_json::Value {
    json!({
        "update_id": 1000,
        "message": {
            "message_id": 1,
            "date": 1_700_000_000,
            "from": {
                "id": user_id,
                "is_bot": false,
                "first_name": "Alice",
                "last_name": "Smith",
                "username": "alice"
            },
            "chat": { "id": user_id, "type": "private" },
            "text": text
        }
    })
}
