//! Telegram Bot API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use super::service::ReplySender;
use crate::domain::reply::ReplyAction;
use crate::error::AppError;

/// Default Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardButton<'a> {
    text: &'a str,
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
}

impl<'a> SendMessageRequest<'a> {
    fn new(chat_id: i64, reply: &'a ReplyAction) -> Self {
        Self {
            chat_id,
            text: &reply.text,
            reply_markup: reply.button.as_ref().map(|button| InlineKeyboardMarkup {
                inline_keyboard: vec![vec![InlineKeyboardButton {
                    text: &button.label,
                    url: &button.url,
                }]],
            }),
        }
    }
}

/// HTTP client for the Telegram Bot API `sendMessage` method.
///
/// The bot token is part of every request URL, so request errors are stripped
/// of their URL before they are logged or returned.
#[derive(Clone)]
pub struct TelegramBotClient {
    http: Client,
    api_url: String,
    bot_token: String,
}

impl std::fmt::Debug for TelegramBotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBotClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl TelegramBotClient {
    /// Creates a client for the given API endpoint and bot token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        api_url: impl Into<String>,
        bot_token: impl Into<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.bot_token, method)
    }
}

#[async_trait]
impl ReplySender for TelegramBotClient {
    async fn send_reply(&self, chat_id: i64, reply: &ReplyAction) -> Result<(), AppError> {
        let body = SendMessageRequest::new(chat_id, reply);

        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::warn!(chat_id, error = %e, "sendMessage request failed");
                AppError::upstream(
                    "Failed to reach the bot platform",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        let status = response.status();
        let api: ApiResponse = response.json().await.map_err(|e| {
            AppError::upstream(
                "Unexpected response from the bot platform",
                json!({ "status": status.as_u16(), "reason": e.without_url().to_string() }),
            )
        })?;

        if !api.ok {
            tracing::warn!(
                chat_id,
                error_code = api.error_code,
                description = api.description.as_deref().unwrap_or_default(),
                "sendMessage rejected"
            );
            return Err(AppError::upstream(
                "Bot platform rejected the reply",
                json!({ "error_code": api.error_code, "description": api.description }),
            ));
        }

        tracing::debug!(chat_id, "Reply delivered");
        Ok(())
    }
}
