//! Reply sender trait.

use async_trait::async_trait;

use crate::domain::reply::ReplyAction;
use crate::error::AppError;

/// Delivers replies to a chat on the bot platform.
///
/// # Implementations
///
/// - [`crate::infrastructure::telegram::TelegramBotClient`] - Telegram Bot API over HTTPS
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Sends `reply` to the chat identified by `chat_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the platform is unreachable or
    /// rejects the message.
    async fn send_reply(&self, chat_id: i64, reply: &ReplyAction) -> Result<(), AppError>;
}
