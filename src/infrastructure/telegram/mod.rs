//! Bot platform integration.
//!
//! Provides the [`ReplySender`] trait and its Telegram Bot API implementation
//! [`TelegramBotClient`].

mod client;
mod service;

pub use client::{DEFAULT_API_URL, TelegramBotClient};
pub use service::ReplySender;

#[cfg(test)]
pub use service::MockReplySender;
