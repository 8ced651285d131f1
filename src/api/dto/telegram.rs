//! Subset of the Telegram `Update` object consumed by the webhook.
//!
//! Unknown fields are ignored so newer Bot API payloads keep deserializing.

use serde::{Deserialize, Serialize};

use crate::domain::entities::SenderProfile;
use crate::domain::start_command::StartCommand;

/// Incoming update delivered to the webhook.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// User id as sent by the platform: a number, or a string from relays
/// that stringify ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<User> for SenderProfile {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id.to_string()),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

impl Update {
    /// Extracts the target chat and `/start` command, if this update carries one.
    pub fn start_command(&self) -> Option<(i64, StartCommand)> {
        let message = self.message.as_ref()?;
        let text = message.text.as_deref()?;
        let sender = message.from.clone().map(Into::into).unwrap_or_default();

        StartCommand::parse(text, sender).map(|command| (message.chat.id, command))
    }
}
