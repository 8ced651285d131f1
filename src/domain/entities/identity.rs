//! Chat identity captured when a token is issued.

use serde_json::json;

use crate::error::AppError;

/// Sender of a bot update as reported by the platform.
///
/// Nothing is validated here; see [`ChatIdentity::try_from`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderProfile {
    pub id: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Validated identity of the chat user a token is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatIdentity {
    pub telegram_id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ChatIdentity {
    /// Builds an identity, rejecting an empty platform user id.
    ///
    /// Blank optional fields are stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidIdentity`] if `telegram_id` is empty or blank.
    pub fn new(
        telegram_id: impl Into<String>,
        username: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Self, AppError> {
        let telegram_id = telegram_id.into().trim().to_string();

        if telegram_id.is_empty() {
            return Err(AppError::invalid_identity(
                "Chat user id is missing",
                json!({ "field": "from.id" }),
            ));
        }

        Ok(Self {
            telegram_id,
            username: non_blank(username),
            first_name: non_blank(first_name),
            last_name: non_blank(last_name),
        })
    }
}

impl TryFrom<SenderProfile> for ChatIdentity {
    type Error = AppError;

    fn try_from(sender: SenderProfile) -> Result<Self, Self::Error> {
        let Some(id) = sender.id else {
            return Err(AppError::invalid_identity(
                "Update has no sender",
                json!({ "field": "from" }),
            ));
        };

        Self::new(id, sender.username, sender.first_name, sender.last_name)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_creation() {
        let identity =
            ChatIdentity::new("12345", Some("alice".to_string()), None, None).unwrap();

        assert_eq!(identity.telegram_id, "12345");
        assert_eq!(identity.username.as_deref(), Some("alice"));
        assert!(identity.first_name.is_none());
    }

    #[test]
    fn test_identity_trims_id() {
        let identity = ChatIdentity::new("  42 ", None, None, None).unwrap();
        assert_eq!(identity.telegram_id, "42");
    }

    #[test]
    fn test_identity_rejects_blank_id() {
        let result = ChatIdentity::new("   ", None, None, None);
        assert!(matches!(result, Err(AppError::InvalidIdentity { .. })));
    }

    #[test]
    fn test_identity_drops_blank_optional_fields() {
        let identity = ChatIdentity::new(
            "1",
            Some(String::new()),
            Some("Alice".to_string()),
            Some("  ".to_string()),
        )
        .unwrap();

        assert!(identity.username.is_none());
        assert_eq!(identity.first_name.as_deref(), Some("Alice"));
        assert!(identity.last_name.is_none());
    }

    #[test]
    fn test_try_from_sender_without_id() {
        let sender = SenderProfile {
            username: Some("ghost".to_string()),
            ..Default::default()
        };

        let result = ChatIdentity::try_from(sender);
        assert!(matches!(result, Err(AppError::InvalidIdentity { .. })));
    }
}
