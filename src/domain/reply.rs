//! Outbound reply to the chat user.

use super::entities::TOKEN_TTL_MINUTES;

/// Reply sent for any `/start` that is not a web sign-in request.
pub const GREETING_TEXT: &str = "Hi! Use the \"Sign in with Telegram\" button on the website.";

/// Label of the button carrying the redemption link.
pub const SIGN_IN_BUTTON_LABEL: &str = "Sign in to the website";

/// An inline button opening a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkButton {
    pub label: String,
    pub url: String,
}

/// A text message with at most one link button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyAction {
    pub text: String,
    pub button: Option<LinkButton>,
}

impl ReplyAction {
    /// Plain text reply without a button.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            button: None,
        }
    }

    /// The fixed greeting for a `/start` without the sign-in argument.
    pub fn greeting() -> Self {
        Self::text(GREETING_TEXT)
    }

    /// Reply carrying a freshly issued redemption link.
    pub fn sign_in_link(url: impl Into<String>) -> Self {
        Self {
            text: format!(
                "Authorization is ready!\n\n\
                 Tap the button below to sign in to the website 👇🏼\n\n\
                 The link is valid for {TOKEN_TTL_MINUTES} minutes"
            ),
            button: Some(LinkButton {
                label: SIGN_IN_BUTTON_LABEL.to_string(),
                url: url.into(),
            }),
        }
    }
}
