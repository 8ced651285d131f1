//! `/start` command recognition.

use super::entities::SenderProfile;

/// Deep-link argument that requests a web sign-in link.
pub const WEB_AUTH_ARG: &str = "web_auth";

/// A `/start` command with its optional deep-link argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCommand {
    pub args: Option<String>,
    pub sender: SenderProfile,
}

impl StartCommand {
    /// Parses message text as a `/start` command.
    ///
    /// Accepts `/start`, `/start <args>` and `/start@BotName <args>`. The
    /// argument is everything after the first whitespace, trimmed; an empty
    /// remainder means no argument.
    ///
    /// Returns `None` for any other text.
    pub fn parse(text: &str, sender: SenderProfile) -> Option<Self> {
        let text = text.trim_start();
        let (command, rest) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));

        let name = command.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(name, _bot)| name);
        if name != "start" {
            return None;
        }

        let args = rest.trim();
        Some(Self {
            args: (!args.is_empty()).then(|| args.to_string()),
            sender,
        })
    }

    /// Returns true if the deep-link argument is exactly [`WEB_AUTH_ARG`].
    pub fn is_web_auth(&self) -> bool {
        self.args.as_deref() == Some(WEB_AUTH_ARG)
    }
}
