//! `/start` command handling.

use std::sync::Arc;

use crate::application::services::TokenService;
use crate::domain::entities::{ChatIdentity, SenderProfile};
use crate::domain::reply::ReplyAction;
use crate::domain::repositories::AuthTokenRepository;
use crate::domain::start_command::StartCommand;
use crate::error::AppError;
use crate::infrastructure::telegram::ReplySender;

/// Handles `/start` commands delivered by the bot webhook.
///
/// `/start web_auth` issues a sign-in token and answers with its link; every
/// other `/start` gets the fixed greeting without touching the token store.
/// The service keeps no state between calls.
pub struct StartService<R: AuthTokenRepository> {
    token_service: Arc<TokenService<R>>,
    reply_sender: Arc<dyn ReplySender>,
}

impl<R: AuthTokenRepository> StartService<R> {
    /// Creates a new start command service.
    pub fn new(token_service: Arc<TokenService<R>>, reply_sender: Arc<dyn ReplySender>) -> Self {
        Self {
            token_service,
            reply_sender,
        }
    }

    /// Computes the reply for `command` and sends it to `chat_id`.
    ///
    /// For a sign-in request the token row is committed before the reply is
    /// sent. If sending fails afterwards the row stays and expires unused.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidIdentity`] if the sender has no usable id
    /// - [`AppError::Persistence`] if the token cannot be stored; nothing is sent
    /// - [`AppError::Upstream`] if the reply cannot be delivered
    pub async fn handle_start(
        &self,
        chat_id: i64,
        command: &StartCommand,
    ) -> Result<ReplyAction, AppError> {
        let reply = self.reply_for(command).await?;

        self.reply_sender.send_reply(chat_id, &reply).await?;

        Ok(reply)
    }

    /// Dispatches on the deep-link argument without sending anything.
    ///
    /// # Errors
    ///
    /// See [`Self::issue_token`].
    pub async fn reply_for(&self, command: &StartCommand) -> Result<ReplyAction, AppError> {
        if command.is_web_auth() {
            self.issue_token(&command.sender).await
        } else {
            tracing::debug!(args = ?command.args, "Start command without sign-in request");
            Ok(Self::handle_non_auth_start())
        }
    }

    /// Issues a token for `sender` and builds the reply carrying its link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidIdentity`] before any persistence attempt if
    /// the sender id is missing or blank, and [`AppError::Persistence`] if the
    /// token cannot be stored.
    pub async fn issue_token(&self, sender: &SenderProfile) -> Result<ReplyAction, AppError> {
        let identity = ChatIdentity::try_from(sender.clone())?;

        let issued = self.token_service.issue(identity).await?;

        Ok(ReplyAction::sign_in_link(issued.redemption_url))
    }

    /// The reply to any `/start` that does not request a sign-in link.
    pub fn handle_non_auth_start() -> ReplyAction {
        ReplyAction::greeting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AuthToken, NewAuthToken};
    use crate::domain::repositories::MockAuthTokenRepository;
    use crate::infrastructure::telegram::MockReplySender;
    use mockall::Sequence;
    use serde_json::json;
    use std::sync::Mutex;

    fn sender(id: Option<&str>) -> SenderProfile {
        SenderProfile {
            id: id.map(str::to_string),
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        }
    }

    fn command(args: Option<&str>, id: Option<&str>) -> StartCommand {
        StartCommand {
            args: args.map(str::to_string),
            sender: sender(id),
        }
    }

    fn service(
        repo: MockAuthTokenRepository,
        reply_sender: MockReplySender,
    ) -> StartService<MockAuthTokenRepository> {
        let token_service = Arc::new(TokenService::new(Arc::new(repo), "https://site"));
        StartService::new(token_service, Arc::new(reply_sender))
    }

    #[tokio::test]
    async fn test_web_auth_persists_before_reply() {
        let mut seq = Sequence::new();
        let mut repo = MockAuthTokenRepository::new();
        let mut reply_sender = MockReplySender::new();

        repo.expect_insert()
            .withf(|token| token.identity.telegram_id == "12345")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|token| Ok(AuthToken::from_new(7, token)));

        reply_sender
            .expect_send_reply()
            .withf(|chat_id, reply| *chat_id == 99 && reply.button.is_some())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let reply = service(repo, reply_sender)
            .handle_start(99, &command(Some("web_auth"), Some("12345")))
            .await
            .unwrap();

        let button = reply.button.unwrap();
        assert!(
            button
                .url
                .starts_with("https://site/auth/telegram/callback?token=")
        );
        assert!(reply.text.contains("5 minutes"));
    }

    #[tokio::test]
    async fn test_non_auth_start_is_idempotent_and_side_effect_free() {
        let mut repo = MockAuthTokenRepository::new();
        repo.expect_insert().times(0);

        let sent = Arc::new(Mutex::new(Vec::new()));
        let sent_clone = sent.clone();
        let mut reply_sender = MockReplySender::new();
        reply_sender
            .expect_send_reply()
            .times(2)
            .returning(move |_, reply| {
                sent_clone.lock().unwrap().push(reply.clone());
                Ok(())
            });

        let service = service(repo, reply_sender);
        let cmd = command(None, Some("999"));
        service.handle_start(1, &cmd).await.unwrap();
        service.handle_start(1, &cmd).await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent[0], sent[1]);
        assert_eq!(sent[0], ReplyAction::greeting());
    }

    #[tokio::test]
    async fn test_other_argument_gets_greeting() {
        let mut repo = MockAuthTokenRepository::new();
        repo.expect_insert().times(0);

        let service = service(repo, MockReplySender::new());
        let reply = service
            .reply_for(&command(Some("promo"), Some("1")))
            .await
            .unwrap();

        assert_eq!(reply, StartService::<MockAuthTokenRepository>::handle_non_auth_start());
    }

    #[tokio::test]
    async fn test_persistence_failure_sends_nothing() {
        let mut repo = MockAuthTokenRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::persistence("Token hash collision", json!({}))));

        let mut reply_sender = MockReplySender::new();
        reply_sender.expect_send_reply().times(0);

        let result = service(repo, reply_sender)
            .handle_start(1, &command(Some("web_auth"), Some("12345")))
            .await;

        assert!(matches!(result, Err(AppError::Persistence { .. })));
    }

    #[tokio::test]
    async fn test_missing_identity_aborts_before_persistence() {
        let mut repo = MockAuthTokenRepository::new();
        repo.expect_insert().times(0);

        let mut reply_sender = MockReplySender::new();
        reply_sender.expect_send_reply().times(0);

        let service = service(repo, reply_sender);

        let missing = service
            .handle_start(1, &command(Some("web_auth"), None))
            .await;
        assert!(matches!(missing, Err(AppError::InvalidIdentity { .. })));

        let blank = service
            .handle_start(1, &command(Some("web_auth"), Some("  ")))
            .await;
        assert!(matches!(blank, Err(AppError::InvalidIdentity { .. })));
    }

    #[tokio::test]
    async fn test_send_failure_is_reported() {
        let mut repo = MockAuthTokenRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|token| Ok(AuthToken::from_new(7, token)));

        let mut reply_sender = MockReplySender::new();
        reply_sender
            .expect_send_reply()
            .times(1)
            .returning(|_, _| Err(AppError::upstream("Bot platform rejected the reply", json!({}))));

        let result = service(repo, reply_sender)
            .handle_start(1, &command(Some("web_auth"), Some("12345")))
            .await;

        assert!(matches!(result, Err(AppError::Upstream { .. })));
    }
}
