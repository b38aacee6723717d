//! Message router
//!
//! Runs one inbound message through the whole chain: registration gate,
//! per-user lock, conversation middleware, then the command or free-text
//! handler. Returns the reply to send, if any; sending is left to the caller.

use std::sync::Arc;
use teloxide::types::ChatId;
use tracing::{debug, Instrument};
use crate::middleware::{log_inbound, message_span, ConversationMiddleware, GateDecision, MessageTimer, RegistrationGate};
use crate::models::TelegramUser;
use crate::services::{AuthService, CollectorApi, TokenCache};
use crate::state::{PendingRequest, SessionContext, StateStore, UserLocks};
use super::commands::{classify, help, start, CollectionHandler, Command, Input};
use super::{messages, replies};

/// Transport-independent view of an inbound chat message
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub user: Option<TelegramUser>,
    pub chat_id: ChatId,
    pub text: String,
}

impl InboundMessage {
    pub fn new(user: Option<TelegramUser>, chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            user,
            chat_id,
            text: text.into(),
        }
    }
}

/// Entry point for every text message the bot receives
#[derive(Clone)]
pub struct BotRouter {
    gate: RegistrationGate,
    conversation: ConversationMiddleware,
    collections: CollectionHandler,
    locks: Arc<UserLocks>,
    bot_username: String,
}

impl BotRouter {
    pub fn new(
        store: Arc<dyn StateStore>,
        api: Arc<dyn CollectorApi>,
        cache: Arc<dyn TokenCache>,
        bot_username: impl Into<String>,
    ) -> Self {
        Self {
            gate: RegistrationGate::new(AuthService::new(api.clone(), cache)),
            conversation: ConversationMiddleware::new(store.clone()),
            collections: CollectionHandler::new(store, api),
            locks: Arc::new(UserLocks::new()),
            bot_username: bot_username.into(),
        }
    }

    /// Handle one message and return the reply text
    pub async fn handle(&self, message: InboundMessage) -> Option<String> {
        let user_id = message.user.as_ref().map(|user| user.id);
        log_inbound(user_id, message.chat_id, &message.text);

        let Some(user) = message.user else {
            debug!(chat_id = message.chat_id.0, "Dropping message without sender");
            return None;
        };

        let timer = MessageTimer::start(user.id);
        let reply = self
            .route(&user, message.chat_id, message.text)
            .instrument(message_span(user.id))
            .await;
        timer.finish(reply.is_some());
        reply
    }

    async fn route(&self, user: &TelegramUser, chat_id: ChatId, text: String) -> Option<String> {
        let input = classify(&text, &self.bot_username);
        let register = input == Input::Command(Command::Register);

        let token = match self.gate.check(user, &text, register).await {
            GateDecision::Proceed(token) => token,
            GateDecision::Respond(reply) => return Some(reply),
        };

        if input == Input::UnknownCommand {
            return Some(replies::UNKNOWN_COMMAND.to_string());
        }

        // Held until the handler has finished its last state mutation.
        let _guard = self.locks.acquire(user.id).await;

        let context = self
            .conversation
            .attach(Some(user.id), SessionContext::new().with_token(token))
            .await?;
        let request = PendingRequest::new(user.id, chat_id, text, context);

        match input {
            Input::Command(command) => self.dispatch(command, user, &request).await,
            Input::Text => messages::handle_text(&self.collections, &request).await,
            Input::UnknownCommand => None,
        }
    }

    async fn dispatch(&self, command: Command, user: &TelegramUser, request: &PendingRequest) -> Option<String> {
        debug!(user_id = request.user_id, command = ?command, label = %request.label(), "Dispatching command");

        match command {
            Command::Start => Some(start::handle_start(user)),
            Command::Help => Some(help::help_text()),
            // answered by the registration gate
            Command::Register => Some(replies::ALREADY_REGISTERED.to_string()),
            Command::Collections => Some(self.collections.list(request).await),
            Command::CollectionNew => Some(self.collections.ask_create(request).await),
            Command::CollectionRename => Some(self.collections.ask_rename(request).await),
            Command::CollectionDelete => Some(self.collections.ask_delete(request).await),
            Command::Cancel => self.conversation.cancel(request).await,
        }
    }
}
