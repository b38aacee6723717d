//! Request context propagation
//!
//! Handlers never look up the current label or the auth token themselves:
//! both travel down the call chain inside a [`SessionContext`], which the
//! registration gate and the conversation middleware fill in.

use std::fmt;
use teloxide::types::ChatId;
use super::label::ConversationLabel;

/// Bearer token issued by the collector service
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens end up in structured logs through Debug; keep them out.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Per-request context carried alongside one unit of work
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    label: ConversationLabel,
    auth_token: Option<AuthToken>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: ConversationLabel) -> Self {
        self.label = label;
        self
    }

    pub fn with_token(mut self, token: AuthToken) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Current label; `Default` when the middleware attached nothing
    pub fn label(&self) -> ConversationLabel {
        self.label
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.auth_token.as_ref()
    }
}

/// One inbound chat message on its way through the handler chain
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub user_id: i64,
    pub chat_id: ChatId,
    pub text: String,
    pub context: SessionContext,
}

impl PendingRequest {
    pub fn new(user_id: i64, chat_id: ChatId, text: impl Into<String>, context: SessionContext) -> Self {
        Self {
            user_id,
            chat_id,
            text: text.into(),
            context,
        }
    }

    pub fn label(&self) -> ConversationLabel {
        self.context.label()
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.context.token()
    }
}
