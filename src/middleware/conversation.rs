//! Conversation middleware
//!
//! Loads the stored label of the sender and attaches it to the request
//! context before any handler runs. Also owns `/cancel`, which bypasses the
//! handlers and clears the stored label directly.

use std::sync::Arc;
use tracing::debug;
use crate::handlers::replies;
use crate::state::{ConversationLabel, PendingRequest, SessionContext, StateStore};
use crate::utils::logging::{log_error, log_state_transition};

/// Attaches the conversational label to each request
#[derive(Clone)]
pub struct ConversationMiddleware {
    store: Arc<dyn StateStore>,
}

impl ConversationMiddleware {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Attach the current label of `user_id` to `context`
    ///
    /// Events without a sender yield `None` and are dropped. A missing entry
    /// or a failing store both attach `Default`.
    pub async fn attach(&self, user_id: Option<i64>, context: SessionContext) -> Option<SessionContext> {
        let user_id = user_id?;

        let label = match self.store.get_state(user_id).await {
            Ok(Some(label)) => label,
            Ok(None) => ConversationLabel::Default,
            Err(e) => {
                log_error(&e, Some(user_id), "Failed to load conversation state, assuming default");
                ConversationLabel::Default
            }
        };

        debug!(user_id = user_id, label = %label, "Attached conversation state");
        Some(context.with_label(label))
    }

    /// Abort any in-flight flow of the sender
    ///
    /// The stored entry is always cleared. Only an active flow gets a reply.
    pub async fn cancel(&self, request: &PendingRequest) -> Option<String> {
        if let Err(e) = self.store.clear_state(request.user_id).await {
            log_error(&e, Some(request.user_id), "Failed to clear conversation state");
        }

        let label = request.label();
        if label.is_idle() {
            return None;
        }

        log_state_transition(request.user_id, label, ConversationLabel::Default);
        Some(replies::CANCELED.to_string())
    }
}
