//! Message handlers module
//!
//! Free text is the answer to whichever ask step left the current label.

use tracing::debug;
use crate::handlers::commands::CollectionHandler;
use crate::handlers::replies;
use crate::state::{ConversationLabel, PendingRequest};

/// Route a non-command message on the attached label
pub async fn handle_text(collections: &CollectionHandler, request: &PendingRequest) -> Option<String> {
    match request.label() {
        ConversationLabel::Default => {
            debug!(user_id = request.user_id, "Free text without an active flow");
            Some(replies::USE_HELP.to_string())
        }
        ConversationLabel::AwaitingCreateName => collections.respond_create(request).await,
        ConversationLabel::AwaitingRenameNames => collections.respond_rename(request).await,
        ConversationLabel::AwaitingDeleteName => collections.respond_delete(request).await,
    }
}
