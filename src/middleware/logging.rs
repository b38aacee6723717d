//! Logging middleware
//!
//! Logs inbound messages and how long the bot took to handle them.

use std::time::Instant;
use teloxide::types::ChatId;
use tracing::{debug, info, warn, Span};
use crate::utils::helpers::{is_command, truncate_text};

/// Messages are truncated to this many characters in logs
const LOGGED_TEXT_LEN: usize = 64;

/// Handling slower than this is logged as a warning
const SLOW_MESSAGE_MS: u128 = 1000;

/// Log one inbound message
pub fn log_inbound(user_id: Option<i64>, chat_id: ChatId, text: &str) {
    let kind = if is_command(text) { "command" } else { "text" };
    info!(
        user_id = user_id,
        chat_id = chat_id.0,
        kind = kind,
        text = %truncate_text(text, LOGGED_TEXT_LEN),
        "Message received"
    );
}

/// Span the handling of one message runs in
///
/// Every event logged while the router handles the message carries the
/// sender's id through this span.
pub fn message_span(user_id: i64) -> Span {
    tracing::info_span!("message", user_id = user_id)
}

/// Measures how long one message takes to handle
pub struct MessageTimer {
    user_id: i64,
    start_time: Instant,
}

impl MessageTimer {
    pub fn start(user_id: i64) -> Self {
        Self {
            user_id,
            start_time: Instant::now(),
        }
    }

    /// Log the elapsed time; `replied` tells whether a reply was produced
    pub fn finish(self, replied: bool) {
        let duration_ms = self.start_time.elapsed().as_millis();

        if duration_ms > SLOW_MESSAGE_MS {
            warn!(user_id = self.user_id, duration_ms = duration_ms, "Slow message handling");
        } else {
            debug!(
                user_id = self.user_id,
                duration_ms = duration_ms,
                replied = replied,
                "Message handled"
            );
        }
    }
}
