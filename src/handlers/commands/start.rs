//! Start command handler

use tracing::info;
use crate::handlers::replies;
use crate::models::TelegramUser;

/// Reply to /start
pub fn handle_start(user: &TelegramUser) -> String {
    info!(user_id = user.id, username = ?user.username, "User started bot");
    replies::WELCOME.to_string()
}
