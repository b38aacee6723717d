//! Help command handler

use teloxide::utils::command::BotCommands;
use crate::utils::helpers::MAX_COLLECTION_NAME_LEN;
use super::Command;

/// Reply to /help
pub fn help_text() -> String {
    format!(
        "{}\n\nCollection names are limited to {} characters. Use /cancel to abort a command in progress.",
        Command::descriptions(),
        MAX_COLLECTION_NAME_LEN
    )
}
