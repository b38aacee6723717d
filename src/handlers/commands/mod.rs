//! Command handlers module
//!
//! This module contains the bot command set and the handlers behind it.

pub mod collections;
pub mod help;
pub mod start;

use teloxide::utils::command::BotCommands;
use crate::utils::helpers::{first_token, is_command};

pub use collections::CollectionHandler;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "CollectorOuphe commands:")]
pub enum Command {
    #[command(description = "Start the bot and show welcome message")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Register with the collector service")]
    Register,
    #[command(description = "List your collections")]
    Collections,
    #[command(description = "Create a new collection")]
    CollectionNew,
    #[command(description = "Rename a collection")]
    CollectionRename,
    #[command(description = "Delete a collection")]
    CollectionDelete,
    #[command(description = "Cancel the current operation")]
    Cancel,
}

/// What an inbound text turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// Starts with `/` but is not one of ours
    UnknownCommand,
    Text,
}

/// Classify a message; arguments after a command are ignored
pub fn classify(text: &str, bot_username: &str) -> Input {
    if !is_command(text) {
        return Input::Text;
    }

    match Command::parse(first_token(text), bot_username) {
        Ok(command) => Input::Command(command),
        Err(_) => Input::UnknownCommand,
    }
}
