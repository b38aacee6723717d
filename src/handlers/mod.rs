//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Message handlers for free-text answers
//! - The router that runs a message through middleware and handlers

pub mod commands;
pub mod messages;
pub mod replies;
pub mod router;

// Re-export commonly used handler types
pub use commands::{CollectionHandler, Command};
pub use router::{BotRouter, InboundMessage};
