//! CollectorOuphe Telegram Bot
//!
//! A Telegram bot for managing trading card collections kept by the
//! collector service. This library provides the conversation state machine
//! behind multi-step commands, the registration gate, and the collector
//! client the handlers call.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{OupheError, Result};

// Re-export main components for easy access
pub use handlers::{BotRouter, InboundMessage};
pub use services::ServiceFactory;
pub use state::{ConversationLabel, StateStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
