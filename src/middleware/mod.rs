//! Middleware module
//!
//! This module contains the stages every message passes before a handler:
//! registration, conversation state and logging.

pub mod auth;
pub mod conversation;
pub mod logging;

// Re-export commonly used middleware
pub use auth::{GateDecision, RegistrationGate};
pub use conversation::ConversationMiddleware;
pub use logging::{log_inbound, message_span, MessageTimer};
