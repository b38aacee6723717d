//! State management module
//!
//! This module handles per-user conversation labels and the context that
//! carries them to the handlers.

pub mod context;
pub mod label;
pub mod locks;
pub mod storage;

// Re-export commonly used state components
pub use context::{AuthToken, PendingRequest, SessionContext};
pub use label::{ConversationLabel, UserState};
pub use locks::UserLocks;
pub use storage::{MemoryStateStore, RedisStateStore, StateStore};
