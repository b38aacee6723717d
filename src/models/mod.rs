//! Data models module
//!
//! Wire types of the collector service contract

pub mod user;
pub mod collection;

// Re-export commonly used models
pub use user::{TelegramUser, CheckUserRequest, CheckUserResponse, RegisterRequest, RegisterResponse};
pub use collection::{find_by_name, Collection, CreateCollectionRequest, RenameCollectionRequest, ErrorResponse};
