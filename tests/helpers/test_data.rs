//! Test data builders

use teloxide::types::ChatId;
use CollectorOuphe::handlers::InboundMessage;
use CollectorOuphe::models::TelegramUser;

pub const BOT_USERNAME: &str = "ouphe_test_bot";

/// Registered test user
pub const ALICE: i64 = 100_001;
pub const ALICE_TOKEN: &str = "alice-jwt";

/// Second registered test user
pub const BOB: i64 = 100_002;
pub const BOB_TOKEN: &str = "bob-jwt";

/// Never registered unless a test registers them
pub const CAROL: i64 = 100_003;

pub fn test_user(id: i64) -> TelegramUser {
    TelegramUser {
        id,
        first_name: format!("User{}", id),
        last_name: None,
        username: Some(format!("user{}", id)),
    }
}

/// Private-chat text message from `user_id`
pub fn text_message(user_id: i64, text: &str) -> InboundMessage {
    InboundMessage::new(Some(test_user(user_id)), ChatId(user_id), text)
}
