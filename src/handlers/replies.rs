//! Static bot replies
//!
//! Every user-visible message lives here. Failure replies never carry
//! internal error text.

use crate::utils::helpers::MAX_COLLECTION_NAME_LEN;

pub const WELCOME: &str = "Welcome to CollectorOuphe! I keep track of your trading card collections.\n\
    Use /register to create an account and /help to see what I can do.";

pub const NOT_REGISTERED: &str = "You are not registered yet. Use /register to create an account.";
pub const REGISTERED: &str = "You are registered! Use /help to see the available commands.";
pub const ALREADY_REGISTERED: &str = "You are already registered.";
pub const REGISTRATION_FAILED: &str = "Registration failed, please try again later.";

pub const BUSY: &str = "Finish or /cancel your current operation first.";
pub const TRY_AGAIN_LATER: &str = "Something went wrong, please try again later.";
pub const OPERATION_FAILED: &str = "The operation failed, please try again later.";
pub const CANCELED: &str = "Canceled.";
pub const USE_HELP: &str = "Use /help to see the available commands.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Use /help to see the available commands.";

pub const ASK_RENAME: &str = "Send the current name and the new name separated by a space, or /cancel.";
pub const ASK_DELETE: &str = "Send the name of the collection to delete, or /cancel.";
pub const RENAME_FORMAT: &str = "Use the old and the new name separated by a space.";
pub const NAME_EMPTY: &str = "Collection name cannot be empty.";
pub const COLLECTION_NOT_FOUND: &str = "Collection not found.";
pub const NO_COLLECTIONS: &str = "You have no collections yet. Create one with /collection_new.";

pub fn ask_create() -> String {
    format!(
        "Send the name of the new collection (up to {} characters), or /cancel.",
        MAX_COLLECTION_NAME_LEN
    )
}

pub fn name_too_long() -> String {
    format!("Collection name is too long, the limit is {} characters.", MAX_COLLECTION_NAME_LEN)
}

pub fn created(name: &str) -> String {
    format!("Collection \"{}\" created.", name)
}

pub fn renamed(old: &str, new: &str) -> String {
    format!("Collection \"{}\" renamed to \"{}\".", old, new)
}

pub fn deleted(name: &str) -> String {
    format!("Collection \"{}\" deleted.", name)
}

/// Bulleted list of collection names
pub fn collection_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut text = String::from("Your collections:");
    for name in names {
        text.push_str("\n• ");
        text.push_str(name);
    }
    text
}
