//! Helper functions and utilities
//!
//! Input parsing and validation shared by the command handlers.

/// Maximum length of a collection name, in user-visible characters
pub const MAX_COLLECTION_NAME_LEN: usize = 20;

/// Outcome of validating a new collection name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck {
    Ok,
    Empty,
    TooLong,
}

/// Length of a string as the user sees it, not its UTF-8 byte count
pub fn display_len(text: &str) -> usize {
    text.chars().count()
}

/// Validate a name the user wants to give to a collection
pub fn validate_collection_name(name: &str) -> NameCheck {
    if name.trim().is_empty() {
        NameCheck::Empty
    } else if display_len(name) > MAX_COLLECTION_NAME_LEN {
        NameCheck::TooLong
    } else {
        NameCheck::Ok
    }
}

/// Split `"<old> <new>"` rename input into exactly two names
pub fn split_rename_input(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(old), Some(new), None) => Some((old, new)),
        _ => None,
    }
}

/// First whitespace-delimited token of a message, used to match commands
pub fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

/// Whether a message looks like a bot command
pub fn is_command(text: &str) -> bool {
    text.trim_start().starts_with('/')
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if display_len(text) <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
