//! Conversation labels
//!
//! The closed set of states a user's conversation can be in, and the stored
//! per-user record.

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::errors::OupheError;

/// Name of the current conversational state of one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationLabel {
    /// Idle: no multi-step command in flight
    #[default]
    Default,
    AwaitingCreateName,
    AwaitingRenameNames,
    AwaitingDeleteName,
}

impl ConversationLabel {
    /// Stable string used when the label is persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationLabel::Default => "default",
            ConversationLabel::AwaitingCreateName => "awaiting_create_name",
            ConversationLabel::AwaitingRenameNames => "awaiting_rename_names",
            ConversationLabel::AwaitingDeleteName => "awaiting_delete_name",
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == ConversationLabel::Default
    }
}

impl fmt::Display for ConversationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationLabel {
    type Err = OupheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ConversationLabel::Default),
            "awaiting_create_name" => Ok(ConversationLabel::AwaitingCreateName),
            "awaiting_rename_names" => Ok(ConversationLabel::AwaitingRenameNames),
            "awaiting_delete_name" => Ok(ConversationLabel::AwaitingDeleteName),
            other => Err(OupheError::UnknownLabel(other.to_string())),
        }
    }
}

/// Stored conversation state of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub identity: i64,
    pub label: ConversationLabel,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserState {
    pub fn new(identity: i64, label: ConversationLabel) -> Self {
        Self {
            identity,
            label,
            expires_at: None,
        }
    }

    /// Attach an absolute expiry computed from a time-to-live
    pub fn expiring_in(mut self, ttl: chrono::Duration) -> Self {
        self.expires_at = Some(Utc::now() + ttl);
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.map_or(false, |at| Utc::now() >= at)
    }
}
