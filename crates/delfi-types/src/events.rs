use serde::{Deserialize, Serialize};

use crate::models::{Message, MessageId, User, UserId};

/// Row-level changes from the backend's user and message tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DirectoryEvent {
    UserInserted(User),
    UserUpdated(User),
    UserRemoved { id: UserId },

    MessageInserted(Message),
    /// Edits arrive as a full replacement row
    MessageUpdated(Message),
    MessageRemoved { id: MessageId },
}

impl DirectoryEvent {
    /// Parse one line of a JSON-lines event log.
    pub fn from_json_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line.trim())
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserInserted(_) => "user_inserted",
            Self::UserUpdated(_) => "user_updated",
            Self::UserRemoved { .. } => "user_removed",
            Self::MessageInserted(_) => "message_inserted",
            Self::MessageUpdated(_) => "message_updated",
            Self::MessageRemoved { .. } => "message_removed",
        }
    }
}
