use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = u32;
pub type MessageId = u32;
pub type FileId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Base64-encoded avatar image. Stored and served elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    // Early clients sent `id_admin`.
    #[serde(default, alias = "id_admin")]
    pub is_admin: bool,
    #[serde(default)]
    pub online: bool,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: None,
            is_admin: false,
            online: false,
        }
    }

    /// Decode the avatar image. `Ok(None)` when the user has no avatar.
    pub fn avatar_bytes(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        self.avatar.as_deref().map(|a| B64.decode(a)).transpose()
    }
}

/// A chat message as seen by the client.
///
/// `sent` and `edited` are milliseconds since the Unix epoch. `sender` and
/// `reply` are not enforced foreign keys: either may point at a record the
/// client does not have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: UserId,
    pub sent: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<MessageId>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRef>,
}

impl Message {
    pub fn new(id: MessageId, sender: UserId, sent: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            sender,
            sent,
            edited: None,
            reply: None,
            text: text.into(),
            file: None,
        }
    }

    pub fn replying_to(mut self, reply: MessageId) -> Self {
        self.reply = Some(reply);
        self
    }

    pub fn with_file(mut self, file: FileRef) -> Self {
        self.file = Some(file);
        self
    }

    /// `None` if the timestamp is outside chrono's representable range.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.sent)
    }

    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        self.edited.and_then(millis_to_utc)
    }
}

fn millis_to_utc(millis: u64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(i64::try_from(millis).ok()?)
}

/// Metadata pointer to an attachment. The content lives in external storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub id: FileId,
    pub name: String,
    pub size: u64,
}

/// Progress of an in-flight send, reported by the backend bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SendPayload {
    pub ready: u64,
    #[serde(alias = "lenght")]
    pub length: u64,
}
