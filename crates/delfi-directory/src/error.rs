use delfi_types::{MessageId, UserId};
use thiserror::Error;

/// Rejections from the directory store. Lookups never fail; they return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("user {0} already exists")]
    DuplicateUser(UserId),

    #[error("message {0} already exists")]
    DuplicateMessage(MessageId),

    #[error("unknown user {0}")]
    UnknownUser(UserId),

    #[error("unknown message {0}")]
    UnknownMessage(MessageId),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
