//! Delfi Directory
//!
//! Read-only lookups over the client's user and message tables, plus the
//! caller-side store that keeps those tables in sync with the backend feed.

pub mod error;
pub mod lookup;
pub mod store;
pub mod view;

use std::collections::HashMap;

use delfi_types::{Message, MessageId, User, UserId};

pub use error::{DirectoryError, Result};
pub use lookup::{avatar_initials, ordered_messages, resolve_message, resolve_sender};
pub use store::Directory;
pub use view::{MessageView, ReplyTarget};

pub type UserMap = HashMap<UserId, User>;
pub type MessageMap = HashMap<MessageId, Message>;
