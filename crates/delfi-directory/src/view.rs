use delfi_types::{Message, MessageId, User};

use crate::lookup::{avatar_initials, resolve_message, resolve_sender};
use crate::{MessageMap, UserMap};

/// What a message's `reply` field resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTarget<'a> {
    /// Not a reply
    None,
    /// Reply to a message the client does not have
    Missing(MessageId),
    Found(&'a Message),
}

impl<'a> ReplyTarget<'a> {
    pub fn resolve(messages: &'a MessageMap, reply: Option<MessageId>) -> Self {
        match (reply, resolve_message(messages, reply)) {
            (None, _) => Self::None,
            (Some(_), Some(target)) => Self::Found(target),
            (Some(id), None) => Self::Missing(id),
        }
    }

    pub fn message(&self) -> Option<&'a Message> {
        match *self {
            Self::Found(m) => Some(m),
            _ => None,
        }
    }
}

/// A message with its sender, initials and reply target resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView<'a> {
    pub message: &'a Message,
    pub sender: Option<&'a User>,
    pub initials: Option<String>,
    pub reply: ReplyTarget<'a>,
}

impl<'a> MessageView<'a> {
    pub fn build(users: &'a UserMap, messages: &'a MessageMap, message: &'a Message) -> Self {
        let sender = resolve_sender(users, message);
        Self {
            message,
            sender,
            initials: avatar_initials(sender),
            reply: ReplyTarget::resolve(messages, message.reply),
        }
    }

    /// Sender of the reply target, if both resolve.
    pub fn reply_sender(&self, users: &'a UserMap) -> Option<&'a User> {
        self.reply.message().and_then(|m| resolve_sender(users, m))
    }
}
