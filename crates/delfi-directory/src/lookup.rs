//! Pure queries over caller-owned tables. Nothing here mutates input or logs.

use delfi_types::{Message, MessageId, User};

use crate::{MessageMap, UserMap};

/// Author of `message`, or `None` if the sender is not in `users`.
pub fn resolve_sender<'a>(users: &'a UserMap, message: &Message) -> Option<&'a User> {
    users.get(&message.sender)
}

/// Messages ascending by `sent`, ties broken by id.
pub fn ordered_messages(messages: &MessageMap) -> Vec<&Message> {
    let mut ordered: Vec<&Message> = messages.values().collect();
    ordered.sort_by_key(|m| (m.sent, m.id));
    ordered
}

/// Look up a message by optional id.
///
/// A `None` id means "not a reply" and returns `None` without touching the
/// map. A `Some` id that is not present also returns `None`; callers that need
/// to tell the two apart should check the id first (see [`crate::ReplyTarget`]).
pub fn resolve_message(messages: &MessageMap, id: Option<MessageId>) -> Option<&Message> {
    messages.get(&id?)
}

/// First two characters of the display name. Counts `char`s, not graphemes.
pub fn avatar_initials(user: Option<&User>) -> Option<String> {
    user.map(|u| u.name.chars().take(2).collect())
}
