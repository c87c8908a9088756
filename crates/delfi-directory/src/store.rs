use delfi_types::api::Snapshot;
use delfi_types::events::DirectoryEvent;
use delfi_types::{Message, MessageId, User, UserId};
use tracing::{debug, info};

use crate::error::{DirectoryError, Result};
use crate::lookup::ordered_messages;
use crate::view::MessageView;
use crate::{MessageMap, UserMap};

/// Client-side copy of the user and message tables.
///
/// Owns both maps and keeps ids unique. Every read goes through the pure
/// helpers in [`crate::lookup`].
#[derive(Debug, Default, Clone)]
pub struct Directory {
    users: UserMap,
    messages: MessageMap,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a full table dump. Fails on the first duplicate id.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut dir = Self::new();
        for user in snapshot.users {
            dir.insert_user(user)?;
        }
        for message in snapshot.messages {
            dir.insert_message(message)?;
        }

        info!(
            "Directory loaded: {} users, {} messages",
            dir.users.len(),
            dir.messages.len()
        );
        Ok(dir)
    }

    pub fn users(&self) -> &UserMap {
        &self.users
    }

    pub fn messages(&self) -> &MessageMap {
        &self.messages
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(&id)
    }

    // -- Change feed --

    /// Apply one change from the backend. A rejected event leaves the
    /// directory untouched.
    pub fn apply(&mut self, event: DirectoryEvent) -> Result<()> {
        let kind = event.kind();
        let result = match event {
            DirectoryEvent::UserInserted(user) => self.insert_user(user),
            DirectoryEvent::UserUpdated(user) => self.update_user(user),
            DirectoryEvent::UserRemoved { id } => self.remove_user(id).map(drop),
            DirectoryEvent::MessageInserted(message) => self.insert_message(message),
            DirectoryEvent::MessageUpdated(message) => self.update_message(message),
            DirectoryEvent::MessageRemoved { id } => self.remove_message(id).map(drop),
        };

        if let Err(ref e) = result {
            debug!("Rejected {} event: {}", kind, e);
        }
        result
    }

    // -- Users --

    pub fn insert_user(&mut self, user: User) -> Result<()> {
        if self.users.contains_key(&user.id) {
            return Err(DirectoryError::DuplicateUser(user.id));
        }
        debug!("User {} inserted", user.id);
        self.users.insert(user.id, user);
        Ok(())
    }

    pub fn update_user(&mut self, user: User) -> Result<()> {
        let slot = self
            .users
            .get_mut(&user.id)
            .ok_or(DirectoryError::UnknownUser(user.id))?;
        debug!("User {} updated", user.id);
        *slot = user;
        Ok(())
    }

    /// Messages by the removed user are kept; their sender becomes unresolved.
    pub fn remove_user(&mut self, id: UserId) -> Result<User> {
        let user = self.users.remove(&id).ok_or(DirectoryError::UnknownUser(id))?;
        debug!("User {} removed", id);
        Ok(user)
    }

    /// All users by id.
    pub fn user_list(&self) -> Vec<&User> {
        let mut list: Vec<&User> = self.users.values().collect();
        list.sort_by_key(|u| u.id);
        list
    }

    /// Online users by name, then id.
    pub fn online_users(&self) -> Vec<&User> {
        let mut list: Vec<&User> = self.users.values().filter(|u| u.online).collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        list
    }

    // -- Messages --

    pub fn insert_message(&mut self, message: Message) -> Result<()> {
        if self.messages.contains_key(&message.id) {
            return Err(DirectoryError::DuplicateMessage(message.id));
        }
        debug!("Message {} inserted", message.id);
        self.messages.insert(message.id, message);
        Ok(())
    }

    pub fn update_message(&mut self, message: Message) -> Result<()> {
        let slot = self
            .messages
            .get_mut(&message.id)
            .ok_or(DirectoryError::UnknownMessage(message.id))?;
        debug!("Message {} updated", message.id);
        *slot = message;
        Ok(())
    }

    /// Replies to the removed message are kept and become dangling.
    pub fn remove_message(&mut self, id: MessageId) -> Result<Message> {
        let message = self
            .messages
            .remove(&id)
            .ok_or(DirectoryError::UnknownMessage(id))?;
        debug!("Message {} removed", id);
        Ok(message)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// `[start, end)` clamped to the message list: `end <= len`, `start <= end`.
    pub fn page_bounds(&self, start: usize, end: usize) -> (usize, usize) {
        let end = end.min(self.messages.len());
        (start.min(end), end)
    }

    /// Slice `[start, end)` of the chronological message list. Both bounds
    /// are clamped to the list, so out-of-range requests give an empty page.
    pub fn page(&self, start: usize, end: usize) -> Vec<&Message> {
        let (start, end) = self.page_bounds(start, end);
        let mut ordered = ordered_messages(&self.messages);
        ordered.truncate(end);
        ordered.drain(..start);
        ordered
    }

    /// Messages replying to `id`, oldest first.
    pub fn replies_to(&self, id: MessageId) -> Vec<&Message> {
        ordered_messages(&self.messages)
            .into_iter()
            .filter(|m| m.reply == Some(id))
            .collect()
    }

    /// Render-ready views over [`Directory::page`].
    pub fn transcript(&self, start: usize, end: usize) -> Vec<MessageView<'_>> {
        self.page(start, end)
            .into_iter()
            .map(|m| MessageView::build(&self.users, &self.messages, m))
            .collect()
    }
}
