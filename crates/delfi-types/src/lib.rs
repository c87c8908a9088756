//! Data shapes shared between the directory helpers and whatever feeds them.

pub mod api;
pub mod events;
pub mod models;

pub use models::{FileId, FileRef, Message, MessageId, SendPayload, User, UserId};
