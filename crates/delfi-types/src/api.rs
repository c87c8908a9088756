use serde::{Deserialize, Serialize};

use crate::models::{Message, User};

// -- Snapshot --

/// Full dump of the user and message tables, as returned by the backend's
/// "get users" and "get messages" queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tables_are_empty() {
        let snap = Snapshot::from_json("{}").unwrap();
        assert!(snap.users.is_empty());
        assert!(snap.messages.is_empty());
    }

    #[test]
    fn parses_both_tables() {
        let snap = Snapshot::from_json(
            r#"{
                "users": [{"id":1,"name":"Bob","is_admin":false,"online":true}],
                "messages": [{"id":1,"sender":1,"sent":100,"text":"hi","reply":null}]
            }"#,
        )
        .unwrap();
        assert_eq!(snap.users[0].name, "Bob");
        assert_eq!(snap.messages[0].reply, None);
    }
}
