use delfi_directory::{Directory, MessageView, ReplyTarget, UserMap};
use delfi_types::Message;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const REPLY_PREVIEW_CHARS: usize = 40;

/// Transcript lines for one message: an optional reply line, then the message.
pub fn message_lines(view: &MessageView<'_>, users: &UserMap) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);

    match view.reply {
        ReplyTarget::None => {}
        ReplyTarget::Missing(id) => lines.push(format!("  ↳ reply to #{} (missing)", id)),
        ReplyTarget::Found(target) => {
            let name = view.reply_sender(users).map_or("-", |u| u.name.as_str());
            lines.push(format!("  ↳ reply to {}: {}", name, preview(target)));
        }
    }

    let msg = view.message;
    let (initials, name) = match view.sender {
        Some(user) => (
            view.initials.clone().unwrap_or_default(),
            if user.is_admin {
                format!("{}*", user.name)
            } else {
                user.name.clone()
            },
        ),
        None => ("-".to_string(), "-".to_string()),
    };

    let mut line = format!("[{}] ({}) {}: {}", timestamp(msg), initials, name, msg.text);
    if msg.edited.is_some() {
        line.push_str(" (edited)");
    }
    if let Some(file) = &msg.file {
        line.push_str(&format!(" [file: {}, {} bytes]", file.name, file.size));
    }
    lines.push(line);

    lines
}

/// Count and online-user summary printed after the transcript.
pub fn footer(dir: &Directory) -> String {
    let online: Vec<&str> = dir.online_users().iter().map(|u| u.name.as_str()).collect();
    let online = if online.is_empty() {
        "nobody".to_string()
    } else {
        online.join(", ")
    };
    format!("-- {} messages, online: {}", dir.message_count(), online)
}

fn timestamp(msg: &Message) -> String {
    msg.sent_at()
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| format!("@{}", msg.sent))
}

fn preview(msg: &Message) -> String {
    let mut chars = msg.text.chars();
    let mut out: String = chars.by_ref().take(REPLY_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use delfi_types::api::Snapshot;
    use delfi_types::{FileRef, User};

    fn directory() -> Directory {
        let mut bob = User::new(1, "Bob");
        bob.online = true;
        let mut root = User::new(2, "Root");
        root.is_admin = true;

        let mut edited = Message::new(4, 2, 4_000, "fixed typo");
        edited.edited = Some(5_000);

        Directory::from_snapshot(Snapshot {
            users: vec![bob, root],
            messages: vec![
                Message::new(1, 1, 1_000, "hi"),
                Message::new(2, 2, 2_000, "hello").replying_to(1),
                Message::new(3, 9, 3_000, "ghost").replying_to(99),
                edited.with_file(FileRef { id: 1, name: "a.png".into(), size: 12 }),
            ],
        })
        .unwrap()
    }

    fn render_all(dir: &Directory) -> Vec<String> {
        dir.transcript(0, usize::MAX)
            .iter()
            .flat_map(|v| message_lines(v, dir.users()))
            .collect()
    }

    #[test]
    fn renders_transcript() {
        let dir = directory();
        let lines = render_all(&dir);
        assert_eq!(
            lines,
            vec![
                "[1970-01-01 00:00:01] (Bo) Bob: hi",
                "  ↳ reply to Bob: hi",
                "[1970-01-01 00:00:02] (Ro) Root*: hello",
                "  ↳ reply to #99 (missing)",
                "[1970-01-01 00:00:03] (-) -: ghost",
                "[1970-01-01 00:00:04] (Ro) Root*: fixed typo (edited) [file: a.png, 12 bytes]",
            ]
        );
    }

    #[test]
    fn footer_lists_online_users() {
        let dir = directory();
        assert_eq!(footer(&dir), "-- 4 messages, online: Bob");
        assert_eq!(footer(&Directory::new()), "-- 0 messages, online: nobody");
    }

    #[test]
    fn long_reply_preview_is_truncated() {
        let msg = Message::new(1, 1, 0, "x".repeat(60));
        let p = preview(&msg);
        assert_eq!(p.chars().count(), REPLY_PREVIEW_CHARS + 1);
        assert!(p.ends_with('…'));
        assert_eq!(preview(&Message::new(2, 1, 0, "short")), "short");
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_raw() {
        assert_eq!(timestamp(&Message::new(1, 1, u64::MAX, "")), format!("@{}", u64::MAX));
    }
}
