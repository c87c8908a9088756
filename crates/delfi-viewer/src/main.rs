mod config;
mod render;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use delfi_directory::Directory;
use delfi_types::UserId;
use delfi_types::api::Snapshot;
use delfi_types::events::DirectoryEvent;

use crate::config::Config;

fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging; stdout is reserved for the transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delfi=info,delfi_directory=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let mut dir = load_snapshot(&config.snapshot)?;
    if let Some(events) = &config.events {
        replay_events(&mut dir, events)?;
    }

    let (start, end) = dir.page_bounds(config.page_start, config.page_end());
    info!("Rendering messages {}..{} of {}", start, end, dir.message_count());

    for view in dir.transcript(start, end) {
        for line in render::message_lines(&view, dir.users()) {
            println!("{}", line);
        }
    }
    println!("{}", render::footer(&dir));

    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Directory> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_json(&json)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    let dir = Directory::from_snapshot(snapshot)
        .with_context(|| format!("loading snapshot {}", path.display()))?;

    for id in undecodable_avatars(&dir) {
        warn!("{}: user {} has an undecodable avatar", path.display(), id);
    }
    Ok(dir)
}

/// Users whose avatar is present but not valid base64, by id.
fn undecodable_avatars(dir: &Directory) -> Vec<UserId> {
    dir.user_list()
        .into_iter()
        .filter(|u| u.avatar_bytes().is_err())
        .map(|u| u.id)
        .collect()
}

fn replay_events(dir: &mut Directory, path: &Path) -> Result<()> {
    let log = fs::read_to_string(path)
        .with_context(|| format!("reading event log {}", path.display()))?;
    let stats = replay_log(dir, &log, &path.display().to_string())?;

    info!("Replayed {} events ({} skipped)", stats.applied, stats.skipped);
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ReplayStats {
    applied: usize,
    skipped: usize,
}

/// Replay a JSON-lines event log. Blank lines are ignored, malformed lines
/// abort with `<source>:<line>:`, and events the directory rejects are logged
/// and skipped.
fn replay_log(dir: &mut Directory, log: &str, source: &str) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    for (idx, line) in log.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let event = DirectoryEvent::from_json_line(line)
            .with_context(|| format!("{}:{}: malformed event", source, idx + 1))?;
        match dir.apply(event) {
            Ok(()) => stats.applied += 1,
            Err(e) => {
                warn!("{}:{}: skipped: {}", source, idx + 1, e);
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delfi_types::{Message, User};

    fn directory() -> Directory {
        Directory::from_snapshot(Snapshot {
            users: vec![User::new(1, "Bob")],
            messages: vec![Message::new(1, 1, 100, "hi")],
        })
        .unwrap()
    }

    #[test]
    fn rejected_event_is_skipped() {
        let mut dir = directory();
        let log = concat!(
            r#"{"type":"UserRemoved","data":{"id":42}}"#,
            "\n",
            r#"{"type":"MessageInserted","data":{"id":2,"sender":1,"sent":200,"text":"yo"}}"#,
        );

        let stats = replay_log(&mut dir, log, "feed.jsonl").unwrap();
        assert_eq!(stats, ReplayStats { applied: 1, skipped: 1 });
        assert_eq!(dir.user_list().len(), 1);
        assert_eq!(dir.message_count(), 2);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut dir = directory();
        let log = "\n   \n{\"type\":\"MessageRemoved\",\"data\":{\"id\":1}}\n\n";

        let stats = replay_log(&mut dir, log, "feed.jsonl").unwrap();
        assert_eq!(stats, ReplayStats { applied: 1, skipped: 0 });
        assert_eq!(dir.message_count(), 0);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let mut dir = directory();
        let log = concat!(
            r#"{"type":"UserRemoved","data":{"id":42}}"#,
            "\n\n",
            r#"{"type":"Bogus"}"#,
            "\n",
            r#"{"type":"MessageRemoved","data":{"id":1}}"#,
        );

        let err = replay_log(&mut dir, log, "feed.jsonl").unwrap_err();
        assert!(err.to_string().contains("feed.jsonl:3:"), "got {}", err);
        // Lines after the malformed one are not applied.
        assert_eq!(dir.message_count(), 1);
    }

    #[test]
    fn undecodable_avatars_are_reported() {
        let mut ok = User::new(1, "Bob");
        ok.avatar = Some("aGk=".into());
        let mut bad = User::new(2, "Amy");
        bad.avatar = Some("%%%".into());
        let none = User::new(3, "Cy");

        let dir = Directory::from_snapshot(Snapshot {
            users: vec![ok, bad, none],
            messages: vec![],
        })
        .unwrap();
        assert_eq!(undecodable_avatars(&dir), vec![2]);
    }
}
