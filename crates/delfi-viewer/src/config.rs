use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_SNAPSHOT: &str = "snapshot.json";
const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub snapshot: PathBuf,
    pub events: Option<PathBuf>,
    pub page_start: usize,
    pub page_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let snapshot = lookup("DELFI_SNAPSHOT").unwrap_or_else(|| DEFAULT_SNAPSHOT.into());
        let events = lookup("DELFI_EVENTS").filter(|p| !p.is_empty());

        let page_start = parse_usize(&lookup, "DELFI_PAGE_START")?.unwrap_or(0);
        let page_size = parse_usize(&lookup, "DELFI_PAGE_SIZE")?
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        Ok(Self {
            snapshot: PathBuf::from(snapshot),
            events: events.map(PathBuf::from),
            page_start,
            page_size,
        })
    }

    pub fn page_end(&self) -> usize {
        self.page_start.saturating_add(self.page_size)
    }
}

fn parse_usize(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<usize>> {
    lookup(key)
        .map(|v| {
            v.trim()
                .parse::<usize>()
                .with_context(|| format!("{} must be a non-negative integer, got {:?}", key, v))
        })
        .transpose()
}
