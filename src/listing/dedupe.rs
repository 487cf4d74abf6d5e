use super::model::Event;
use crate::dates::ParsedInterval;
use chrono::NaiveDateTime;
use itertools::Itertools;
use std::collections::HashSet;
use tracing::trace;
use uuid::Uuid;

/// Stable id for an event: same title, venue and start always give the same id
pub fn event_id(title: &str, venue: &str, occurring_at: &ParsedInterval) -> Uuid {
    let name = format!(
        "{}|{}|{}",
        normalize_key(venue),
        normalize_key(title),
        occurring_at.start.format("%Y-%m-%dT%H:%M:%S")
    );

    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

fn normalize_key(text: &str) -> String {
    text.split_whitespace().join(" ").to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EventKey {
    title: String,
    venue: String,
    start: NaiveDateTime,
}

impl From<&Event> for EventKey {
    fn from(event: &Event) -> Self {
        Self {
            title: normalize_key(&event.title),
            venue: normalize_key(&event.venue),
            start: event.occurring_at.start,
        }
    }
}

/// What one scraping run has already accepted.
///
/// Create one per run and drop it afterwards; nothing leaks between runs.
#[derive(Debug)]
pub struct DedupeContext {
    run_id: Uuid,
    seen_events: HashSet<EventKey>,
    seen_links: HashSet<String>,
}

impl DedupeContext {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            seen_events: HashSet::new(),
            seen_links: HashSet::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn has_seen_link(&self, link: &str) -> bool {
        self.seen_links.contains(link)
    }

    /// Records the event, returning false when the run already has it
    pub fn admit(&mut self, event: &Event) -> bool {
        if !self.seen_events.insert(EventKey::from(event)) {
            trace!("Already have '{}' at {}", event.title, event.occurring_at.start);
            return false;
        }

        if let Some(link) = &event.link {
            self.seen_links.insert(link.to_string());
        }

        true
    }

    pub fn len(&self) -> usize {
        self.seen_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen_events.is_empty()
    }
}

impl Default for DedupeContext {
    fn default() -> Self {
        Self::new()
    }
}
