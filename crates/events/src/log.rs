//! Append-only action log.

use serde::{Deserialize, Serialize};
use tracing::trace;

use freshstock_core::EntryId;

use crate::envelope::LogEntry;
use crate::event::Event;

/// Append-only, ordered record of events (oldest first).
///
/// Entries can be added but never removed or rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog<E> {
    entries: Vec<LogEntry<E>>,
}

impl<E> Default for ActionLog<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: Event> ActionLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, wrapping it into a [`LogEntry`].
    pub fn record(&mut self, event: E) -> &LogEntry<E> {
        let sequence_number = self.entries.len() as u64 + 1;
        let entry = LogEntry::new(
            EntryId::new(),
            sequence_number,
            event.event_type(),
            event.version(),
            event.occurred_at(),
            event,
        );
        trace!(
            sequence_number,
            action_type = entry.action_type(),
            "action recorded"
        );
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn record_all(&mut self, events: impl IntoIterator<Item = E>) {
        for event in events {
            self.record(event);
        }
    }
}

impl<E> ActionLog<E> {
    pub fn entries(&self) -> &[LogEntry<E>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry<E>> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry<E>> {
        self.entries.iter()
    }

    /// Entries whose action type equals `action_type`, in log order.
    pub fn of_type<'a>(&'a self, action_type: &'a str) -> impl Iterator<Item = &'a LogEntry<E>> {
        self.entries
            .iter()
            .filter(move |entry| entry.action_type() == action_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    enum Touch {
        Poke(u32),
        Prod,
    }

    impl Event for Touch {
        fn event_type(&self) -> &'static str {
            match self {
                Touch::Poke(_) => "POKE",
                Touch::Prod => "PROD",
            }
        }

        fn version(&self) -> u32 {
            1
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        }
    }

    #[test]
    fn record_assigns_sequence_and_type() {
        let mut log = ActionLog::new();
        assert!(log.is_empty());

        let first = log.record(Touch::Poke(1));
        assert_eq!(first.sequence_number(), 1);
        assert_eq!(first.action_type(), "POKE");
        assert_eq!(first.schema_version(), 1);

        log.record_all([Touch::Prod, Touch::Poke(2)]);
        assert_eq!(log.len(), 3);

        let seqs: Vec<u64> = log.iter().map(LogEntry::sequence_number).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(log.last().unwrap().payload(), &Touch::Poke(2));
        assert_eq!(log.last().cloned().unwrap().into_payload(), Touch::Poke(2));
    }

    #[test]
    fn timestamp_is_event_business_time() {
        let mut log = ActionLog::new();
        let entry = log.record(Touch::Prod);
        assert_eq!(entry.timestamp(), Touch::Prod.occurred_at());
    }

    #[test]
    fn of_type_filters_in_order() {
        let mut log = ActionLog::new();
        log.record_all([Touch::Poke(1), Touch::Prod, Touch::Poke(2)]);

        let pokes: Vec<&Touch> = log.of_type("POKE").map(LogEntry::payload).collect();
        assert_eq!(pokes, vec![&Touch::Poke(1), &Touch::Poke(2)]);
        assert_eq!(log.of_type("NOPE").count(), 0);
    }

    #[test]
    fn entries_serialize_with_type_field() {
        let mut log = ActionLog::new();
        log.record(Touch::Prod);
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json[0]["type"], "PROD");
        assert_eq!(json[0]["sequence_number"], 1);
    }
}
