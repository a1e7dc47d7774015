use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use freshstock_core::EntryId;

/// Envelope for one recorded action.
///
/// - `sequence_number` is 1-based and strictly increasing within a log.
/// - `action_type` is the payload's [`crate::Event::event_type`] at record time.
/// - `schema_version` is the payload's [`crate::Event::version`].
/// - `timestamp` is the payload's business time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry<E> {
    entry_id: EntryId,

    /// Monotonically increasing position in the log.
    sequence_number: u64,

    #[serde(rename = "type")]
    action_type: String,
    schema_version: u32,
    timestamp: DateTime<Utc>,

    payload: E,
}

impl<E> LogEntry<E> {
    pub fn new(
        entry_id: EntryId,
        sequence_number: u64,
        action_type: impl Into<String>,
        schema_version: u32,
        timestamp: DateTime<Utc>,
        payload: E,
    ) -> Self {
        Self {
            entry_id,
            sequence_number,
            action_type: action_type.into(),
            schema_version,
            timestamp,
            payload,
        }
    }

    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
