//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an inventory item.
///
/// Item ids are small sequential integers handed out by an [`IdSequence`];
/// they are never reused within the sequence's lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("ItemId: {e}")))?;
        Ok(Self(raw))
    }
}

/// Monotonic generator for [`ItemId`]s. The first id issued is `1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id that the next call to [`IdSequence::next_id`] will return.
    pub fn peek(&self) -> ItemId {
        ItemId(self.last + 1)
    }

    pub fn next_id(&mut self) -> ItemId {
        self.last += 1;
        ItemId(self.last)
    }

    /// Advance past `id` if it was issued elsewhere (e.g. by an applied event).
    pub fn observe(&mut self, id: ItemId) {
        self.last = self.last.max(id.0);
    }
}

/// Identifier of an entry in an action log.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(EntryId, "EntryId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic_and_starts_at_one() {
        let mut seq = IdSequence::new();
        assert_eq!(seq.peek(), ItemId::from_raw(1));
        let a = seq.next_id();
        let b = seq.next_id();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert!(a < b);
    }

    #[test]
    fn observe_never_moves_backwards() {
        let mut seq = IdSequence::new();
        seq.observe(ItemId::from_raw(5));
        seq.observe(ItemId::from_raw(2));
        assert_eq!(seq.next_id().get(), 6);
    }

    #[test]
    fn item_id_parses_and_rejects_garbage() {
        assert_eq!("42".parse::<ItemId>().unwrap(), ItemId::from_raw(42));
        assert!(matches!(
            "banana".parse::<ItemId>(),
            Err(DomainError::InvalidId(msg)) if msg.starts_with("ItemId")
        ));
    }

    #[test]
    fn entry_id_round_trips_through_display() {
        let id = EntryId::new();
        let parsed: EntryId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert_eq!(EntryId::from_uuid(*id.as_uuid()), id);
        assert_eq!(id.as_uuid().get_version_num(), 7);
        assert!("not-a-uuid".parse::<EntryId>().is_err());
    }

    #[test]
    fn item_id_serializes_transparently() {
        let json = serde_json::to_string(&ItemId::from_raw(7)).unwrap();
        assert_eq!(json, "7");
    }
}
