use serde::{Deserialize, Serialize};

use freshstock_core::{Entity, ItemId, ValueObject};

/// A single banana in stock.
///
/// `freshness` is range-checked when the item is added; afterwards callers
/// holding a `&mut Item` may set it freely (decay, damage, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    freshness: f64,
}

impl Item {
    pub(crate) fn new(id: ItemId, freshness: f64) -> Self {
        Self { id, freshness }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn freshness(&self) -> f64 {
        self.freshness
    }

    pub fn set_freshness(&mut self, freshness: f64) {
        self.freshness = freshness;
    }

    pub fn is_spoiled(&self, threshold: f64) -> bool {
        self.freshness <= threshold
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One user paired with the item handed to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub user: String,
    /// Snapshot of the item at distribution time.
    pub item: Item,
}

impl ValueObject for Distribution {}

/// Summary of the current stock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    /// Arithmetic mean; `0.0` when there are no items.
    pub average_freshness: f64,
}

impl Statistics {
    pub fn from_items(items: &[Item]) -> Self {
        let total = items.len();
        let average_freshness = if total == 0 {
            0.0
        } else {
            items.iter().map(Item::freshness).sum::<f64>() / total as f64
        };
        Self {
            total,
            average_freshness,
        }
    }
}

impl ValueObject for Statistics {}
