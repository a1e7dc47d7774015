//! Banana inventory module.
//!
//! Business rules for a single perishable stock, implemented as deterministic
//! command/event logic over in-memory state (no IO, no storage).

pub mod config;
pub mod item;
pub mod manager;

pub use config::InventoryConfig;
pub use item::{Distribution, Item, Statistics};
pub use manager::{
    AddItem, DistributeItems, InventoryCommand, InventoryEvent, InventoryManager, ItemAdded,
    ItemRemoved, ItemsDistributed, ItemsSorted, RemoveItem, RemoveSpoiled, SortByFreshness,
    SpoiledRemoved,
};
