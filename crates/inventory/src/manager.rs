use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use freshstock_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, IdSequence, ItemId,
};
use freshstock_events::{ActionLog, Event, LogEntry};

use crate::config::InventoryConfig;
use crate::item::{Distribution, Item, Statistics};

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItem {
    pub freshness: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DistributeItems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributeItems {
    pub users: Vec<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SortByFreshness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortByFreshness {
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveSpoiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveSpoiled {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    DistributeItems(DistributeItems),
    SortByFreshness(SortByFreshness),
    RemoveSpoiled(RemoveSpoiled),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item_id: ItemId,
    pub freshness: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved. `removed` is false when the id was not in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub item_id: ItemId,
    pub removed: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemsDistributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsDistributed {
    pub distributions: Vec<Distribution>,
    /// Whether the distributed items left the stock.
    pub taken_from_stock: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemsSorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsSorted {
    pub occurred_at: DateTime<Utc>,
}

/// Event: SpoiledRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoiledRemoved {
    /// Snapshots of the removed items, in their former stock order.
    pub items: Vec<Item>,
    pub threshold: f64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
    ItemsDistributed(ItemsDistributed),
    ItemsSorted(ItemsSorted),
    SpoiledRemoved(SpoiledRemoved),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemAdded(_) => "ADD",
            InventoryEvent::ItemRemoved(_) => "REMOVE",
            InventoryEvent::ItemsDistributed(_) => "DISTRIBUTE",
            InventoryEvent::ItemsSorted(_) => "SORT",
            InventoryEvent::SpoiledRemoved(_) => "REMOVE_SPOILED",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemAdded(e) => e.occurred_at,
            InventoryEvent::ItemRemoved(e) => e.occurred_at,
            InventoryEvent::ItemsDistributed(e) => e.occurred_at,
            InventoryEvent::ItemsSorted(e) => e.occurred_at,
            InventoryEvent::SpoiledRemoved(e) => e.occurred_at,
        }
    }
}

/// In-memory banana inventory with an append-only action log.
///
/// Every mutating call is decided against the current stock and the resulting
/// event is applied and recorded in one step, so the action log holds exactly
/// the changes the stock went through. A rejected call changes nothing and
/// records nothing.
#[derive(Debug, Clone)]
pub struct InventoryManager {
    stock: Stock,
    log: ActionLog<InventoryEvent>,
}

impl Default for InventoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryManager {
    pub fn new() -> Self {
        Self {
            stock: Stock::new(InventoryConfig::default()),
            log: ActionLog::new(),
        }
    }

    pub fn with_config(config: InventoryConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            stock: Stock::new(config),
            log: ActionLog::new(),
        })
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.stock.config
    }

    /// Number of events applied so far; equals the number of log entries.
    pub fn version(&self) -> u64 {
        self.stock.version()
    }

    /// Add an item with the given freshness and return its id.
    pub fn add_item(&mut self, freshness: f64) -> DomainResult<ItemId> {
        let cmd = AddItem {
            freshness,
            occurred_at: Utc::now(),
        };
        let added = self.stock.decide_add(&cmd).map_err(rejected)?;
        let item_id = added.item_id;
        self.commit(InventoryEvent::ItemAdded(added));
        Ok(item_id)
    }

    /// Add an item with the configured default freshness.
    pub fn add_default_item(&mut self) -> DomainResult<ItemId> {
        self.add_item(self.stock.config.default_freshness)
    }

    /// Remove the item with `item_id`. Missing ids are a silent no-op.
    pub fn remove_item(&mut self, item_id: ItemId) {
        let cmd = RemoveItem {
            item_id,
            occurred_at: Utc::now(),
        };
        if let Some(removed) = self.stock.decide_remove(&cmd) {
            self.commit(InventoryEvent::ItemRemoved(removed));
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.stock.items
    }

    /// In-place access to the stocked items. Changes made through this
    /// slice (e.g. freshness decay) are seen by every later operation.
    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.stock.items
    }

    pub fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.stock.item(item_id)
    }

    pub fn item_mut(&mut self, item_id: ItemId) -> Option<&mut Item> {
        self.stock
            .items
            .iter_mut()
            .find(|item| item.id_typed() == item_id)
    }

    pub fn len(&self) -> usize {
        self.stock.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.items.is_empty()
    }

    /// Pair the first `users.len()` items, in stock order, with `users`.
    pub fn distribute_items<S: AsRef<str>>(&mut self, users: &[S]) -> DomainResult<Vec<Distribution>> {
        let cmd = DistributeItems {
            users: users.iter().map(|u| u.as_ref().to_string()).collect(),
            occurred_at: Utc::now(),
        };
        let distributed = self.stock.decide_distribute(&cmd).map_err(rejected)?;
        let distributions = distributed.distributions.clone();
        self.commit(InventoryEvent::ItemsDistributed(distributed));
        Ok(distributions)
    }

    /// Stable sort, freshest first.
    pub fn sort_by_freshness(&mut self) {
        self.commit(InventoryEvent::ItemsSorted(ItemsSorted {
            occurred_at: Utc::now(),
        }));
    }

    /// Items that `remove_spoiled` would take out, in stock order.
    pub fn spoiled_items(&self) -> Vec<&Item> {
        self.stock.spoiled_items()
    }

    /// Remove every spoiled item and return them in their former order.
    pub fn remove_spoiled(&mut self) -> Vec<Item> {
        let cmd = RemoveSpoiled {
            occurred_at: Utc::now(),
        };
        let swept = self.stock.decide_remove_spoiled(&cmd);
        let items = swept.items.clone();
        self.commit(InventoryEvent::SpoiledRemoved(swept));
        items
    }

    /// Run an arbitrary inventory command and return the recorded events.
    pub fn execute(&mut self, command: &InventoryCommand) -> DomainResult<Vec<InventoryEvent>> {
        let events = freshstock_events::execute(&mut self.stock, command).map_err(rejected)?;
        for ev in &events {
            self.record(ev.clone());
        }
        Ok(events)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_items(&self.stock.items)
    }

    /// Every recorded action, oldest first.
    pub fn actions_log(&self) -> &[LogEntry<InventoryEvent>] {
        self.log.entries()
    }

    pub fn action_log(&self) -> &ActionLog<InventoryEvent> {
        &self.log
    }

    fn commit(&mut self, event: InventoryEvent) {
        self.stock.apply(&event);
        self.record(event);
    }

    fn record(&mut self, event: InventoryEvent) {
        info!(
            action = event.event_type(),
            version = self.stock.version(),
            "inventory action applied"
        );
        self.log.record(event);
    }
}

fn rejected(err: DomainError) -> DomainError {
    warn!(error = %err, "inventory command rejected");
    err
}

/// Item storage evolved by inventory events.
///
/// Private to this module: the only way to apply an event is through
/// [`InventoryManager`], which records it in the action log.
#[derive(Debug, Clone)]
struct Stock {
    config: InventoryConfig,
    items: Vec<Item>,
    ids: IdSequence,
    version: u64,
}

impl Stock {
    fn new(config: InventoryConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            ids: IdSequence::new(),
            version: 0,
        }
    }

    fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id_typed() == item_id)
    }

    fn spoiled_items(&self) -> Vec<&Item> {
        let threshold = self.config.spoiled_threshold;
        self.items
            .iter()
            .filter(|item| item.is_spoiled(threshold))
            .collect()
    }

    fn decide_add(&self, cmd: &AddItem) -> DomainResult<ItemAdded> {
        if !self.config.accepts(cmd.freshness) {
            return Err(DomainError::validation(format!(
                "freshness must be between {} and {}",
                self.config.min_freshness, self.config.max_freshness
            )));
        }
        Ok(ItemAdded {
            item_id: self.ids.peek(),
            freshness: cmd.freshness,
            occurred_at: cmd.occurred_at,
        })
    }

    /// `None` when the id is unknown and missing removals are not logged.
    fn decide_remove(&self, cmd: &RemoveItem) -> Option<ItemRemoved> {
        let removed = self.item(cmd.item_id).is_some();
        if !removed {
            debug!(item_id = %cmd.item_id, "remove requested for unknown item");
            if !self.config.log_missing_removals {
                return None;
            }
        }
        Some(ItemRemoved {
            item_id: cmd.item_id,
            removed,
            occurred_at: cmd.occurred_at,
        })
    }

    fn decide_distribute(&self, cmd: &DistributeItems) -> DomainResult<ItemsDistributed> {
        if cmd.users.len() > self.items.len() {
            return Err(DomainError::insufficient_inventory(
                cmd.users.len(),
                self.items.len(),
            ));
        }
        let distributions = cmd
            .users
            .iter()
            .zip(&self.items)
            .map(|(user, item)| Distribution {
                user: user.clone(),
                item: item.clone(),
            })
            .collect();
        Ok(ItemsDistributed {
            distributions,
            taken_from_stock: self.config.remove_on_distribute,
            occurred_at: cmd.occurred_at,
        })
    }

    fn decide_remove_spoiled(&self, cmd: &RemoveSpoiled) -> SpoiledRemoved {
        SpoiledRemoved {
            items: self.spoiled_items().into_iter().cloned().collect(),
            threshold: self.config.spoiled_threshold,
            occurred_at: cmd.occurred_at,
        }
    }
}

impl AggregateRoot for Stock {
    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Stock {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ItemAdded(e) => {
                self.ids.observe(e.item_id);
                self.items.push(Item::new(e.item_id, e.freshness));
            }
            InventoryEvent::ItemRemoved(e) => {
                if e.removed {
                    self.items.retain(|item| item.id_typed() != e.item_id);
                }
            }
            InventoryEvent::ItemsDistributed(e) => {
                if e.taken_from_stock {
                    self.items.retain(|item| {
                        !e.distributions
                            .iter()
                            .any(|d| d.item.id_typed() == item.id_typed())
                    });
                }
            }
            InventoryEvent::ItemsSorted(_) => {
                // `sort_by` is stable, so equal freshness keeps insertion order.
                self.items
                    .sort_by(|a, b| b.freshness().total_cmp(&a.freshness()));
            }
            InventoryEvent::SpoiledRemoved(e) => {
                self.items.retain(|item| {
                    !e.items.iter().any(|gone| gone.id_typed() == item.id_typed())
                });
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let event = match command {
            InventoryCommand::AddItem(cmd) => InventoryEvent::ItemAdded(self.decide_add(cmd)?),
            InventoryCommand::RemoveItem(cmd) => match self.decide_remove(cmd) {
                Some(e) => InventoryEvent::ItemRemoved(e),
                None => return Ok(Vec::new()),
            },
            InventoryCommand::DistributeItems(cmd) => {
                InventoryEvent::ItemsDistributed(self.decide_distribute(cmd)?)
            }
            InventoryCommand::SortByFreshness(cmd) => InventoryEvent::ItemsSorted(ItemsSorted {
                occurred_at: cmd.occurred_at,
            }),
            InventoryCommand::RemoveSpoiled(cmd) => {
                InventoryEvent::SpoiledRemoved(self.decide_remove_spoiled(cmd))
            }
        };
        Ok(vec![event])
    }
}
