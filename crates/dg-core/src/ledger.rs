//! Resource ledger
//!
//! Aggregate counters kept alongside the inventory, and the routing that
//! records a revealed cell's content in both.

use serde::{Deserialize, Serialize};

use crate::catalog::{Content, ResourceKind};
use crate::events::GameEvents;
use crate::inventory::InventoryItem;
use crate::state::GameState;

/// Running totals shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceCounters {
    pub gems: u32,
    pub stone: u32,
    pub dirt: u32,
    pub ore: u32,
}

impl ResourceCounters {
    pub fn resource(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Stone => self.stone,
            ResourceKind::Dirt => self.dirt,
            ResourceKind::Ore => self.ore,
        }
    }

    pub fn resource_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Dirt => &mut self.dirt,
            ResourceKind::Ore => &mut self.ore,
        }
    }

    pub fn total(&self) -> u32 {
        self.gems + self.stone + self.dirt + self.ore
    }
}

/// Record a revealed cell's content
///
/// Gems and resources bump their counter and stack one unit into the
/// inventory; special items only go to the inventory. The counter is bumped
/// even when the inventory refuses the item.
pub fn grant_content(state: &mut GameState, content: Content, events: &mut dyn GameEvents) {
    match content {
        Content::Gem(_) => {
            state.resources.gems += 1;
            state.stats.total_resources += 1;
        }
        Content::Resource(kind) => {
            *state.resources.resource_mut(kind) += 1;
            state.stats.total_resources += 1;
        }
        Content::Special(_) => {}
    }

    store_item(state, InventoryItem::from_content(content, 1), events);
}

/// Add an item to the inventory, notifying the listener on refusal
pub(crate) fn store_item(
    state: &mut GameState,
    item: InventoryItem,
    events: &mut dyn GameEvents,
) -> bool {
    match state.inventory.add(item) {
        Ok(_) => true,
        Err(err) => {
            log::debug!("inventory refused item: {}", err);
            events.on_inventory_full();
            false
        }
    }
}
