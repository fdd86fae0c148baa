//! Notifications from the core to the presentation layer
//!
//! Every callback is fire-and-forget: the core never reads a result back and
//! behaves the same whether or not anything is listening.

use crate::catalog::Content;
use crate::grid::Cell;
use crate::progression::LayerReward;
use crate::shop::{PurchaseError, ShopItem};

/// Presentation hooks
pub trait GameEvents {
    /// A cell broke and revealed its content
    fn on_content_revealed(&mut self, _cell: &Cell, _content: Content) {}

    /// Every cell of the layer at `depth` is broken; reward already granted
    fn on_layer_complete(&mut self, _depth: u32, _reward: LayerReward) {}

    /// An item could not be stored
    fn on_inventory_full(&mut self) {}

    fn on_purchase_result(&mut self, _item: &ShopItem, _result: &Result<String, PurchaseError>) {}
}

/// Listener that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEvents;

impl GameEvents for NullEvents {}

/// Recorded notification
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ContentRevealed { index: usize, content: Content },
    LayerComplete { depth: u32, reward: LayerReward },
    InventoryFull,
    Purchase { item_id: String, result: Result<String, PurchaseError> },
}

/// Listener that keeps every notification, in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn layer_completions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::LayerComplete { .. }))
            .count()
    }
}

impl GameEvents for EventLog {
    fn on_content_revealed(&mut self, cell: &Cell, content: Content) {
        self.events.push(GameEvent::ContentRevealed {
            index: cell.index,
            content,
        });
    }

    fn on_layer_complete(&mut self, depth: u32, reward: LayerReward) {
        self.events.push(GameEvent::LayerComplete { depth, reward });
    }

    fn on_inventory_full(&mut self) {
        self.events.push(GameEvent::InventoryFull);
    }

    fn on_purchase_result(&mut self, item: &ShopItem, result: &Result<String, PurchaseError>) {
        self.events.push(GameEvent::Purchase {
            item_id: item.id.to_string(),
            result: result.clone(),
        });
    }
}
