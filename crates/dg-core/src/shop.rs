//! Shop
//!
//! Static upgrade catalogue paid for in gems. An item is offered while the
//! player meets its level and depth requirements and has not bought it
//! `max_level` times.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::catalog::{Content, SpecialKind};
use crate::consts::SLOTS_PER_SPACE_UPGRADE;
use crate::events::GameEvents;
use crate::inventory::InventoryItem;
use crate::state::GameState;

/// Shop tabs
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShopCategory {
    #[default]
    All,
    Tools,
    Upgrades,
    Items,
}

/// What a purchase does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEffect {
    /// Raise tool power and bump tool level by one
    UpgradeTool { power: u32 },
    /// Add bag upgrade levels (10 slots each)
    ExpandInventory { upgrades: u32 },
    /// Put a special item in the inventory
    GrantSpecial(SpecialKind),
}

/// Shop catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub glyph: &'static str,
    /// Price in gems
    pub cost: u32,
    pub category: ShopCategory,
    /// Minimum tool level (and depth) to be offered
    pub required_level: u32,
    /// Purchase limit; `None` = unlimited
    pub max_level: Option<u32>,
    pub effect: ShopEffect,
}

pub static SHOP_ITEMS: [ShopItem; 9] = [
    ShopItem {
        id: "pick_upgrade_1",
        name: "Better Pickaxe",
        description: "Increases mining power by 1",
        glyph: "⛏️",
        cost: 15,
        category: ShopCategory::Tools,
        required_level: 1,
        max_level: Some(5),
        effect: ShopEffect::UpgradeTool { power: 1 },
    },
    ShopItem {
        id: "pick_upgrade_2",
        name: "Sturdy Pickaxe",
        description: "Increases mining power by 2",
        glyph: "⛏️",
        cost: 40,
        category: ShopCategory::Tools,
        required_level: 2,
        max_level: Some(3),
        effect: ShopEffect::UpgradeTool { power: 2 },
    },
    ShopItem {
        id: "pick_upgrade_3",
        name: "Premium Pickaxe",
        description: "Increases mining power by 3",
        glyph: "⛏️",
        cost: 75,
        category: ShopCategory::Tools,
        required_level: 3,
        max_level: Some(2),
        effect: ShopEffect::UpgradeTool { power: 3 },
    },
    ShopItem {
        id: "inventory_upgrade_1",
        name: "Small Bag",
        description: "Increases inventory capacity by 10 slots",
        glyph: "🎒",
        cost: 25,
        category: ShopCategory::Upgrades,
        required_level: 1,
        max_level: Some(3),
        effect: ShopEffect::ExpandInventory { upgrades: 1 },
    },
    ShopItem {
        id: "inventory_upgrade_2",
        name: "Medium Bag",
        description: "Increases inventory capacity by 20 slots",
        glyph: "🎒",
        cost: 60,
        category: ShopCategory::Upgrades,
        required_level: 2,
        max_level: Some(2),
        effect: ShopEffect::ExpandInventory { upgrades: 2 },
    },
    ShopItem {
        id: "inventory_upgrade_3",
        name: "Large Bag",
        description: "Increases inventory capacity by 30 slots",
        glyph: "🎒",
        cost: 100,
        category: ShopCategory::Upgrades,
        required_level: 3,
        max_level: Some(1),
        effect: ShopEffect::ExpandInventory { upgrades: 3 },
    },
    ShopItem {
        id: "magnet",
        name: "Gem Magnet",
        description: "Attracts nearby gems when digging",
        glyph: "🧲",
        cost: 20,
        category: ShopCategory::Items,
        required_level: 1,
        max_level: None,
        effect: ShopEffect::GrantSpecial(SpecialKind::Magnet),
    },
    ShopItem {
        id: "bomb",
        name: "Mining Bomb",
        description: "Breaks surrounding rocks when used",
        glyph: "💣",
        cost: 30,
        category: ShopCategory::Items,
        required_level: 2,
        max_level: None,
        effect: ShopEffect::GrantSpecial(SpecialKind::Bomb),
    },
    ShopItem {
        id: "gem_compass",
        name: "Gem Compass",
        description: "Points to nearby gems",
        glyph: "🧭",
        cost: 50,
        category: ShopCategory::Items,
        required_level: 3,
        max_level: None,
        effect: ShopEffect::GrantSpecial(SpecialKind::Compass),
    },
];

/// Per-save shop state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShopMeta {
    /// Purchase count by item id
    pub purchased: BTreeMap<String, u32>,
    pub active_category: ShopCategory,
}

/// Why a purchase was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("No shop item named '{0}'")]
    UnknownItem(String),

    #[error("{name} is sold out")]
    SoldOut { name: String },

    #[error("{name} needs tool level {required} (you have {current})")]
    LevelTooLow {
        name: String,
        required: u32,
        current: u32,
    },

    #[error("{name} unlocks at depth {required}")]
    TooShallow { name: String, required: u32 },

    #[error("Not enough gems: {name} costs {cost}, you have {available}")]
    InsufficientFunds {
        name: String,
        cost: u32,
        available: u32,
    },

    #[error("Inventory full! Sell items or upgrade your bag.")]
    InventoryFull,
}

pub fn find_item(id: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}

pub fn purchase_count(state: &GameState, id: &str) -> u32 {
    state.shop.purchased.get(id).copied().unwrap_or(0)
}

/// Purchases left before the item sells out; `None` = unlimited
pub fn remaining_purchases(state: &GameState, item: &ShopItem) -> Option<u32> {
    item.max_level
        .map(|max| max.saturating_sub(purchase_count(state, item.id)))
}

/// Whether `item` is currently offered, ignoring price
pub fn check_available(state: &GameState, item: &ShopItem) -> Result<(), PurchaseError> {
    if remaining_purchases(state, item) == Some(0) {
        return Err(PurchaseError::SoldOut {
            name: item.name.to_string(),
        });
    }
    if state.tool.level < item.required_level {
        return Err(PurchaseError::LevelTooLow {
            name: item.name.to_string(),
            required: item.required_level,
            current: state.tool.level,
        });
    }
    if state.depth < item.required_level {
        return Err(PurchaseError::TooShallow {
            name: item.name.to_string(),
            required: item.required_level,
        });
    }
    Ok(())
}

/// Items currently offered, in catalogue order
pub fn available_items(state: &GameState) -> Vec<&'static ShopItem> {
    SHOP_ITEMS
        .iter()
        .filter(|item| check_available(state, item).is_ok())
        .collect()
}

pub fn items_in_category(state: &GameState, category: ShopCategory) -> Vec<&'static ShopItem> {
    available_items(state)
        .into_iter()
        .filter(|item| category == ShopCategory::All || item.category == category)
        .collect()
}

/// Buy one unit of `id`
///
/// On error nothing changes. The listener hears about every purchase attempt
/// on a known item.
pub fn purchase(
    state: &mut GameState,
    id: &str,
    events: &mut dyn GameEvents,
) -> Result<String, PurchaseError> {
    let Some(item) = find_item(id) else {
        return Err(PurchaseError::UnknownItem(id.to_string()));
    };

    let result = try_purchase(state, item);
    match &result {
        Ok(message) => log::info!("bought {} for {} gems: {}", item.id, item.cost, message),
        Err(err) => log::debug!("purchase of {} refused: {}", item.id, err),
    }
    events.on_purchase_result(item, &result);
    result
}

fn try_purchase(state: &mut GameState, item: &ShopItem) -> Result<String, PurchaseError> {
    check_available(state, item)?;

    if state.resources.gems < item.cost {
        return Err(PurchaseError::InsufficientFunds {
            name: item.name.to_string(),
            cost: item.cost,
            available: state.resources.gems,
        });
    }
    if matches!(item.effect, ShopEffect::GrantSpecial(_)) && state.inventory.is_full() {
        return Err(PurchaseError::InventoryFull);
    }

    state.resources.gems -= item.cost;
    *state.shop.purchased.entry(item.id.to_string()).or_insert(0) += 1;

    Ok(apply_effect(state, item))
}

fn apply_effect(state: &mut GameState, item: &ShopItem) -> String {
    match item.effect {
        ShopEffect::UpgradeTool { power } => {
            state.tool.power += power;
            state.tool.level += 1;
            format!("Mining power increased to {}!", state.tool.power)
        }
        ShopEffect::ExpandInventory { upgrades } => {
            state.inventory.meta.space_upgrades += upgrades;
            format!(
                "Inventory space increased by {} slots!",
                upgrades as usize * SLOTS_PER_SPACE_UPGRADE
            )
        }
        ShopEffect::GrantSpecial(kind) => {
            // capacity was checked before charging
            let _ = state
                .inventory
                .add(InventoryItem::from_content(Content::Special(kind), 1));
            format!("{} added to your inventory!", item.name)
        }
    }
}
