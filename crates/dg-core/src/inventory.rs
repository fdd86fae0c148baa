//! Inventory management
//!
//! A capacity-bounded list of stacks. Each distinct entry (not each unit) uses
//! one slot, so `current_capacity` always equals the number of entries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::catalog::{Content, ContentType, SpecialKind};
use crate::consts::{BASE_INVENTORY_CAPACITY, MAX_STACK_SIZE, SLOTS_PER_SPACE_UPGRADE};

/// Reasons an item could not be stored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Inventory full ({capacity} slots)! Sell items or upgrade your bag.")]
    Full { capacity: usize },

    #[error("Can't carry more {name}!")]
    StackFull { name: String },
}

/// One inventory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Type and variant tag; stacks merge on equal content
    pub content: Content,
    pub name: String,
    pub glyph: String,
    pub color: String,
    pub description: String,
    pub value: u32,
    pub rarity: Option<f64>,
    pub stackable: bool,
    /// Units in this entry; always 1 for non-stackable items
    pub quantity: u32,
}

impl InventoryItem {
    /// Build an entry from catalog metadata
    pub fn from_content(content: Content, quantity: u32) -> Self {
        let stackable = content.is_stackable();
        Self {
            content,
            name: content.name().to_string(),
            glyph: content.glyph().to_string(),
            color: content.color().to_string(),
            description: content.description(),
            value: content.value(),
            rarity: content.rarity(),
            stackable,
            quantity: if stackable { quantity.max(1) } else { 1 },
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }
}

/// Inventory filter tabs
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InventoryCategory {
    #[default]
    All,
    Resources,
    Gems,
    Tools,
    Treasures,
}

impl InventoryCategory {
    pub fn matches(self, item: &InventoryItem) -> bool {
        match self {
            InventoryCategory::All => true,
            InventoryCategory::Resources => matches!(item.content, Content::Resource(_)),
            InventoryCategory::Gems => matches!(item.content, Content::Gem(_)),
            InventoryCategory::Tools => matches!(
                item.content,
                Content::Special(SpecialKind::Pickaxe | SpecialKind::Magnet | SpecialKind::Compass)
            ),
            InventoryCategory::Treasures => matches!(
                item.content,
                Content::Special(SpecialKind::Chest | SpecialKind::Bomb)
            ),
        }
    }
}

/// Inventory sort orders
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortMethod {
    /// Group by type; resources by value, others by rarity (both descending)
    #[default]
    Default,
    Name,
    Type,
    Rarity,
    Quantity,
}

fn rarity_desc(a: &InventoryItem, b: &InventoryItem) -> Ordering {
    b.rarity.unwrap_or(0.0).total_cmp(&a.rarity.unwrap_or(0.0))
}

impl SortMethod {
    pub fn compare(self, a: &InventoryItem, b: &InventoryItem) -> Ordering {
        match self {
            SortMethod::Default => a.content_type().cmp(&b.content_type()).then_with(|| {
                if a.content_type() == ContentType::Resource {
                    b.value.cmp(&a.value)
                } else {
                    rarity_desc(a, b)
                }
            }),
            SortMethod::Name => a.name.cmp(&b.name),
            SortMethod::Type => a
                .content_type()
                .cmp(&b.content_type())
                .then_with(|| a.content.variant().cmp(&b.content.variant())),
            SortMethod::Rarity => rarity_desc(a, b),
            SortMethod::Quantity => b.quantity.cmp(&a.quantity),
        }
    }
}

/// Slot accounting and presentation preferences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryMeta {
    /// Number of distinct entries held
    pub current_capacity: usize,
    /// Bag upgrade levels bought in the shop
    pub space_upgrades: u32,
    pub active_category: InventoryCategory,
    pub sort_method: SortMethod,
}

/// Player inventory
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
    pub meta: InventoryMeta,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base capacity plus 10 slots per bag upgrade
    pub fn max_capacity(&self) -> usize {
        BASE_INVENTORY_CAPACITY + self.meta.space_upgrades as usize * SLOTS_PER_SPACE_UPGRADE
    }

    pub fn is_full(&self) -> bool {
        self.meta.current_capacity >= self.max_capacity()
    }

    /// Find the stack holding `content`
    pub fn find(&self, content: Content) -> Option<usize> {
        self.items.iter().position(|i| i.content == content)
    }

    /// Add an item, merging into an existing stack when possible
    ///
    /// Returns the index of the entry that received the item. On error nothing
    /// is changed. A stack never exceeds `MAX_STACK_SIZE`: an add that would
    /// push it past the limit is refused whole with `StackFull`.
    pub fn add(&mut self, mut item: InventoryItem) -> Result<usize, InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full {
                capacity: self.max_capacity(),
            });
        }

        if item.stackable {
            item.quantity = item.quantity.max(1);
            let existing = self
                .items
                .iter()
                .position(|i| i.stackable && i.content == item.content);
            let held = existing.map_or(0, |idx| self.items[idx].quantity);
            if held.saturating_add(item.quantity) > MAX_STACK_SIZE {
                return Err(InventoryError::StackFull { name: item.name });
            }
            if let Some(idx) = existing {
                self.items[idx].quantity += item.quantity;
                return Ok(idx);
            }
        } else {
            item.quantity = 1;
        }

        self.items.push(item);
        self.meta.current_capacity += 1;
        Ok(self.items.len() - 1)
    }

    /// Remove `quantity` units of the entry at `index`
    ///
    /// A stack larger than `quantity` is reduced in place and a copy holding the
    /// removed units is returned; otherwise the whole entry is taken out.
    pub fn remove(&mut self, index: usize, quantity: u32) -> Option<InventoryItem> {
        let quantity = quantity.max(1);
        let item = self.items.get_mut(index)?;

        if item.stackable && item.quantity > quantity {
            item.quantity -= quantity;
            let mut removed = item.clone();
            removed.quantity = quantity;
            return Some(removed);
        }

        self.meta.current_capacity = self.meta.current_capacity.saturating_sub(1);
        Some(self.items.remove(index))
    }

    /// Number of slots in use (stacks count as 1)
    pub fn slot_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all stacks
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn quantity_of(&self, content: Content) -> u32 {
        self.items
            .iter()
            .filter(|i| i.content == content)
            .map(|i| i.quantity)
            .sum()
    }

    pub fn total_value(&self) -> u64 {
        self.items
            .iter()
            .map(|i| i.value as u64 * i.quantity as u64)
            .sum()
    }

    /// Filtered and sorted view; each entry keeps its ledger index
    pub fn view(&self, category: InventoryCategory, sort: SortMethod) -> Vec<(usize, &InventoryItem)> {
        let mut view: Vec<(usize, &InventoryItem)> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| category.matches(item))
            .collect();
        view.sort_by(|(_, a), (_, b)| sort.compare(a, b));
        view
    }

    /// View using the stored category and sort preferences
    pub fn current_view(&self) -> Vec<(usize, &InventoryItem)> {
        self.view(self.meta.active_category, self.meta.sort_method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GemKind, ResourceKind};

    fn stone(qty: u32) -> InventoryItem {
        InventoryItem::from_content(Content::Resource(ResourceKind::Stone), qty)
    }

    fn special(kind: SpecialKind) -> InventoryItem {
        InventoryItem::from_content(Content::Special(kind), 1)
    }

    #[test]
    fn test_add_new_and_stack() {
        let mut inv = Inventory::new();
        assert_eq!(inv.add(stone(1)), Ok(0));
        assert_eq!(inv.add(stone(1)), Ok(0));
        assert_eq!(inv.items[0].quantity, 2);
        assert_eq!(inv.meta.current_capacity, 1);

        inv.add(InventoryItem::from_content(Content::Gem(GemKind::Red), 1))
            .unwrap();
        assert_eq!(inv.meta.current_capacity, 2);
        assert_eq!(inv.item_count(), 3);
    }

    #[test]
    fn test_specials_never_stack() {
        let mut inv = Inventory::new();
        inv.add(special(SpecialKind::Bomb)).unwrap();
        inv.add(special(SpecialKind::Bomb)).unwrap();
        assert_eq!(inv.slot_count(), 2);
        assert_eq!(inv.meta.current_capacity, 2);
        assert!(inv.items.iter().all(|i| i.quantity == 1));
    }

    #[test]
    fn test_stack_cap() {
        let mut inv = Inventory::new();
        inv.add(stone(98)).unwrap();

        // 98 + 5 would overflow: refused whole
        let before = inv.clone();
        assert_eq!(
            inv.add(stone(5)),
            Err(InventoryError::StackFull {
                name: "Stone".to_string()
            })
        );
        assert_eq!(inv, before);

        assert_eq!(inv.add(stone(1)), Ok(0));
        assert_eq!(inv.items[0].quantity, MAX_STACK_SIZE);

        let before = inv.clone();
        assert!(matches!(
            inv.add(stone(1)),
            Err(InventoryError::StackFull { .. })
        ));
        assert_eq!(inv, before);
    }

    #[test]
    fn test_merge_then_remove_restores_stack() {
        let mut inv = Inventory::new();
        inv.add(stone(90)).unwrap();
        let idx = inv.add(stone(9)).unwrap();
        let removed = inv.remove(idx, 9).unwrap();
        assert_eq!(removed.quantity, 9);
        assert_eq!(inv.items[0].quantity, 90);
    }

    #[test]
    fn test_oversized_new_stack_refused() {
        let mut inv = Inventory::new();
        assert!(matches!(
            inv.add(stone(MAX_STACK_SIZE + 1)),
            Err(InventoryError::StackFull { .. })
        ));
        assert!(inv.items.is_empty());
        assert_eq!(inv.meta.current_capacity, 0);
        assert_eq!(inv.add(stone(MAX_STACK_SIZE)), Ok(0));
    }

    #[test]
    fn test_full_inventory_refuses() {
        let mut inv = Inventory::new();
        for _ in 0..BASE_INVENTORY_CAPACITY {
            inv.add(special(SpecialKind::Magnet)).unwrap();
        }
        assert!(inv.is_full());
        let before = inv.clone();
        assert_eq!(
            inv.add(stone(1)),
            Err(InventoryError::Full { capacity: 50 })
        );
        assert_eq!(inv, before);
    }

    #[test]
    fn test_space_upgrades_extend_capacity() {
        let mut inv = Inventory::new();
        assert_eq!(inv.max_capacity(), 50);
        inv.meta.space_upgrades = 3;
        assert_eq!(inv.max_capacity(), 80);
    }

    #[test]
    fn test_remove_partial_stack() {
        let mut inv = Inventory::new();
        inv.add(stone(10)).unwrap();
        let removed = inv.remove(0, 4).unwrap();
        assert_eq!(removed.quantity, 4);
        assert_eq!(inv.items[0].quantity, 6);
        assert_eq!(inv.meta.current_capacity, 1);
    }

    #[test]
    fn test_remove_whole_entry() {
        let mut inv = Inventory::new();
        inv.add(stone(3)).unwrap();
        let removed = inv.remove(0, 3).unwrap();
        assert_eq!(removed.quantity, 3);
        assert!(inv.items.is_empty());
        assert_eq!(inv.meta.current_capacity, 0);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut inv = Inventory::new();
        assert!(inv.remove(0, 1).is_none());
        inv.add(stone(1)).unwrap();
        assert!(inv.remove(5, 1).is_none());
        assert_eq!(inv.slot_count(), 1);
    }

    #[test]
    fn test_category_views() {
        let mut inv = Inventory::new();
        inv.add(stone(2)).unwrap();
        inv.add(InventoryItem::from_content(Content::Gem(GemKind::Blue), 1))
            .unwrap();
        inv.add(special(SpecialKind::Compass)).unwrap();
        inv.add(special(SpecialKind::Chest)).unwrap();

        let count = |c| inv.view(c, SortMethod::Default).len();
        assert_eq!(count(InventoryCategory::All), 4);
        assert_eq!(count(InventoryCategory::Resources), 1);
        assert_eq!(count(InventoryCategory::Gems), 1);
        assert_eq!(count(InventoryCategory::Tools), 1);
        assert_eq!(count(InventoryCategory::Treasures), 1);
    }

    #[test]
    fn test_sort_orders() {
        let mut inv = Inventory::new();
        inv.add(stone(7)).unwrap();
        inv.add(InventoryItem::from_content(Content::Resource(ResourceKind::Ore), 1))
            .unwrap();
        inv.add(special(SpecialKind::Pickaxe)).unwrap();
        inv.add(InventoryItem::from_content(Content::Gem(GemKind::Blue), 2))
            .unwrap();

        let names = |sort| {
            inv.view(InventoryCategory::All, sort)
                .into_iter()
                .map(|(_, i)| i.name.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(
            names(SortMethod::Default),
            vec!["Blue Gem", "Ore", "Stone", "Lucky Pickaxe"]
        );
        assert_eq!(
            names(SortMethod::Name),
            vec!["Blue Gem", "Lucky Pickaxe", "Ore", "Stone"]
        );
        assert_eq!(names(SortMethod::Rarity)[0], "Lucky Pickaxe");
        assert_eq!(names(SortMethod::Quantity)[0], "Stone");
    }

    #[test]
    fn test_view_keeps_ledger_index() {
        let mut inv = Inventory::new();
        inv.add(stone(1)).unwrap();
        inv.add(InventoryItem::from_content(Content::Gem(GemKind::Green), 1))
            .unwrap();
        let view = inv.view(InventoryCategory::Gems, SortMethod::Default);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].0, 1);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("tools".parse::<InventoryCategory>(), Ok(InventoryCategory::Tools));
        assert_eq!("rarity".parse::<SortMethod>(), Ok(SortMethod::Rarity));
    }
}
