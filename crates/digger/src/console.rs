//! Plain-text presentation

use dg_core::shop::{self, ShopItem};
use dg_core::{Cell, Content, GameEvents, GameState, InventoryItem, Layer, LayerReward, PurchaseError};

/// Prints every notification to stdout
#[derive(Debug, Default)]
pub struct ConsoleEvents {
    /// Suppress per-cell reveal lines (auto-play)
    pub quiet: bool,
}

impl GameEvents for ConsoleEvents {
    fn on_content_revealed(&mut self, cell: &Cell, content: Content) {
        if !self.quiet {
            println!("Cell {} broke: found {} {}", cell.index, content.glyph(), content.name());
        }
    }

    fn on_layer_complete(&mut self, depth: u32, reward: LayerReward) {
        println!(
            "Layer {} cleared! Bonus: +{} stone, +{} gems",
            depth, reward.stone, reward.gems
        );
    }

    fn on_inventory_full(&mut self) {
        println!("Inventory full! Sell items or upgrade your bag.");
    }

    fn on_purchase_result(&mut self, _item: &ShopItem, result: &Result<String, PurchaseError>) {
        match result {
            Ok(message) => println!("{}", message),
            Err(err) => println!("{}", err),
        }
    }
}

/// Grid view: content glyph for broken cells, remaining hits otherwise
pub fn render_layer(layer: &Layer) -> String {
    let mut out = String::new();
    for row in layer.cells.chunks(layer.size.max(1)) {
        let line: Vec<String> = row
            .iter()
            .map(|cell| {
                if cell.broken {
                    format!("{:>2}", cell.content.glyph())
                } else {
                    format!("{:>2}", cell.durability)
                }
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// One line for a cell still being dug, with its grid position
pub fn render_dig_progress(layer: &Layer, index: usize) -> Option<String> {
    let cell = layer.cell(index)?;
    let (row, col) = layer.coords(index)?;
    Some(format!(
        "Cell {} (row {}, col {}): {} hits to go, {:.0}% dug.",
        index,
        row,
        col,
        cell.durability,
        cell.progress() * 100.0
    ))
}

pub fn render_status(state: &GameState) -> String {
    let r = &state.resources;
    let mut out = format!(
        "Depth {} (deepest {}) | Pickaxe power {} level {}\n",
        state.depth, state.stats.max_depth, state.tool.power, state.tool.level
    );
    out.push_str(&format!(
        "Gems {} | Stone {} | Dirt {} | Ore {}\n",
        r.gems, r.stone, r.dirt, r.ore
    ));
    out.push_str(&format!(
        "Inventory {}/{} slots | Blocks mined {}\n",
        state.inventory.meta.current_capacity,
        state.inventory.max_capacity(),
        state.stats.blocks_mined
    ));
    out.push_str(&format!(
        "Layer {}/{} broken\n",
        state.layer.broken_count(),
        state.layer.cells.len()
    ));
    out.push_str(&render_layer(&state.layer));
    out
}

pub fn render_shop_item(state: &GameState, item: &ShopItem) -> String {
    let stock = match shop::remaining_purchases(state, item) {
        Some(n) => format!("{} left", n),
        None => "unlimited".to_string(),
    };
    format!(
        "{:<20} {} {:<16} {:>4} gems  ({})  {}",
        item.id, item.glyph, item.name, item.cost, stock, item.description
    )
}

pub fn render_inventory_item(index: usize, item: &InventoryItem) -> String {
    format!(
        "[{:>2}] {} {:<14} x{:<3} value {:<3} {}",
        index, item.glyph, item.name, item.quantity, item.value, item.description
    )
}
