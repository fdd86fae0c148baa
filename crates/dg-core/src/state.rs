//! Game state aggregate
//!
//! Everything that is saved and restored lives here. Components operate on a
//! `&mut GameState` handed to them; there is no global instance.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GRID_SIZE, START_DEPTH};
use crate::grid::{generate_layer, Layer};
use crate::inventory::Inventory;
use crate::ledger::ResourceCounters;
use crate::progression::DifficultyScaling;
use crate::rng::{GameRng, RandomSource};
use crate::select::{ContentPicker, ContentSelector};
use crate::shop::ShopMeta;

/// Digging tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub power: u32,
    pub level: u32,
}

impl Default for Tool {
    fn default() -> Self {
        Self { power: 1, level: 1 }
    }
}

/// Lifetime counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub blocks_mined: u64,
    pub max_depth: u32,
    pub total_resources: u64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            blocks_mined: 0,
            max_depth: START_DEPTH,
            total_resources: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current depth, starts at 1 and only grows
    pub depth: u32,

    /// Edge length of every generated layer
    pub grid_size: usize,

    /// Layer being dug
    pub layer: Layer,

    pub resources: ResourceCounters,

    pub inventory: Inventory,

    pub tool: Tool,

    /// Shop purchase history
    #[serde(default)]
    pub shop: ShopMeta,

    #[serde(default)]
    pub stats: Stats,

    /// Advisory hardness bounds computed on each descent
    #[serde(default)]
    pub scaling: DifficultyScaling,
}

impl GameState {
    /// Fresh game at depth 1 with a newly generated first layer
    pub fn new(grid_size: usize, picker: &dyn ContentPicker, rng: &mut dyn RandomSource) -> Self {
        let grid_size = grid_size.max(1);
        Self {
            depth: START_DEPTH,
            grid_size,
            layer: generate_layer(START_DEPTH, grid_size, picker, rng),
            resources: ResourceCounters::default(),
            inventory: Inventory::new(),
            tool: Tool::default(),
            shop: ShopMeta::default(),
            stats: Stats::default(),
            scaling: DifficultyScaling::for_depth(START_DEPTH),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(
            DEFAULT_GRID_SIZE,
            &ContentSelector,
            &mut GameRng::from_entropy(),
        )
    }
}
