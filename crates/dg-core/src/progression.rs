//! Layer completion and depth progression

use serde::{Deserialize, Serialize};

use crate::catalog::{Content, GemKind, ResourceKind};
use crate::events::GameEvents;
use crate::grid::generate_layer;
use crate::inventory::InventoryItem;
use crate::ledger::store_item;
use crate::rng::RandomSource;
use crate::select::{warn_if_ill_defined, ContentPicker};
use crate::state::GameState;

/// Bonus paid once per completed layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerReward {
    pub stone: u32,
    pub gems: u32,
}

impl LayerReward {
    /// `stone = floor(5 + depth*2*0.5)`, `gems = floor(1 + depth*2*0.1)`
    pub fn for_depth(depth: u32) -> Self {
        let depth_bonus = depth as f64 * 2.0;
        Self {
            stone: (5.0 + depth_bonus * 0.5).floor() as u32,
            gems: (1.0 + depth_bonus * 0.1).floor() as u32,
        }
    }
}

/// Result of a completion check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionCheck {
    pub complete: bool,
    /// Present only on the check that paid the reward
    pub reward: Option<LayerReward>,
}

/// Hardness bounds derived from depth
///
/// Stored on the state after every descent; layer generation does not read
/// them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyScaling {
    pub min_hardness: u32,
    pub max_hardness_bonus: u32,
}

impl DifficultyScaling {
    pub fn for_depth(depth: u32) -> Self {
        Self {
            min_hardness: (depth / 2).max(1),
            max_hardness_bonus: ((depth as f64 / 1.5).floor() as u32).min(10),
        }
    }
}

impl Default for DifficultyScaling {
    fn default() -> Self {
        Self::for_depth(1)
    }
}

/// Check whether the current layer is done, paying the reward the first time
pub fn check_layer_completion(
    state: &mut GameState,
    events: &mut dyn GameEvents,
) -> CompletionCheck {
    if !state.layer.is_complete() {
        return CompletionCheck {
            complete: false,
            reward: None,
        };
    }
    if state.layer.reward_granted {
        return CompletionCheck {
            complete: true,
            reward: None,
        };
    }

    state.layer.reward_granted = true;
    let reward = LayerReward::for_depth(state.depth);
    grant_layer_reward(state, reward, events);
    log::info!(
        "layer {} complete: +{} stone, +{} gems",
        state.depth,
        reward.stone,
        reward.gems
    );
    events.on_layer_complete(state.depth, reward);

    CompletionCheck {
        complete: true,
        reward: Some(reward),
    }
}

fn grant_layer_reward(state: &mut GameState, reward: LayerReward, events: &mut dyn GameEvents) {
    state.resources.stone += reward.stone;
    state.resources.gems += reward.gems;
    state.stats.total_resources += (reward.stone + reward.gems) as u64;

    if reward.stone > 0 {
        let item = InventoryItem::from_content(Content::Resource(ResourceKind::Stone), reward.stone)
            .with_description("Bonus stone from completing the layer.");
        store_item(state, item, events);
    }
    if reward.gems > 0 {
        let item = InventoryItem::from_content(Content::Gem(GemKind::Blue), reward.gems)
            .with_description("Bonus gem from completing the layer.");
        store_item(state, item, events);
    }
}

/// Descend one level: new layer, new difficulty bounds
pub fn advance_depth(state: &mut GameState, picker: &dyn ContentPicker, rng: &mut dyn RandomSource) {
    state.depth += 1;
    state.grid_size = state.grid_size.max(1);
    state.layer = generate_layer(state.depth, state.grid_size, picker, rng);
    state.scaling = DifficultyScaling::for_depth(state.depth);
    state.stats.max_depth = state.stats.max_depth.max(state.depth);

    warn_if_ill_defined(state.depth);
    log::debug!(
        "advanced to depth {} (min hardness {}, bonus {})",
        state.depth,
        state.scaling.min_hardness,
        state.scaling.max_hardness_bonus
    );
}
