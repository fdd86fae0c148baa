//! Content selection
//!
//! Decides what is buried in a freshly generated cell. Two distinct sampling
//! strategies live here:
//!
//! - gems and special items are weighted by inverse rarity (`1 / rarity`), so a
//!   *lower* rarity value means a *more common* entry;
//! - plain resources use a depth-tiered weight triple sampled through its
//!   normalised cumulative distribution.

use crate::catalog::{Content, GemKind, ResourceKind, SpecialKind, GEMS, SPECIALS};
use crate::consts::MAX_WELL_DEFINED_DEPTH;
use crate::rng::RandomSource;

/// Chooses the content of a new cell
///
/// Layer generation depends only on this interface.
pub trait ContentPicker {
    fn pick(&self, depth: u32, rng: &mut dyn RandomSource) -> Content;
}

/// Default picker backed by the static catalogs
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSelector;

impl ContentPicker for ContentSelector {
    fn pick(&self, depth: u32, rng: &mut dyn RandomSource) -> Content {
        select_content(depth, rng)
    }
}

/// Chance that a cell holds a special item
pub fn special_probability(depth: u32) -> f64 {
    0.01 + depth as f64 * 0.005
}

/// Chance that a non-special cell holds a gem
pub fn gem_probability(depth: u32) -> f64 {
    0.05 + depth as f64 * 0.02
}

/// True while `special + gem <= 1` (depth 1..=37)
pub fn selection_well_defined(depth: u32) -> bool {
    special_probability(depth) + gem_probability(depth) <= 1.0
}

/// Pick the content of one cell at `depth`
///
/// The special roll happens first; only when it misses is a second, independent
/// draw compared against the gem probability.
pub fn select_content(depth: u32, rng: &mut dyn RandomSource) -> Content {
    if rng.next_f64() < special_probability(depth) {
        Content::Special(select_special(rng))
    } else if rng.next_f64() < gem_probability(depth) {
        Content::Gem(select_gem(rng))
    } else {
        Content::Resource(select_resource(depth, rng))
    }
}

/// Index of the entry selected by a uniform draw `u` over inverse-rarity weights
///
/// Returns `None` only if floating point drift makes the walk overshoot; callers
/// supply their own fallback.
pub fn inverse_rarity_index(rarities: &[f64], u: f64) -> Option<usize> {
    let weights: Vec<f64> = rarities.iter().map(|r| 1.0 / r).collect();
    let total: f64 = weights.iter().sum();
    let target = u * total;

    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if target < cumulative {
            return Some(i);
        }
    }
    None
}

pub fn select_special(rng: &mut dyn RandomSource) -> SpecialKind {
    let rarities: Vec<f64> = SPECIALS.iter().map(|s| s.rarity).collect();
    inverse_rarity_index(&rarities, rng.next_f64())
        .map(|i| SPECIALS[i].kind)
        .unwrap_or(SpecialKind::Chest)
}

pub fn select_gem(rng: &mut dyn RandomSource) -> GemKind {
    let rarities: Vec<f64> = GEMS.iter().map(|g| g.rarity).collect();
    inverse_rarity_index(&rarities, rng.next_f64())
        .map(|i| GEMS[i].kind)
        .unwrap_or(GemKind::Blue)
}

/// Normalised (stone, dirt, ore) weights for a depth tier
pub fn resource_weights(depth: u32) -> [f64; 3] {
    let d = depth as f64;
    let raw = if depth < 3 {
        [0.7, 0.25, 0.05 * d]
    } else if depth < 6 {
        [0.5, 0.3, 0.2 * (d / 3.0)]
    } else {
        [0.4, 0.3, 0.3]
    };
    let total: f64 = raw.iter().sum();
    raw.map(|w| w / total)
}

pub fn select_resource(depth: u32, rng: &mut dyn RandomSource) -> ResourceKind {
    const ORDER: [ResourceKind; 3] = [ResourceKind::Stone, ResourceKind::Dirt, ResourceKind::Ore];

    let u = rng.next_f64();
    let mut cumulative = 0.0;
    for (kind, w) in ORDER.iter().zip(resource_weights(depth)) {
        cumulative += w;
        if u <= cumulative {
            return *kind;
        }
    }
    ResourceKind::Stone
}

/// Log once when a depth pushes the selection order out of its valid range
pub(crate) fn warn_if_ill_defined(depth: u32) {
    if depth == MAX_WELL_DEFINED_DEPTH + 1 {
        log::warn!(
            "depth {} exceeds {}: special + gem probability is now above 1",
            depth,
            MAX_WELL_DEFINED_DEPTH
        );
    }
}
