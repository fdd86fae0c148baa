//! Grid and cell model
//!
//! A layer is a square grid of cells at one depth. Digging only ever lowers
//! durability; a cell breaks once, and a layer is complete once every cell has
//! broken.

use serde::{Deserialize, Serialize};

use crate::catalog::Content;
use crate::rng::RandomSource;
use crate::select::ContentPicker;

/// One diggable cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Position in row-major order (0..size²)
    pub index: usize,
    /// Starting durability
    pub hardness: u32,
    /// Remaining hits before the cell breaks
    pub durability: u32,
    /// What the cell reveals when broken
    pub content: Content,
    pub broken: bool,
}

impl Cell {
    pub fn new(index: usize, hardness: u32, content: Content) -> Self {
        let hardness = hardness.max(1);
        Self {
            index,
            hardness,
            durability: hardness,
            content,
            broken: false,
        }
    }

    /// Fraction of the cell already dug away, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        1.0 - self.durability as f64 / self.hardness as f64
    }
}

/// Outcome of a single dig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigResult {
    pub durability_remaining: u32,
    /// Set on the one dig that broke the cell
    pub just_broken: bool,
}

/// Full grid of cells at one depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub depth: u32,
    pub size: usize,
    pub cells: Vec<Cell>,
    /// Completion reward already paid out for this layer
    #[serde(default)]
    pub reward_granted: bool,
}

impl Layer {
    /// Build a layer from explicit cells
    pub fn from_cells(depth: u32, size: usize, cells: Vec<Cell>) -> Self {
        Self {
            depth,
            size,
            cells,
            reward_granted: false,
        }
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Dig one cell; `None` if the index is out of range
    ///
    /// Digging a broken cell leaves it unchanged.
    pub fn dig(&mut self, index: usize) -> Option<DigResult> {
        let cell = self.cells.get_mut(index)?;
        if cell.broken {
            return Some(DigResult {
                durability_remaining: cell.durability,
                just_broken: false,
            });
        }

        cell.durability = cell.durability.saturating_sub(1);
        let just_broken = cell.durability == 0;
        if just_broken {
            cell.broken = true;
        }

        Some(DigResult {
            durability_remaining: cell.durability,
            just_broken,
        })
    }

    /// Every cell broken; an empty layer is never complete
    pub fn is_complete(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|c| c.broken)
    }

    pub fn broken_count(&self) -> usize {
        self.cells.iter().filter(|c| c.broken).count()
    }

    /// Convert a row-major index to (row, col)
    pub fn coords(&self, index: usize) -> Option<(usize, usize)> {
        if index < self.cells.len() && self.size > 0 {
            Some((index / self.size, index % self.size))
        } else {
            None
        }
    }
}

/// Roll a cell hardness: uniform over {depth, depth + 1, depth + 2}
pub fn roll_hardness(depth: u32, rng: &mut dyn RandomSource) -> u32 {
    rng.below(3) + depth.max(1)
}

/// Generate a fresh `size × size` layer at `depth` (size at least 1)
pub fn generate_layer(
    depth: u32,
    size: usize,
    picker: &dyn ContentPicker,
    rng: &mut dyn RandomSource,
) -> Layer {
    let size = size.max(1);
    let cells = (0..size * size)
        .map(|index| {
            let hardness = roll_hardness(depth, rng);
            let content = picker.pick(depth, rng);
            Cell::new(index, hardness, content)
        })
        .collect();

    log::debug!("generated {}x{} layer at depth {}", size, size, depth);
    Layer::from_cells(depth, size, cells)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::ResourceKind;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_dig_idempotent_after_break(hardness in 1u32..8, extra in 0usize..10) {
            let mut layer = Layer::from_cells(
                1,
                1,
                vec![Cell::new(0, hardness, Content::Resource(ResourceKind::Stone))],
            );

            let mut broke = 0;
            for _ in 0..hardness as usize + extra {
                let result = layer.dig(0).unwrap();
                if result.just_broken {
                    broke += 1;
                }
                prop_assert!(layer.cells[0].durability <= hardness);
            }
            prop_assert_eq!(broke, 1);
            prop_assert_eq!(layer.cells[0].durability, 0);
            prop_assert!(layer.cells[0].broken);
        }
    }
}
