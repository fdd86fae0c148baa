//! dg-core: Core game logic for the Digger mining game
//!
//! Content selection, the cell grid, the inventory ledger, progression and
//! the shop. No file I/O apart from reading the rc file; persistence lives in
//! `dg-save`.

pub mod catalog;
pub mod events;
pub mod game;
pub mod grid;
pub mod inventory;
pub mod ledger;
pub mod options;
pub mod progression;
pub mod select;
pub mod shop;
pub mod state;

mod consts;
mod rng;

pub use catalog::{Content, ContentType, GemKind, ResourceKind, SpecialKind};
pub use consts::*;
pub use events::{EventLog, GameEvent, GameEvents, NullEvents};
pub use game::{DigOutcome, Game};
pub use grid::{Cell, DigResult, Layer};
pub use inventory::{Inventory, InventoryCategory, InventoryError, InventoryItem, SortMethod};
pub use options::{DiggerOptions, OptionsError};
pub use progression::{CompletionCheck, DifficultyScaling, LayerReward};
pub use rng::{GameRng, RandomSource, SequenceRng};
pub use select::{ContentPicker, ContentSelector};
pub use shop::{PurchaseError, ShopCategory, ShopItem};
pub use state::{GameState, Stats, Tool};
