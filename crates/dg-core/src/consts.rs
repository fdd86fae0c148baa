//! Core game constants

/// Default grid edge length (5x5 layer)
pub const DEFAULT_GRID_SIZE: usize = 5;

/// Starting depth of a new game
pub const START_DEPTH: u32 = 1;

/// Inventory slots available before any bag upgrades
pub const BASE_INVENTORY_CAPACITY: usize = 50;

/// Extra slots granted per bag upgrade level
pub const SLOTS_PER_SPACE_UPGRADE: usize = 10;

/// Largest quantity a single stack can hold
pub const MAX_STACK_SIZE: u32 = 99;

/// Default auto-save interval, in seconds
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Deepest depth for which `special + gem` probability stays within 1
pub const MAX_WELL_DEFINED_DEPTH: u32 = 37;
