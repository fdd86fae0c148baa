//! dg-save: Save/restore system for the Digger mining game
//!
//! A game is stored as one JSON record under a fixed key. The plain API
//! (`save_game`, `load_game`, `new_game`) never fails loudly: errors are
//! logged and reported as `false` / `None`. The `try_*` variants expose the
//! cause.

mod autosave;
mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dg_core::GameState;

pub use autosave::AutoSaver;
pub use store::{FileStore, MemoryStore, SaveStore};

/// Key the current game is stored under
pub const SAVE_KEY: &str = "digger_game_save";

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save not found")]
    NotFound,

    #[error("Save corrupted")]
    Corrupted,
}

/// Summary stored ahead of the state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHeader {
    pub magic: String,
    /// Depth at save time
    pub depth: u32,
    /// Unix seconds
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "DGRS";

    pub fn new(state: &GameState) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            depth: state.depth,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::Corrupted);
        }
        Ok(())
    }
}

/// Complete stored record
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub state: GameState,
}

pub fn try_save(store: &mut dyn SaveStore, state: &GameState) -> Result<(), SaveError> {
    let record = SaveFile {
        header: SaveHeader::new(state),
        state: state.clone(),
    };
    let json = serde_json::to_string(&record)?;
    store.write(SAVE_KEY, &json)
}

pub fn try_load(store: &dyn SaveStore) -> Result<GameState, SaveError> {
    let json = store.read(SAVE_KEY)?.ok_or(SaveError::NotFound)?;
    let record: SaveFile = serde_json::from_str(&json)?;
    record.header.validate()?;
    Ok(record.state)
}

/// Load only the header (for a status line)
pub fn load_header(store: &dyn SaveStore) -> Result<SaveHeader, SaveError> {
    #[derive(Deserialize)]
    struct HeaderOnly {
        header: SaveHeader,
    }

    let json = store.read(SAVE_KEY)?.ok_or(SaveError::NotFound)?;
    let record: HeaderOnly = serde_json::from_str(&json)?;
    record.header.validate()?;
    Ok(record.header)
}

/// Store the whole state; `false` (and a log line) on failure
pub fn save_game(store: &mut dyn SaveStore, state: &GameState) -> bool {
    match try_save(store, state) {
        Ok(()) => {
            log::info!("game saved at depth {}", state.depth);
            true
        }
        Err(e) => {
            log::error!("failed to save game: {}", e);
            false
        }
    }
}

/// Read back the stored state; `None` when absent or unreadable
pub fn load_game(store: &dyn SaveStore) -> Option<GameState> {
    match try_load(store) {
        Ok(state) => {
            log::info!("loaded game at depth {}", state.depth);
            Some(state)
        }
        Err(SaveError::NotFound) => None,
        Err(e) => {
            log::warn!("failed to load saved game: {}", e);
            None
        }
    }
}

/// Discard the stored game; `true` if nothing is stored afterwards
pub fn new_game(store: &mut dyn SaveStore) -> bool {
    match store.remove(SAVE_KEY) {
        Ok(()) => true,
        Err(e) => {
            log::error!("failed to remove saved game: {}", e);
            false
        }
    }
}

pub fn has_save(store: &dyn SaveStore) -> bool {
    store.contains(SAVE_KEY)
}
