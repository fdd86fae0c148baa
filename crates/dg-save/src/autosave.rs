//! Periodic auto-save
//!
//! The frontend calls `poll` from its loop with the current time; nothing runs
//! in the background.

use std::time::{Duration, Instant};

use dg_core::{DiggerOptions, GameState};

use crate::store::SaveStore;
use crate::save_game;

#[derive(Debug, Clone)]
pub struct AutoSaver {
    interval: Duration,
    enabled: bool,
    last_save: Instant,
    saves: u64,
}

impl AutoSaver {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            enabled: true,
            last_save: now,
            saves: 0,
        }
    }

    pub fn from_options(options: &DiggerOptions, now: Instant) -> Self {
        let mut saver = Self::new(Duration::from_secs(options.autosave_interval), now);
        saver.enabled = options.autosave;
        saver
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Successful saves so far, timer and teardown combined
    pub fn save_count(&self) -> u64 {
        self.saves
    }

    /// Save if the interval has elapsed; returns whether a save succeeded
    ///
    /// A failed save is retried on the next poll after another interval.
    pub fn poll(&mut self, now: Instant, store: &mut dyn SaveStore, state: &GameState) -> bool {
        if !self.enabled || now.saturating_duration_since(self.last_save) < self.interval {
            return false;
        }
        self.last_save = now;
        log::debug!("auto-save tick");
        self.record(save_game(store, state))
    }

    /// Best-effort save at teardown, regardless of the timer
    pub fn shutdown(&mut self, store: &mut dyn SaveStore, state: &GameState) -> bool {
        self.record(save_game(store, state))
    }

    fn record(&mut self, saved: bool) -> bool {
        if saved {
            self.saves += 1;
        }
        saved
    }
}
