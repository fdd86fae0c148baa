//! Game facade
//!
//! `Game` owns the state, the random source, the content picker and the event
//! listener. The presentation layer drives everything through it.

use crate::catalog::Content;
use crate::events::{GameEvents, NullEvents};
use crate::grid::{generate_layer, DigResult};
use crate::ledger::grant_content;
use crate::options::DiggerOptions;
use crate::progression::{advance_depth, check_layer_completion, CompletionCheck};
use crate::rng::{GameRng, RandomSource};
use crate::select::{ContentPicker, ContentSelector};
use crate::shop::{self, PurchaseError};
use crate::state::GameState;

/// Everything one dig did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigOutcome {
    pub result: DigResult,
    /// Set on the hit that broke the cell
    pub revealed: Option<Content>,
    pub completion: CompletionCheck,
}

pub struct Game<E: GameEvents = NullEvents> {
    state: GameState,
    rng: Box<dyn RandomSource>,
    picker: Box<dyn ContentPicker>,
    events: E,
}

/// Seeded RNG when the options fix a seed, entropy otherwise
pub fn rng_from_options(options: &DiggerOptions) -> GameRng {
    let rng = match options.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    log::debug!("rng seed {}", rng.seed());
    rng
}

impl<E: GameEvents> Game<E> {
    /// Start a fresh game at depth 1
    pub fn new(grid_size: usize, rng: impl RandomSource + 'static, events: E) -> Self {
        let mut rng: Box<dyn RandomSource> = Box::new(rng);
        let picker: Box<dyn ContentPicker> = Box::new(ContentSelector);
        let state = GameState::new(grid_size, picker.as_ref(), rng.as_mut());
        Self {
            state,
            rng,
            picker,
            events,
        }
    }

    /// New game configured from options
    pub fn from_options(options: &DiggerOptions, events: E) -> Self {
        Game::new(options.grid_size, rng_from_options(options), events)
    }

    /// Resume from a loaded state
    ///
    /// A stored layer without cells is replaced by a freshly generated one at
    /// the stored depth.
    pub fn from_state(state: GameState, rng: impl RandomSource + 'static, events: E) -> Self {
        let mut game = Self {
            state,
            rng: Box::new(rng),
            picker: Box::new(ContentSelector),
            events,
        };
        if game.state.layer.cells.is_empty() {
            log::warn!("saved layer at depth {} is empty, regenerating", game.state.depth);
            game.state.grid_size = game.state.grid_size.max(1);
            game.state.layer = generate_layer(
                game.state.depth,
                game.state.grid_size,
                game.picker.as_ref(),
                game.rng.as_mut(),
            );
        }
        game
    }

    /// Resume a loaded state with the RNG the options call for
    pub fn resume(state: GameState, options: &DiggerOptions, events: E) -> Self {
        Game::from_state(state, rng_from_options(options), events)
    }

    /// Replace the content picker used for future layers
    pub fn with_picker(mut self, picker: impl ContentPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Swap the listener
    pub fn with_events<F: GameEvents>(self, events: F) -> Game<F> {
        Game {
            state: self.state,
            rng: self.rng,
            picker: self.picker,
            events,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Dig the cell at `index`; `None` if out of range
    ///
    /// Breaking a cell reveals its content, records it and checks the layer.
    pub fn dig(&mut self, index: usize) -> Option<DigOutcome> {
        let result = self.state.layer.dig(index)?;

        let mut revealed = None;
        if result.just_broken {
            self.state.stats.blocks_mined += 1;
            if let Some(cell) = self.state.layer.cell(index) {
                let content = cell.content;
                self.events.on_content_revealed(cell, content);
                revealed = Some(content);
            }
        }
        if let Some(content) = revealed {
            grant_content(&mut self.state, content, &mut self.events);
        }

        let completion = check_layer_completion(&mut self.state, &mut self.events);
        Some(DigOutcome {
            result,
            revealed,
            completion,
        })
    }

    /// Dig every cell until it breaks; returns the number of cells broken
    pub fn dig_all(&mut self) -> usize {
        let mut broken = 0;
        for index in 0..self.state.layer.cells.len() {
            while let Some(outcome) = self.dig(index) {
                if outcome.result.just_broken {
                    broken += 1;
                }
                if outcome.result.durability_remaining == 0 {
                    break;
                }
            }
        }
        broken
    }

    /// Descend once the current layer is complete; returns the new depth
    pub fn dig_deeper(&mut self) -> Option<u32> {
        if !self.state.layer.is_complete() {
            log::debug!("layer {} not complete, staying put", self.state.depth);
            return None;
        }
        // pays the reward if the layer was completed outside `dig`
        check_layer_completion(&mut self.state, &mut self.events);
        advance_depth(&mut self.state, self.picker.as_ref(), self.rng.as_mut());
        Some(self.state.depth)
    }

    pub fn purchase(&mut self, item_id: &str) -> Result<String, PurchaseError> {
        shop::purchase(&mut self.state, item_id, &mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GemKind, ResourceKind};
    use crate::events::{EventLog, GameEvent};
    use crate::grid::{Cell, Layer};
    use crate::rng::SequenceRng;

    /// Picker that always returns the same content
    struct Always(Content);

    impl ContentPicker for Always {
        fn pick(&self, _depth: u32, _rng: &mut dyn RandomSource) -> Content {
            self.0
        }
    }

    fn scripted_game(cells: Vec<Cell>) -> Game<EventLog> {
        let mut state = GameState::new(0, &ContentSelector, &mut SequenceRng::new(vec![0.5]));
        let size = (cells.len() as f64).sqrt() as usize;
        state.grid_size = size;
        state.layer = Layer::from_cells(1, size, cells);
        Game::from_state(state, SequenceRng::new(vec![0.5]), EventLog::new())
    }

    #[test]
    fn test_dig_breaks_and_reveals() {
        let ore = Content::Resource(ResourceKind::Ore);
        let mut game = scripted_game(vec![
            Cell::new(0, 2, ore),
            Cell::new(1, 1, Content::Gem(GemKind::Red)),
            Cell::new(2, 1, ore),
            Cell::new(3, 1, ore),
        ]);

        let first = game.dig(0).unwrap();
        assert!(!first.result.just_broken);
        assert!(first.revealed.is_none());
        assert!(game.events().events.is_empty());

        let second = game.dig(0).unwrap();
        assert!(second.result.just_broken);
        assert_eq!(second.revealed, Some(ore));
        assert_eq!(game.state().resources.ore, 1);
        assert_eq!(game.state().stats.blocks_mined, 1);
        assert_eq!(
            game.events().events,
            vec![GameEvent::ContentRevealed { index: 0, content: ore }]
        );

        // broken cells are left alone
        let third = game.dig(0).unwrap();
        assert!(!third.result.just_broken);
        assert_eq!(game.state().resources.ore, 1);
        assert_eq!(game.state().stats.blocks_mined, 1);
    }

    #[test]
    fn test_dig_out_of_range() {
        let mut game = scripted_game(vec![Cell::new(0, 1, Content::Gem(GemKind::Blue))]);
        let before = game.state().clone();
        assert!(game.dig(5).is_none());
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_completion_through_dig() {
        let stone = Content::Resource(ResourceKind::Stone);
        let mut game = scripted_game(vec![Cell::new(0, 1, stone)]);
        let outcome = game.dig(0).unwrap();
        assert!(outcome.completion.complete);
        assert!(outcome.completion.reward.is_some());
        assert_eq!(game.state().resources.stone, 1 + 6);
        assert_eq!(game.events().layer_completions(), 1);
    }

    #[test]
    fn test_dig_deeper_requires_complete_layer() {
        let mut game = Game::new(2, GameRng::new(5), EventLog::new());
        assert_eq!(game.dig_deeper(), None);
        assert_eq!(game.state().depth, 1);

        assert_eq!(game.dig_all(), 4);
        assert_eq!(game.dig_deeper(), Some(2));
        assert_eq!(game.state().layer.depth, 2);
        assert_eq!(game.state().stats.max_depth, 2);
        assert_eq!(game.events().layer_completions(), 1);
    }

    #[test]
    fn test_custom_picker() {
        let dirt = Content::Resource(ResourceKind::Dirt);
        let mut game = Game::new(2, GameRng::new(1), NullEvents).with_picker(Always(dirt));
        game.dig_all();
        game.dig_deeper();
        assert!(game.state().layer.cells.iter().all(|c| c.content == dirt));
    }

    #[test]
    fn test_from_options_seeded() {
        let options = DiggerOptions {
            grid_size: 3,
            seed: Some(99),
            ..DiggerOptions::default()
        };
        let a = Game::from_options(&options, NullEvents);
        let b = Game::from_options(&options, EventLog::new());
        assert_eq!(a.state(), b.state());
        assert_eq!(a.state().layer.cells.len(), 9);
        assert_eq!(rng_from_options(&options).seed(), 99);
    }

    #[test]
    fn test_empty_layer_cannot_be_farmed() {
        let mut state = GameState::new(2, &ContentSelector, &mut GameRng::new(4));
        state.grid_size = 0;
        state.layer = Layer::from_cells(1, 0, Vec::new());

        let mut game = Game::from_state(state, GameRng::new(4), EventLog::new());
        assert_eq!(game.state().layer.cells.len(), 1);
        assert_eq!(game.state().grid_size, 1);
        assert_eq!(game.dig_deeper(), None);
        assert_eq!(game.state().resources.stone, 0);
        assert_eq!(game.events().layer_completions(), 0);

        game.dig_all();
        assert_eq!(game.dig_deeper(), Some(2));
        assert_eq!(game.events().layer_completions(), 1);
    }

    #[test]
    fn test_resume_keeps_state() {
        let options = DiggerOptions {
            seed: Some(3),
            ..DiggerOptions::default()
        };
        let mut first = Game::from_options(&options, NullEvents);
        first.dig(0);
        let saved = first.into_state();
        let resumed = Game::resume(saved.clone(), &options, NullEvents);
        assert_eq!(resumed.state(), &saved);
    }

    #[test]
    fn test_purchase_through_game() {
        let mut game = Game::new(2, GameRng::new(2), EventLog::new());
        game.state_mut().resources.gems = 20;
        assert_eq!(
            game.purchase("magnet"),
            Ok("Gem Magnet added to your inventory!".to_string())
        );
        assert!(matches!(
            game.events().events.last(),
            Some(GameEvent::Purchase { result: Ok(_), .. })
        ));
    }
}
