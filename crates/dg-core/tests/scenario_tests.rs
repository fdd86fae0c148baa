use dg_core::shop::{self, available_items, remaining_purchases};
use dg_core::{
    Content, EventLog, Game, GameEvent, GameRng, LayerReward, PurchaseError, ResourceKind,
};

#[test]
fn test_clear_first_layer_pays_once() {
    let mut game = Game::new(5, GameRng::new(2024), EventLog::new());
    assert_eq!(game.state().depth, 1);

    let broken = game.dig_all();
    assert_eq!(broken, 25);
    assert!(game.state().layer.is_complete());
    assert_eq!(game.state().stats.blocks_mined, 25);

    let completions: Vec<&GameEvent> = game
        .events()
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::LayerComplete { .. }))
        .collect();
    assert_eq!(
        completions,
        vec![&GameEvent::LayerComplete {
            depth: 1,
            reward: LayerReward { stone: 6, gems: 1 }
        }]
    );

    // extra digs on a finished layer change nothing
    let snapshot = game.state().clone();
    for i in 0..25 {
        let outcome = game.dig(i).unwrap();
        assert!(outcome.completion.complete);
        assert!(outcome.completion.reward.is_none());
    }
    assert_eq!(game.state(), &snapshot);
    assert_eq!(game.events().layer_completions(), 1);
}

#[test]
fn test_counters_match_revealed_content() {
    let mut game = Game::new(5, GameRng::new(7), EventLog::new());
    game.dig_all();

    let revealed_stone = game
        .events()
        .events
        .iter()
        .filter(|e| {
            matches!(
                e,
                GameEvent::ContentRevealed {
                    content: Content::Resource(ResourceKind::Stone),
                    ..
                }
            )
        })
        .count() as u32;
    assert_eq!(game.state().resources.stone, revealed_stone + 6);
    assert_eq!(
        game.state()
            .inventory
            .quantity_of(Content::Resource(ResourceKind::Stone)),
        revealed_stone + 6
    );
}

#[test]
fn test_descend_several_layers() {
    let mut game = Game::new(3, GameRng::new(11), EventLog::new());
    for expected in 2..=4 {
        game.dig_all();
        assert_eq!(game.dig_deeper(), Some(expected));
    }
    let state = game.state();
    assert_eq!(state.depth, 4);
    assert_eq!(state.stats.max_depth, 4);
    assert_eq!(state.stats.blocks_mined, 27);
    assert_eq!(game.events().layer_completions(), 3);
    assert!(state.layer.cells.iter().all(|c| c.hardness >= 4 && !c.broken));
}

#[test]
fn test_cannot_afford_upgrade() {
    let mut game = Game::new(2, GameRng::new(3), EventLog::new());
    game.state_mut().resources.gems = 10;
    let before = game.state().clone();

    let result = game.purchase("pick_upgrade_1");
    assert!(matches!(
        result,
        Err(PurchaseError::InsufficientFunds { cost: 15, available: 10, .. })
    ));
    assert_eq!(game.state(), &before);
}

#[test]
fn test_single_level_item_sells_out() {
    let mut game = Game::new(2, GameRng::new(3), EventLog::new());
    {
        let state = game.state_mut();
        state.resources.gems = 250;
        state.tool.level = 3;
        state.depth = 3;
    }

    let item = shop::find_item("inventory_upgrade_3").unwrap();
    assert_eq!(item.max_level, Some(1));
    assert!(available_items(game.state()).iter().any(|i| i.id == item.id));

    assert_eq!(
        game.purchase(item.id),
        Ok("Inventory space increased by 30 slots!".to_string())
    );
    assert_eq!(game.state().inventory.max_capacity(), 80);
    assert_eq!(remaining_purchases(game.state(), item), Some(0));
    assert!(!available_items(game.state()).iter().any(|i| i.id == item.id));

    let gems = game.state().resources.gems;
    assert!(matches!(
        game.purchase(item.id),
        Err(PurchaseError::SoldOut { .. })
    ));
    assert_eq!(game.state().resources.gems, gems);
}
