//! Item system tests - effects fired through the lock step

use std::sync::Arc;

use blockfall::core::{ActivePiece, Cell, GameConfig, GameState, ItemConfig};
use blockfall::engine::RulesEngine;
use blockfall::types::{Color, Command, ItemKind, PieceKind};

fn stack(ys: std::ops::RangeInclusive<i32>, gap: i32) -> Vec<(i32, i32)> {
    ys.flat_map(|y| (0..10).filter(move |&x| x != gap).map(move |x| (x, y)))
        .collect()
}

fn tagged(kind: PieceKind, item: ItemKind, x: i32) -> ActivePiece {
    ActivePiece {
        x,
        ..ActivePiece::spawn(kind, Some(item), 10)
    }
}

fn setup(state: &Arc<GameState>, active: ActivePiece, cells: &[(i32, i32)]) -> Arc<GameState> {
    let mut next = GameState::clone(state);
    next.board_mut().clear();
    for &(x, y) in cells {
        next.board_mut().set(x, y, Cell::filled(Color::Gray));
    }
    next.set_active(Some(active));
    Arc::new(next)
}

#[test]
fn test_area_clear_on_lock() {
    let engine = RulesEngine::arcade();
    let state = setup(
        &engine.new_game(1),
        tagged(PieceKind::O, ItemKind::AreaClear, 4),
        &stack(15..=19, 0),
    );

    let (next, report) = engine.hard_drop(&state);
    let report = report.unwrap();
    assert_eq!(report.pivot.row, 14);
    assert_eq!(report.pivot.col, 4);
    assert_eq!(report.effects.len(), 1);

    let effect = &report.effects[0];
    assert_eq!(effect.kind, ItemKind::AreaClear);
    assert!(effect.success);
    // The four O cells plus rows 15-16 of columns 2..=6.
    assert_eq!(effect.blocks_cleared, 14);
    assert_eq!(effect.bonus_score, 70);
    assert_eq!(next.score(), 2 * 14 + 70);
    assert_eq!(next.board().occupied_count(), 45 - 10);
}

#[test]
fn test_line_clear_item_removes_its_own_row() {
    let engine = RulesEngine::arcade();
    let state = setup(
        &engine.new_game(1),
        tagged(PieceKind::I, ItemKind::LineClear, 4),
        &stack(17..=19, 0),
    );

    let (next, report) = engine.hard_drop(&state);
    let report = report.unwrap();
    let effect = &report.effects[0];
    assert_eq!(effect.kind, ItemKind::LineClear);
    assert_eq!(effect.lines_cleared, 1);
    assert_eq!(effect.blocks_cleared, 4);
    assert_eq!(effect.bonus_score, 100 + 40);
    assert_eq!(report.lines_cleared, 0);
    assert_eq!(report.total_lines(), 1);

    assert_eq!(next.board().occupied_count(), 27);
    assert_eq!(next.lines_cleared(), 1);
    assert_eq!(next.combo(), 0);
    assert_eq!(next.lines_until_next_item(), 9);
}

#[test]
fn test_cross_clear_on_lock() {
    let engine = RulesEngine::arcade();
    let state = setup(
        &engine.new_game(1),
        tagged(PieceKind::O, ItemKind::CrossClear, 4),
        &stack(18..=19, 0),
    );

    let (_, report) = engine.hard_drop(&state);
    let effect = &report.unwrap().effects[0];
    assert_eq!(effect.kind, ItemKind::CrossClear);
    // Row 17: the two O cells; column 4: rows 16, 18 and 19.
    assert_eq!(effect.blocks_cleared, 5);
    assert_eq!(effect.bonus_score, 25);
}

#[test]
fn test_heavy_piece_crushes_to_the_floor() {
    let engine = RulesEngine::arcade();
    let state = setup(
        &engine.new_game(1),
        tagged(PieceKind::Heavy, ItemKind::HeavyDrop, 4),
        &stack(15..=19, 0),
    );

    let (next, report) = engine.hard_drop(&state);
    let report = report.unwrap();
    assert_eq!(report.y, 19);
    assert_eq!(report.hard_drop_distance, 14);

    let effect = &report.effects[0];
    assert_eq!(effect.kind, ItemKind::HeavyDrop);
    assert_eq!(effect.blocks_cleared, 20);
    assert_eq!(next.score(), 2 * 14 + 200);
    for x in 3..=6 {
        assert!(next.board().is_occupied(x, 19));
    }
    assert!(!next.board().is_occupied(3, 17));
}

#[test]
fn test_heavy_piece_is_spawned_for_pending_heavy_drop() {
    let engine = RulesEngine::arcade();
    let mut state = GameState::clone(&engine.new_game(4));
    state.set_pending_item(Some(ItemKind::HeavyDrop));
    let state = Arc::new(state);

    let next = engine.apply(&state, Command::HardDrop).state;
    let active = next.active().unwrap();
    assert!(active.is_heavy());
    assert_eq!(active.item, Some(ItemKind::HeavyDrop));
}

#[test]
fn test_speed_reset_on_lock() {
    let engine = RulesEngine::arcade();
    let state = setup(
        &engine.new_game(1),
        tagged(PieceKind::T, ItemKind::SpeedReset, 4),
        &[],
    );
    let state = engine.set_soft_drop_speed(&state, 2.0);

    let (next, report) = engine.hard_drop(&state);
    assert_eq!(report.unwrap().effects[0].bonus_score, 100);
    assert_eq!(next.soft_drop_speed_multiplier(), 1.0);
    assert!(next.speed_reset_requested());

    let acked = engine.acknowledge_speed_reset(&next);
    assert!(!acked.speed_reset_requested());
}

#[test]
fn test_bonus_score_on_lock() {
    let engine = RulesEngine::arcade();
    let state = setup(
        &engine.new_game(1),
        tagged(PieceKind::S, ItemKind::BonusScore, 4),
        &[],
    );
    let (next, report) = engine.hard_drop(&state);
    let report = report.unwrap();
    assert_eq!(report.total_score(), 550);
    assert_eq!(next.score(), 2 * i64::from(report.hard_drop_distance) + 550);
}

#[test]
fn test_classic_mode_ignores_item_tags() {
    let engine = RulesEngine::classic();
    let state = setup(
        &engine.new_game(1),
        tagged(PieceKind::O, ItemKind::AreaClear, 4),
        &stack(15..=19, 0),
    );
    let (next, report) = engine.hard_drop(&state);
    assert!(report.unwrap().effects.is_empty());
    assert_eq!(next.board().occupied_count(), 45 + 4);
    assert!(next.pending_item().is_none());
}

#[test]
fn test_earned_item_rides_on_the_next_spawn() {
    let config = GameConfig {
        items: ItemConfig {
            enabled: vec![ItemKind::BonusScore],
            lines_per_item: 1,
            ..ItemConfig::default()
        },
        ..GameConfig::arcade()
    };
    let engine = RulesEngine::new(config).unwrap();

    let mut row = stack(19..=19, 8);
    row.retain(|&(x, _)| x != 9);
    let state = setup(
        &engine.new_game(1),
        ActivePiece {
            x: 8,
            ..ActivePiece::spawn(PieceKind::O, None, 10)
        },
        &row,
    );

    let (next, report) = engine.hard_drop(&state);
    assert_eq!(report.unwrap().lines_cleared, 1);
    assert_eq!(next.active().unwrap().item, Some(ItemKind::BonusScore));
    assert!(next.pending_item().is_none());
    assert_eq!(next.lines_until_next_item(), 1);

    // The tagged piece fires on its own lock; nothing new is earned without lines.
    let (after, report) = engine.hard_drop(&next);
    assert_eq!(report.unwrap().effects[0].kind, ItemKind::BonusScore);
    assert!(after.active().unwrap().item.is_none());
    assert!(after.pending_item().is_none());
}
