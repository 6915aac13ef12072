//! Rules engine - every gameplay transition
//!
//! Transitions take the current state behind an `Arc` and return the next one. A
//! rejected or meaningless request hands back the same `Arc`, so callers can tell a
//! no-op apart with `Arc::ptr_eq`; anything else clones the state, edits the clone and
//! wraps it in a fresh `Arc`. Earlier states are never touched.

use std::sync::Arc;

use blockfall_core::kicks::{Kick, NO_KICK};
use blockfall_core::scoring::{calculate_drop_score, calculate_score, ScoreInput};
use blockfall_core::types::{Command, ItemKind, PieceKind, Rotation, RotationDirection, TSpinKind};
use blockfall_core::{
    kicks, ActivePiece, Board, Cell, ConfigError, GameConfig, GameState, HeldPiece, LockReport,
    Pivot,
};

use crate::items::{heavy, ItemSystem};

pub const LOCKED_ABOVE_TOP: &str = "Piece locked above the top of the board";
pub const HOLD_SPAWN_BLOCKED: &str = "Cannot spawn held piece: spawn position blocked";

/// Diagonal neighbors of the T pivot
const T_CORNERS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Result of dispatching one command
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: Arc<GameState>,
    /// Present when the command locked a piece
    pub lock: Option<LockReport>,
}

impl Transition {
    /// Whether the command was rejected (the state is the very same value)
    pub fn is_noop(&self, previous: &Arc<GameState>) -> bool {
        Arc::ptr_eq(&self.state, previous)
    }
}

impl From<Arc<GameState>> for Transition {
    fn from(state: Arc<GameState>) -> Self {
        Self { state, lock: None }
    }
}

impl From<(Arc<GameState>, Option<LockReport>)> for Transition {
    fn from((state, lock): (Arc<GameState>, Option<LockReport>)) -> Self {
        Self { state, lock }
    }
}

/// The active piece, if gameplay input applies right now
fn playable_piece(state: &GameState) -> Option<ActivePiece> {
    if !state.is_playable() {
        return None;
    }
    state.active().copied()
}

/// Where item effects are anchored: the pivot when it is on the board, else the first
/// placed cell that is
fn effect_pivot(board: &Board, piece: &ActivePiece) -> Pivot {
    if !board.is_out_of_bounds(piece.x, piece.y) {
        return Pivot::new(piece.y, piece.x);
    }
    piece
        .cells()
        .find(|&(x, y)| !board.is_out_of_bounds(x, y))
        .map(|(x, y)| Pivot::new(y, x))
        .unwrap_or_else(|| Pivot::new(piece.y, piece.x))
}

/// Classify a T piece lock from the board before it is stamped.
///
/// Needs the last action to be a rotation and at least three of the four pivot
/// diagonals blocked. A spin reached through the last kick candidate is always full;
/// otherwise both front corners must be blocked for a full spin.
pub fn detect_tspin(state: &GameState, piece: &ActivePiece) -> TSpinKind {
    if piece.kind() != PieceKind::T || !state.last_action_was_rotation() {
        return TSpinKind::None;
    }

    let board = state.board();
    let blocked = |&(dx, dy): &(i32, i32)| board.is_blocked(piece.x + dx, piece.y + dy);

    if T_CORNERS.iter().filter(|&c| blocked(c)).count() < 3 {
        return TSpinKind::None;
    }
    if state.last_rotation_kick_index() == 4 {
        return TSpinKind::Full;
    }

    let front: [(i32, i32); 2] = match piece.piece.rotation() {
        Rotation::North => [(-1, -1), (1, -1)],
        Rotation::East => [(1, -1), (1, 1)],
        Rotation::South => [(-1, 1), (1, 1)],
        Rotation::West => [(-1, -1), (-1, 1)],
    };
    if front.iter().all(blocked) {
        TSpinKind::Full
    } else {
        TSpinKind::Mini
    }
}

/// Stateless rules over immutable game states
#[derive(Debug)]
pub struct RulesEngine {
    config: GameConfig,
    /// Present in arcade mode
    items: Option<ItemSystem>,
}

impl RulesEngine {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let items = config
            .items_enabled()
            .then(|| ItemSystem::new(config.items.clone()));
        Ok(Self { config, items })
    }

    /// Plain rules with the default setup
    pub fn classic() -> Self {
        Self {
            config: GameConfig::classic(),
            items: None,
        }
    }

    /// Default setup with every item enabled
    pub fn arcade() -> Self {
        let config = GameConfig::arcade();
        let items = Some(ItemSystem::new(config.items.clone()));
        Self { config, items }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn items(&self) -> Option<&ItemSystem> {
        self.items.as_ref()
    }

    /// Fresh game with its first piece in play
    pub fn new_game(&self, seed: u32) -> Arc<GameState> {
        Arc::new(GameState::new(&self.config, seed))
    }

    pub fn try_move_left(&self, state: &Arc<GameState>) -> Arc<GameState> {
        self.try_shift(state, -1)
    }

    pub fn try_move_right(&self, state: &Arc<GameState>) -> Arc<GameState> {
        self.try_shift(state, 1)
    }

    fn try_shift(&self, state: &Arc<GameState>, dx: i32) -> Arc<GameState> {
        let Some(active) = playable_piece(state) else {
            return Arc::clone(state);
        };
        if active.heavy_locked {
            return Arc::clone(state);
        }

        let moved = active.moved(dx, 0);
        if !moved.fits(state.board()) {
            return Arc::clone(state);
        }

        let mut next = GameState::clone(state);
        next.set_active(Some(moved));
        next.clear_rotation();
        Arc::new(next)
    }

    /// Move the piece down one row.
    ///
    /// A failed move returns the same `Arc`: the piece is resting and the caller should
    /// lock it. In arcade mode the heavy piece digs before each step, and its first
    /// failed step only latches it in place.
    pub fn try_move_down(&self, state: &Arc<GameState>, is_soft_drop: bool) -> Arc<GameState> {
        let Some(active) = playable_piece(state) else {
            return Arc::clone(state);
        };
        if active.is_heavy() && self.items.is_some() {
            return self.heavy_step(state, active, is_soft_drop);
        }

        let moved = active.moved(0, 1);
        if !moved.fits(state.board()) {
            return Arc::clone(state);
        }

        let mut next = GameState::clone(state);
        next.set_active(Some(moved));
        next.clear_rotation();
        if is_soft_drop {
            next.add_score(calculate_drop_score(1, false));
        }
        Arc::new(next)
    }

    fn heavy_step(
        &self,
        state: &Arc<GameState>,
        active: ActivePiece,
        is_soft_drop: bool,
    ) -> Arc<GameState> {
        let mut next = GameState::clone(state);
        let dug = heavy::dig_beneath(next.board_mut(), &active);
        next.add_score(dug.len() as i64 * heavy::POINTS_PER_HEAVY_BLOCK);

        let moved = active.moved(0, 1);
        if moved.fits(next.board()) {
            next.set_active(Some(moved));
            if is_soft_drop {
                next.add_score(calculate_drop_score(1, false));
            }
            return Arc::new(next);
        }

        if !active.heavy_locked {
            next.set_active(Some(ActivePiece {
                heavy_locked: true,
                ..active
            }));
            return Arc::new(next);
        }

        if dug.is_empty() {
            Arc::clone(state)
        } else {
            Arc::new(next)
        }
    }

    /// Rotate with wall kicks; without SRS only the unshifted placement is tried
    pub fn try_rotate(
        &self,
        state: &Arc<GameState>,
        direction: RotationDirection,
        srs_enabled: bool,
    ) -> Arc<GameState> {
        let Some(active) = playable_piece(state) else {
            return Arc::clone(state);
        };
        let kind = active.kind();
        if !kind.can_rotate() {
            return Arc::clone(state);
        }

        let rotated = active.piece.rotated(direction);
        let candidates: &[Kick] = if srs_enabled {
            kicks(kind, active.piece.rotation(), rotated.rotation())
        } else {
            &NO_KICK
        };

        for (kick_index, &(dx, dy)) in candidates.iter().enumerate() {
            let candidate = ActivePiece {
                piece: rotated,
                x: active.x + dx,
                y: active.y + dy,
                ..active
            };
            if candidate.fits(state.board()) {
                let mut next = GameState::clone(state);
                next.set_active(Some(candidate));
                next.mark_rotation(kick_index);
                return Arc::new(next);
            }
        }

        Arc::clone(state)
    }

    /// Drop to the landing row, score 2 per row, and lock in the same step
    pub fn hard_drop(&self, state: &Arc<GameState>) -> (Arc<GameState>, Option<LockReport>) {
        let Some(active) = playable_piece(state) else {
            return (Arc::clone(state), None);
        };

        let distance = active.drop_distance(state.board());
        let mut next = GameState::clone(state);
        next.add_score(calculate_drop_score(distance, true));
        if distance > 0 {
            next.clear_rotation();
        }

        let report = self.lock_piece(&mut next, active.moved(0, distance as i32), distance);
        (Arc::new(next), Some(report))
    }

    /// Swap the active piece with the hold slot (once per piece)
    pub fn try_hold(&self, state: &Arc<GameState>) -> Arc<GameState> {
        let Some(active) = playable_piece(state) else {
            return Arc::clone(state);
        };
        if !self.config.hold_enabled
            || state.hold_used_this_turn()
            || state.next_queue().is_empty()
        {
            return Arc::clone(state);
        }

        let mut next = GameState::clone(state);
        let outgoing = HeldPiece {
            kind: active.kind(),
            item: active.item,
            heavy_locked: active.heavy_locked,
        };

        match next.hold().copied() {
            Some(held) => {
                next.set_hold(Some(outgoing));
                next.spawn_piece(held.kind, held.item, held.heavy_locked, HOLD_SPAWN_BLOCKED);
            }
            None => {
                next.set_hold(Some(outgoing));
                next.spawn_next();
            }
        }

        next.set_hold_used(true);
        next.clear_rotation();
        Arc::new(next)
    }

    /// Lock the active piece where it is
    pub fn lock_tetromino(&self, state: &Arc<GameState>) -> (Arc<GameState>, Option<LockReport>) {
        let Some(active) = playable_piece(state) else {
            return (Arc::clone(state), None);
        };
        let mut next = GameState::clone(state);
        let report = self.lock_piece(&mut next, active, 0);
        (Arc::new(next), Some(report))
    }

    /// Caller-driven gravity: move down, or lock when the piece cannot fall
    pub fn gravity_step(&self, state: &Arc<GameState>) -> Transition {
        let moved = self.try_move_down(state, false);
        if !Arc::ptr_eq(&moved, state) {
            return moved.into();
        }
        self.lock_tetromino(state).into()
    }

    fn lock_piece(
        &self,
        state: &mut GameState,
        mut active: ActivePiece,
        hard_drop_distance: u32,
    ) -> LockReport {
        state.set_active(None);
        let mut effects = Vec::new();

        if active.is_heavy() && self.items.is_some() {
            let (settled, settle) = heavy::settle(state.board_mut(), active);
            active = settled;
            effects.push(settle);
        }

        let tspin = detect_tspin(state, &active);
        let minos = active.minos();
        let mut report = LockReport {
            piece: active.piece,
            item: active.item,
            x: active.x,
            y: active.y,
            pivot: effect_pivot(state.board(), &active),
            cells: minos.to_vec(),
            lines_cleared: 0,
            cleared_rows: Vec::new(),
            score_earned: 0,
            hard_drop_distance,
            perfect_clear: false,
            level_up: false,
            tspin,
            game_over: false,
            effects,
        };

        if active.is_above_top() {
            state.end_game(LOCKED_ABOVE_TOP);
            report.tspin = TSpinKind::None;
            report.game_over = true;
            return report;
        }

        let color = active.piece.color();
        for &(x, y) in &minos {
            state.board_mut().set(x, y, Cell::filled(color));
        }

        if let Some(items) = &self.items {
            if active.item == Some(ItemKind::LineClear) {
                items.attach_marker(state, &minos);
            }
            if let Some(marked) = items.clear_marked_lines(state) {
                report.effects.push(marked);
            }
            if let Some(kind) = active.item {
                if let Some(effect) = items.apply_carried(kind, state, report.pivot) {
                    report.effects.push(effect);
                }
            }
        }

        let mut effect_lines = 0;
        for effect in report.effects.iter().filter(|e| e.success) {
            state.add_score(effect.bonus_score);
            effect_lines += effect.lines_cleared;
        }

        let cleared_rows = state.board_mut().clear_full_rows();
        let lines = cleared_rows.len();
        let perfect_clear = lines > 0 && state.board().is_empty();

        let score = calculate_score(ScoreInput {
            lines,
            tspin,
            level: state.level(),
            combo: state.combo(),
            back_to_back: state.back_to_back(),
            perfect_clear,
        });
        state.add_score(score.total);
        if lines > 0 {
            state.record_clear(score.difficult);
        } else {
            state.reset_streaks();
        }
        let level_up = state.add_lines((lines + effect_lines) as u32);

        report.lines_cleared = lines;
        report.cleared_rows = cleared_rows;
        report.score_earned = score.total;
        report.perfect_clear = perfect_clear;
        report.level_up = level_up;

        // An item earned here rides on the piece spawned right below.
        if let Some(items) = &self.items {
            items.advance_cadence(state, lines + effect_lines);
        }

        state.set_hold_used(false);
        state.clear_rotation();
        state.spawn_next();

        report
    }

    pub fn pause(&self, state: &Arc<GameState>) -> Arc<GameState> {
        if state.paused() || state.game_over() {
            return Arc::clone(state);
        }
        let mut next = GameState::clone(state);
        next.set_paused(true);
        Arc::new(next)
    }

    pub fn resume(&self, state: &Arc<GameState>) -> Arc<GameState> {
        if !state.paused() {
            return Arc::clone(state);
        }
        let mut next = GameState::clone(state);
        next.set_paused(false);
        Arc::new(next)
    }

    /// Clear the one-shot flag a speed reset item raised
    pub fn acknowledge_speed_reset(&self, state: &Arc<GameState>) -> Arc<GameState> {
        if !state.speed_reset_requested() {
            return Arc::clone(state);
        }
        let mut next = GameState::clone(state);
        next.acknowledge_speed_reset();
        Arc::new(next)
    }

    /// Change the soft drop speed multiplier (positive and finite only)
    pub fn set_soft_drop_speed(&self, state: &Arc<GameState>, multiplier: f64) -> Arc<GameState> {
        if state.game_over()
            || !multiplier.is_finite()
            || multiplier <= 0.0
            || multiplier == state.soft_drop_speed_multiplier()
        {
            return Arc::clone(state);
        }
        let mut next = GameState::clone(state);
        next.set_soft_drop_speed_multiplier(multiplier);
        Arc::new(next)
    }

    /// Dispatch one command
    pub fn apply(&self, state: &Arc<GameState>, command: Command) -> Transition {
        match command {
            Command::MoveLeft => self.try_move_left(state).into(),
            Command::MoveRight => self.try_move_right(state).into(),
            Command::SoftDrop => self.try_move_down(state, true).into(),
            Command::Gravity => self.gravity_step(state),
            Command::RotateCw => self
                .try_rotate(state, RotationDirection::Clockwise, self.config.srs_enabled)
                .into(),
            Command::RotateCcw => self
                .try_rotate(
                    state,
                    RotationDirection::CounterClockwise,
                    self.config.srs_enabled,
                )
                .into(),
            Command::HardDrop => self.hard_drop(state).into(),
            Command::Hold => self.try_hold(state).into(),
            Command::Pause => self.pause(state).into(),
            Command::Resume => self.resume(state).into(),
        }
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::{Color, ItemKind};
    use blockfall_core::Piece;

    fn with_active(engine: &RulesEngine, piece: ActivePiece, cells: &[(i32, i32)]) -> Arc<GameState> {
        let mut state = GameState::clone(&engine.new_game(7));
        for &(x, y) in cells {
            state.board_mut().set(x, y, Cell::filled(Color::Gray));
        }
        state.set_active(Some(piece));
        Arc::new(state)
    }

    fn piece(kind: PieceKind, x: i32, y: i32) -> ActivePiece {
        ActivePiece {
            x,
            y,
            ..ActivePiece::spawn(kind, None, 10)
        }
    }

    #[test]
    fn test_rejected_move_returns_same_arc() {
        let engine = RulesEngine::classic();
        let mut state = engine.new_game(1);
        for _ in 0..10 {
            state = engine.try_move_left(&state);
        }
        let again = engine.try_move_left(&state);
        assert!(Arc::ptr_eq(&again, &state));
    }

    #[test]
    fn test_successful_move_leaves_old_state_alone() {
        let engine = RulesEngine::classic();
        let state = engine.new_game(1);
        let x = state.active().unwrap().x;

        let moved = engine.try_move_right(&state);
        assert_eq!(moved.active().unwrap().x, x + 1);
        assert_eq!(state.active().unwrap().x, x);
    }

    #[test]
    fn test_soft_drop_scores_gravity_does_not() {
        let engine = RulesEngine::classic();
        let state = engine.new_game(3);
        assert_eq!(engine.try_move_down(&state, true).score(), 1);
        assert_eq!(engine.try_move_down(&state, false).score(), 0);
    }

    #[test]
    fn test_move_down_on_floor_is_noop() {
        let engine = RulesEngine::classic();
        let state = with_active(&engine, piece(PieceKind::O, 4, 19), &[]);
        assert!(Arc::ptr_eq(&engine.try_move_down(&state, true), &state));
    }

    #[test]
    fn test_o_does_not_rotate() {
        let engine = RulesEngine::classic();
        let state = with_active(&engine, piece(PieceKind::O, 4, 10), &[]);
        let rotated = engine.try_rotate(&state, RotationDirection::Clockwise, true);
        assert!(Arc::ptr_eq(&rotated, &state));
    }

    #[test]
    fn test_wall_kick_needs_srs() {
        let engine = RulesEngine::classic();
        let vertical = ActivePiece {
            piece: Piece::new(PieceKind::I).rotated(RotationDirection::Clockwise),
            ..piece(PieceKind::I, -1, 10)
        };
        let state = with_active(&engine, vertical, &[]);

        let plain = engine.try_rotate(&state, RotationDirection::Clockwise, false);
        assert!(Arc::ptr_eq(&plain, &state));

        let kicked = engine.try_rotate(&state, RotationDirection::Clockwise, true);
        assert!(!Arc::ptr_eq(&kicked, &state));
        assert_eq!(kicked.last_rotation_kick_index(), 2);
        assert!(kicked.last_action_was_rotation());
        assert_eq!(kicked.active().unwrap().piece.rotation(), Rotation::South);
    }

    #[test]
    fn test_move_clears_rotation_flag() {
        let engine = RulesEngine::classic();
        let state = with_active(&engine, piece(PieceKind::T, 4, 10), &[]);
        let rotated = engine.try_rotate(&state, RotationDirection::Clockwise, true);
        assert!(rotated.last_action_was_rotation());
        let moved = engine.try_move_left(&rotated);
        assert!(!moved.last_action_was_rotation());
    }

    fn t_south(cells: &[(i32, i32)], kick_index: usize) -> TSpinKind {
        let engine = RulesEngine::classic();
        let t = ActivePiece {
            piece: Piece::new(PieceKind::T)
                .rotated(RotationDirection::Clockwise)
                .rotated(RotationDirection::Clockwise),
            ..piece(PieceKind::T, 4, 18)
        };
        let mut state = GameState::clone(&with_active(&engine, t, cells));
        state.mark_rotation(kick_index);
        detect_tspin(&state, &t)
    }

    #[test]
    fn test_tspin_full_with_both_front_corners() {
        assert_eq!(t_south(&[(3, 19), (5, 19), (3, 17)], 0), TSpinKind::Full);
    }

    #[test]
    fn test_tspin_mini_with_one_front_corner() {
        assert_eq!(t_south(&[(3, 17), (5, 17), (3, 19)], 0), TSpinKind::Mini);
    }

    #[test]
    fn test_mini_lock_scores_without_lines() {
        let engine = RulesEngine::classic();
        let t = ActivePiece {
            piece: Piece::new(PieceKind::T)
                .rotated(RotationDirection::Clockwise)
                .rotated(RotationDirection::Clockwise),
            ..piece(PieceKind::T, 4, 18)
        };
        let mut state = GameState::clone(&with_active(&engine, t, &[(3, 17), (5, 17), (3, 19)]));
        state.mark_rotation(0);

        let (next, report) = engine.lock_tetromino(&Arc::new(state));
        let report = report.unwrap();
        assert!(report.is_tspin_mini());
        assert_eq!(report.lines_cleared, 0);
        assert_eq!(report.score_earned, 100);
        assert_eq!(next.score(), 100);
    }

    #[test]
    fn test_last_kick_is_never_mini() {
        assert_eq!(t_south(&[(3, 17), (5, 17), (3, 19)], 4), TSpinKind::Full);
    }

    #[test]
    fn test_two_corners_is_no_spin() {
        assert_eq!(t_south(&[(3, 19), (5, 19)], 0), TSpinKind::None);
    }

    #[test]
    fn test_no_spin_without_rotation() {
        let engine = RulesEngine::classic();
        let t = piece(PieceKind::T, 4, 18);
        let state = with_active(&engine, t, &[(3, 17), (5, 17), (3, 19), (5, 19)]);
        assert_eq!(detect_tspin(&state, &t), TSpinKind::None);
    }

    #[test]
    fn test_hold_once_per_piece() {
        let engine = RulesEngine::classic();
        let state = engine.new_game(11);
        let first = state.active().unwrap().kind();
        let upcoming = state.next_queue()[0];

        let held = engine.try_hold(&state);
        assert_eq!(held.hold().map(|h| h.kind), Some(first));
        assert_eq!(held.active().unwrap().kind(), upcoming);
        assert!(held.hold_used_this_turn());

        let again = engine.try_hold(&held);
        assert!(Arc::ptr_eq(&again, &held));
    }

    #[test]
    fn test_hold_swap_keeps_item_tag() {
        let engine = RulesEngine::arcade();
        let mut tagged = piece(PieceKind::L, 4, 5);
        tagged.item = Some(ItemKind::AreaClear);
        let state = with_active(&engine, tagged, &[]);

        let held = engine.try_hold(&state);
        assert_eq!(held.hold().and_then(|h| h.item), Some(ItemKind::AreaClear));

        // Lock the replacement, then swap back.
        let (locked, _) = engine.hard_drop(&held);
        let back = engine.try_hold(&locked);
        let active = back.active().unwrap();
        assert_eq!(active.kind(), PieceKind::L);
        assert_eq!(active.item, Some(ItemKind::AreaClear));
        assert_eq!((active.x, active.y), (4, 0));
    }

    #[test]
    fn test_hold_disabled() {
        let config = GameConfig {
            hold_enabled: false,
            ..GameConfig::classic()
        };
        let engine = RulesEngine::new(config).unwrap();
        let state = engine.new_game(2);
        assert!(Arc::ptr_eq(&engine.try_hold(&state), &state));
    }

    #[test]
    fn test_heavy_latches_before_locking() {
        let engine = RulesEngine::arcade();
        let mut heavy = piece(PieceKind::Heavy, 4, 19);
        heavy.item = Some(ItemKind::HeavyDrop);
        let state = with_active(&engine, heavy, &[]);

        let latched = engine.try_move_down(&state, false);
        assert!(!Arc::ptr_eq(&latched, &state));
        assert!(latched.active().unwrap().heavy_locked);

        assert!(Arc::ptr_eq(&engine.try_move_down(&latched, false), &latched));
        assert!(Arc::ptr_eq(&engine.try_move_left(&latched), &latched));
    }

    #[test]
    fn test_hold_keeps_heavy_latch() {
        let engine = RulesEngine::arcade();
        let mut heavy = piece(PieceKind::Heavy, 4, 19);
        heavy.item = Some(ItemKind::HeavyDrop);
        let latched = engine.try_move_down(&with_active(&engine, heavy, &[]), false);

        let held = engine.try_hold(&latched);
        let slot = held.hold().copied().unwrap();
        assert_eq!(slot.kind, PieceKind::Heavy);
        assert!(slot.heavy_locked);
        assert!(!held.active().unwrap().is_heavy());

        let (locked, _) = engine.hard_drop(&held);
        let back = engine.try_hold(&locked);
        let active = back.active().unwrap();
        assert!(active.is_heavy());
        assert!(active.heavy_locked);
        assert_eq!(active.item, Some(ItemKind::HeavyDrop));
        assert!(Arc::ptr_eq(&engine.try_move_left(&back), &back));
        assert!(Arc::ptr_eq(&engine.try_move_right(&back), &back));
    }

    #[test]
    fn test_heavy_digs_while_falling() {
        let engine = RulesEngine::arcade();
        let heavy = piece(PieceKind::Heavy, 4, 10);
        let state = with_active(&engine, heavy, &[(3, 11), (6, 11), (0, 11)]);

        let next = engine.try_move_down(&state, false);
        assert_eq!(next.active().unwrap().y, 11);
        assert_eq!(next.score(), 20);
        assert!(next.board().is_occupied(0, 11));
    }

    #[test]
    fn test_heavy_in_classic_is_an_ordinary_piece() {
        let engine = RulesEngine::classic();
        let heavy = piece(PieceKind::Heavy, 4, 10);
        let state = with_active(&engine, heavy, &[(3, 11)]);
        assert!(Arc::ptr_eq(&engine.try_move_down(&state, false), &state));
    }

    #[test]
    fn test_lock_above_top_ends_game() {
        let engine = RulesEngine::classic();
        let state = with_active(&engine, piece(PieceKind::T, 4, 0), &[(3, 1), (4, 1), (5, 1)]);

        let (over, report) = engine.lock_tetromino(&state);
        let report = report.unwrap();
        assert!(report.game_over);
        assert_eq!(report.lines_cleared, 0);
        assert_eq!(report.score_earned, 0);
        assert!(over.game_over());
        assert!(over.game_over_reason().is_some());

        for command in [Command::MoveLeft, Command::HardDrop, Command::Hold, Command::Pause] {
            assert!(engine.apply(&over, command).is_noop(&over));
        }
    }

    #[test]
    fn test_pause_and_resume() {
        let engine = RulesEngine::classic();
        let state = engine.new_game(4);
        let paused = engine.pause(&state);
        assert!(paused.paused());
        assert!(Arc::ptr_eq(&engine.pause(&paused), &paused));
        assert!(engine.apply(&paused, Command::MoveLeft).is_noop(&paused));
        assert!(engine.apply(&paused, Command::HardDrop).lock.is_none());

        let resumed = engine.resume(&paused);
        assert!(!resumed.paused());
        assert!(Arc::ptr_eq(&engine.resume(&resumed), &resumed));
    }

    #[test]
    fn test_soft_drop_speed_and_acknowledge() {
        let engine = RulesEngine::arcade();
        let state = engine.new_game(4);
        assert!(Arc::ptr_eq(&engine.set_soft_drop_speed(&state, 0.0), &state));
        assert!(Arc::ptr_eq(&engine.set_soft_drop_speed(&state, f64::NAN), &state));

        let faster = engine.set_soft_drop_speed(&state, 3.0);
        assert_eq!(faster.soft_drop_speed_multiplier(), 3.0);

        assert!(Arc::ptr_eq(&engine.acknowledge_speed_reset(&faster), &faster));
        let mut raw = GameState::clone(&faster);
        raw.request_speed_reset();
        let raw = Arc::new(raw);
        let acked = engine.acknowledge_speed_reset(&raw);
        assert!(!acked.speed_reset_requested());
    }

    #[test]
    fn test_gravity_step_locks_resting_piece() {
        let engine = RulesEngine::classic();
        let state = with_active(&engine, piece(PieceKind::O, 4, 19), &[]);
        let step = engine.gravity_step(&state);
        assert!(step.lock.is_some());
        assert!(step.state.board().is_occupied(4, 19));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            board_width: 1,
            ..GameConfig::classic()
        };
        assert_eq!(
            RulesEngine::new(config).err(),
            Some(ConfigError::BoardWidth(1))
        );
    }
}
