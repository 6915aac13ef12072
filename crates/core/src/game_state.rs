//! Game state module - the aggregate every transition replaces
//!
//! `GameState` bundles the board, the falling piece, hold slot, next queue, score and
//! streak counters, item bookkeeping and the generator cursor. The rules engine never
//! edits a state another caller can see: it clones, edits the clone through the methods
//! below, and hands the clone back. The whole value serializes, so a remote
//! authoritative copy can replace a local one wholesale.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::GameConfig;
use crate::pieces::Piece;
use crate::rng::{PieceGenerator, SimpleRng};
use crate::scoring::advance_level;
use crate::types::{Difficulty, ItemKind, PieceKind, LINES_PER_LEVEL};

/// Mixed into the game seed for the item RNG so it does not mirror the bag shuffles
const ITEM_RNG_SALT: u32 = 0x9E37_79B9;

pub const SPAWN_BLOCKED: &str = "Cannot spawn new piece: spawn position blocked";

/// Most minos any piece has (the heavy piece)
pub const MAX_MINOS: usize = 6;

/// Absolute mino positions of one piece
pub type MinoCells = ArrayVec<(i32, i32), MAX_MINOS>;

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub piece: Piece,
    /// Pivot column
    pub x: i32,
    /// Pivot row (may be negative while entering the board)
    pub y: i32,
    pub item: Option<ItemKind>,
    /// Heavy piece has touched down and may no longer slide
    pub heavy_locked: bool,
}

impl ActivePiece {
    /// A piece at the spawn pivot `(width / 2 - 1, 0)` in its north orientation
    pub fn spawn(kind: PieceKind, item: Option<ItemKind>, board_width: i32) -> Self {
        Self {
            piece: Piece::new(kind),
            x: board_width / 2 - 1,
            y: 0,
            item,
            heavy_locked: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.piece.kind()
    }

    pub fn is_heavy(&self) -> bool {
        self.kind() == PieceKind::Heavy
    }

    /// Absolute (x, y) of every mino
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        self.piece.cells_at(self.x, self.y)
    }

    /// Absolute cells collected without allocating
    pub fn minos(&self) -> MinoCells {
        self.cells().collect()
    }

    /// Check if all minos are at valid positions on the board
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().all(|(x, y)| board.accepts_mino(x, y))
    }

    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// How many rows the piece can fall (a read-only query, nothing moves)
    pub fn drop_distance(&self, board: &Board) -> u32 {
        let mut distance = 0;
        while self.moved(0, distance as i32 + 1).fits(board) {
            distance += 1;
        }
        distance
    }

    /// Any mino above the top edge
    pub fn is_above_top(&self) -> bool {
        self.cells().any(|(_, y)| y < 0)
    }
}

/// Contents of the hold slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeldPiece {
    pub kind: PieceKind,
    pub item: Option<ItemKind>,
    pub heavy_locked: bool,
}

/// What a scoring service receives when a game ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResult {
    pub name: String,
    pub score: i64,
    pub difficulty: Difficulty,
    pub item_mode: bool,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    hold: Option<HeldPiece>,
    hold_used_this_turn: bool,
    next_queue: Vec<PieceKind>,
    next_queue_len: usize,
    generator: PieceGenerator,
    /// Item randomness (marker cell, item kind)
    rng: SimpleRng,
    score: i64,
    level: u32,
    lines_cleared: u32,
    lines_for_next_level: u32,
    combo: u32,
    back_to_back: u32,
    last_clear_was_difficult: bool,
    last_action_was_rotation: bool,
    last_rotation_kick_index: usize,
    lines_until_next_item: u32,
    pending_item: Option<ItemKind>,
    soft_drop_speed_multiplier: f64,
    speed_reset_requested: bool,
    difficulty: Difficulty,
    item_mode: bool,
    paused: bool,
    game_over: bool,
    game_over_reason: Option<String>,
}

impl GameState {
    /// Create a new game and spawn the first piece
    pub fn new(config: &GameConfig, seed: u32) -> Self {
        let mut state = Self {
            board: Board::new(config.board_width, config.board_height),
            active: None,
            hold: None,
            hold_used_this_turn: false,
            next_queue: Vec::with_capacity(config.next_queue_len),
            next_queue_len: config.next_queue_len,
            generator: PieceGenerator::new(seed, config.difficulty),
            rng: SimpleRng::new(seed ^ ITEM_RNG_SALT),
            score: 0,
            level: config.start_level,
            lines_cleared: 0,
            lines_for_next_level: config.start_level * LINES_PER_LEVEL,
            combo: 0,
            back_to_back: 0,
            last_clear_was_difficult: false,
            last_action_was_rotation: false,
            last_rotation_kick_index: 0,
            lines_until_next_item: config.items.lines_per_item,
            pending_item: None,
            soft_drop_speed_multiplier: 1.0,
            speed_reset_requested: false,
            difficulty: config.difficulty,
            item_mode: config.items_enabled(),
            paused: false,
            game_over: false,
            game_over_reason: None,
        };
        state.spawn_next();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn set_active(&mut self, piece: Option<ActivePiece>) {
        self.active = piece;
    }

    pub fn hold(&self) -> Option<&HeldPiece> {
        self.hold.as_ref()
    }

    pub fn set_hold(&mut self, held: Option<HeldPiece>) {
        self.hold = held;
    }

    pub fn hold_used_this_turn(&self) -> bool {
        self.hold_used_this_turn
    }

    pub fn set_hold_used(&mut self, used: bool) {
        self.hold_used_this_turn = used;
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        &self.next_queue
    }

    pub fn generator(&self) -> &PieceGenerator {
        &self.generator
    }

    pub fn rng_mut(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }

    /// Re-read the lookahead from the generator cursor
    pub fn refresh_next_queue(&mut self) {
        self.next_queue = self.generator.preview(self.next_queue_len);
    }

    /// Take the next bag piece and refresh the lookahead
    pub fn draw_piece(&mut self) -> PieceKind {
        let kind = self.generator.draw();
        self.refresh_next_queue();
        kind
    }

    /// Spawn the next piece, consuming the pending item.
    ///
    /// A pending heavy drop brings in the heavy piece without touching the bag; any
    /// other pending item tags the next bag piece.
    pub fn spawn_next(&mut self) -> bool {
        let item = self.pending_item.take();
        let kind = match item {
            Some(ItemKind::HeavyDrop) => {
                self.refresh_next_queue();
                PieceKind::Heavy
            }
            _ => self.draw_piece(),
        };
        self.spawn_piece(kind, item, false, SPAWN_BLOCKED)
    }

    /// Place `kind` at the spawn pivot; a blocked spawn ends the game with `reason`
    pub fn spawn_piece(
        &mut self,
        kind: PieceKind,
        item: Option<ItemKind>,
        heavy_locked: bool,
        reason: &str,
    ) -> bool {
        let piece = ActivePiece {
            heavy_locked,
            ..ActivePiece::spawn(kind, item, self.board.width())
        };
        if !piece.fits(&self.board) {
            self.active = None;
            self.end_game(reason);
            return false;
        }
        self.active = Some(piece);
        true
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Add points; scores never go down
    pub fn add_score(&mut self, points: i64) {
        self.score = self.score.saturating_add(points.max(0));
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn lines_for_next_level(&self) -> u32 {
        self.lines_for_next_level
    }

    /// Count cleared lines toward the total and the level; returns whether the level rose
    pub fn add_lines(&mut self, lines: u32) -> bool {
        self.lines_cleared = self.lines_cleared.saturating_add(lines);
        let progress = advance_level(self.level, self.lines_for_next_level, self.lines_cleared);
        self.level = progress.level;
        self.lines_for_next_level = progress.lines_for_next_level;
        progress.leveled_up
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn back_to_back(&self) -> u32 {
        self.back_to_back
    }

    pub fn last_clear_was_difficult(&self) -> bool {
        self.last_clear_was_difficult
    }

    /// Streak update for a clearing lock
    pub fn record_clear(&mut self, difficult: bool) {
        self.combo += 1;
        self.back_to_back = if self.last_clear_was_difficult && difficult {
            self.back_to_back + 1
        } else if difficult {
            1
        } else {
            0
        };
        self.last_clear_was_difficult = difficult;
    }

    /// Streak update for a lock that cleared nothing
    pub fn reset_streaks(&mut self) {
        self.combo = 0;
        self.back_to_back = 0;
        self.last_clear_was_difficult = false;
    }

    pub fn last_action_was_rotation(&self) -> bool {
        self.last_action_was_rotation
    }

    pub fn last_rotation_kick_index(&self) -> usize {
        self.last_rotation_kick_index
    }

    pub fn mark_rotation(&mut self, kick_index: usize) {
        self.last_action_was_rotation = true;
        self.last_rotation_kick_index = kick_index;
    }

    pub fn clear_rotation(&mut self) {
        self.last_action_was_rotation = false;
        self.last_rotation_kick_index = 0;
    }

    pub fn lines_until_next_item(&self) -> u32 {
        self.lines_until_next_item
    }

    pub fn set_lines_until_next_item(&mut self, lines: u32) {
        self.lines_until_next_item = lines;
    }

    /// Item the next spawned piece will carry
    pub fn pending_item(&self) -> Option<ItemKind> {
        self.pending_item
    }

    pub fn set_pending_item(&mut self, item: Option<ItemKind>) {
        self.pending_item = item;
    }

    pub fn soft_drop_speed_multiplier(&self) -> f64 {
        self.soft_drop_speed_multiplier
    }

    pub fn set_soft_drop_speed_multiplier(&mut self, multiplier: f64) {
        self.soft_drop_speed_multiplier = multiplier;
    }

    pub fn speed_reset_requested(&self) -> bool {
        self.speed_reset_requested
    }

    /// Back to base soft drop speed, with a one-shot flag for the caller
    pub fn request_speed_reset(&mut self) {
        self.soft_drop_speed_multiplier = 1.0;
        self.speed_reset_requested = true;
    }

    pub fn acknowledge_speed_reset(&mut self) {
        self.speed_reset_requested = false;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn item_mode(&self) -> bool {
        self.item_mode
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn game_over_reason(&self) -> Option<&str> {
        self.game_over_reason.as_deref()
    }

    /// Enter the terminal state
    pub fn end_game(&mut self, reason: impl Into<String>) {
        self.game_over = true;
        self.game_over_reason = Some(reason.into());
    }

    /// Whether gameplay transitions apply (not paused, not over)
    pub fn is_playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Calculate the ghost piece Y position (where the active piece would land)
    pub fn ghost_y(&self) -> Option<i32> {
        let active = self.active.as_ref()?;
        Some(active.y + active.drop_distance(&self.board) as i32)
    }

    pub fn final_result(&self, name: impl Into<String>) -> FinalResult {
        FinalResult {
            name: name.into(),
            score: self.score,
            difficulty: self.difficulty,
            item_mode: self.item_mode,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default(), 1)
    }
}
