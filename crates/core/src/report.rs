//! Transition reports
//!
//! A lock hands back a [`LockReport`] next to the new state instead of leaving scratch
//! fields on the state, so a report can never be read stale. Item effects describe
//! their outcome with an [`EffectReport`].

use serde::{Deserialize, Serialize};

use crate::pieces::Piece;
use crate::types::{ItemKind, TSpinKind};

/// A board coordinate given as (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pivot {
    pub row: i32,
    pub col: i32,
}

impl Pivot {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// What happened on the most recent lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockReport {
    pub piece: Piece,
    pub item: Option<ItemKind>,
    /// Final pivot position (x, y)
    pub x: i32,
    pub y: i32,
    /// Board cell item effects were anchored to
    pub pivot: Pivot,
    /// Board cells the piece was written to, as (x, y)
    pub cells: Vec<(i32, i32)>,
    /// Full rows removed by the regular line clear
    pub lines_cleared: usize,
    /// Row indices removed by the regular line clear, bottom to top
    pub cleared_rows: Vec<usize>,
    /// Line clear score (spin, streak and perfect clear bonuses included)
    pub score_earned: i64,
    /// Cells fallen on a hard drop
    pub hard_drop_distance: u32,
    pub perfect_clear: bool,
    pub level_up: bool,
    pub tspin: TSpinKind,
    /// The piece locked above the top edge and ended the game
    pub game_over: bool,
    /// Item effects triggered by this lock, in application order
    pub effects: Vec<EffectReport>,
}

impl LockReport {
    pub fn is_tspin(&self) -> bool {
        self.tspin.is_spin()
    }

    pub fn is_tspin_mini(&self) -> bool {
        self.tspin == TSpinKind::Mini
    }

    /// Lines removed by the regular clear and every item effect
    pub fn total_lines(&self) -> usize {
        self.lines_cleared + self.effects.iter().map(|e| e.lines_cleared).sum::<usize>()
    }

    /// Score from the line clear and every item effect
    pub fn total_score(&self) -> i64 {
        self.score_earned + self.effects.iter().map(|e| e.bonus_score).sum::<i64>()
    }
}

/// Outcome of applying one item effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectReport {
    pub kind: ItemKind,
    pub success: bool,
    /// Occupied cells the effect itself removed
    pub blocks_cleared: usize,
    pub bonus_score: i64,
    /// Rows removed by the effect (marked rows, or rows completed by gravity)
    pub lines_cleared: usize,
    /// Cells removed directly by the effect, as (x, y)
    pub cleared_cells: Vec<(i32, i32)>,
    pub message: String,
}

impl EffectReport {
    /// A rejected application: nothing changed
    pub fn failed(kind: ItemKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            success: false,
            blocks_cleared: 0,
            bonus_score: 0,
            lines_cleared: 0,
            cleared_cells: Vec::new(),
            message: message.into(),
        }
    }

    pub fn succeeded(kind: ItemKind, message: impl Into<String>) -> Self {
        Self {
            success: true,
            ..Self::failed(kind, message)
        }
    }
}
