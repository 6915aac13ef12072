//! Cross clear: the pivot's row and column

use blockfall_core::types::ItemKind;
use blockfall_core::{EffectReport, GameState, Pivot};

use super::{gravity_and_recheck, ItemEffect, POINTS_PER_EFFECT_BLOCK};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossClear;

impl ItemEffect for CrossClear {
    fn kind(&self) -> ItemKind {
        ItemKind::CrossClear
    }

    fn apply(&self, state: &mut GameState, pivot: Pivot) -> EffectReport {
        let board = state.board_mut();
        if board.is_out_of_bounds(pivot.col, pivot.row) {
            return EffectReport::failed(self.kind(), "pivot outside the board");
        }

        let mut cleared_cells = Vec::new();
        for x in 0..board.width() {
            if board.clear_cell(x, pivot.row) {
                cleared_cells.push((x, pivot.row));
            }
        }
        // The intersection is already empty here, so it counts once.
        for y in 0..board.height() {
            if board.clear_cell(pivot.col, y) {
                cleared_cells.push((pivot.col, y));
            }
        }

        let lines = gravity_and_recheck(board, &cleared_cells);
        let blocks = cleared_cells.len();
        EffectReport {
            blocks_cleared: blocks,
            bonus_score: blocks as i64 * POINTS_PER_EFFECT_BLOCK,
            lines_cleared: lines,
            cleared_cells,
            ..EffectReport::succeeded(self.kind(), format!("cross clear removed {blocks} blocks"))
        }
    }
}
