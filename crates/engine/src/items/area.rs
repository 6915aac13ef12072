//! Area clear: removes a square around the pivot

use blockfall_core::types::{ItemKind, AREA_CLEAR_RADIUS};
use blockfall_core::{EffectReport, GameState, Pivot};

use super::{gravity_and_recheck, ItemEffect, POINTS_PER_EFFECT_BLOCK};

/// Clears a `(2r + 1)` square centered on the pivot, clamped to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaClear {
    radius: i32,
}

impl AreaClear {
    pub fn new(radius: u8) -> Self {
        Self {
            radius: i32::from(radius),
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }
}

impl Default for AreaClear {
    fn default() -> Self {
        Self::new(AREA_CLEAR_RADIUS)
    }
}

impl ItemEffect for AreaClear {
    fn kind(&self) -> ItemKind {
        ItemKind::AreaClear
    }

    fn apply(&self, state: &mut GameState, pivot: Pivot) -> EffectReport {
        let board = state.board_mut();
        if board.is_out_of_bounds(pivot.col, pivot.row) {
            return EffectReport::failed(self.kind(), "pivot outside the board");
        }

        let rows = (pivot.row - self.radius).max(0)..=(pivot.row + self.radius).min(board.height() - 1);
        let cols = (pivot.col - self.radius).max(0)..=(pivot.col + self.radius).min(board.width() - 1);

        let mut cleared_cells = Vec::new();
        for y in rows {
            for x in cols.clone() {
                if board.clear_cell(x, y) {
                    cleared_cells.push((x, y));
                }
            }
        }

        let lines = gravity_and_recheck(board, &cleared_cells);
        let blocks = cleared_cells.len();
        EffectReport {
            blocks_cleared: blocks,
            bonus_score: blocks as i64 * POINTS_PER_EFFECT_BLOCK,
            lines_cleared: lines,
            cleared_cells,
            ..EffectReport::succeeded(self.kind(), format!("area clear removed {blocks} blocks"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::tests::{filled_state, state_with_cells};

    #[test]
    fn test_full_board_center_clears_twenty_five() {
        let mut state = filled_state();
        let report = AreaClear::default().apply(&mut state, Pivot::new(10, 5));

        assert!(report.success);
        assert_eq!(report.blocks_cleared, 25);
        assert_eq!(report.bonus_score, 125);
        // Columns 3..=7 fall by five, leaving rows 5..=19 full.
        assert_eq!(report.lines_cleared, 15);
    }

    #[test]
    fn test_corner_is_clamped() {
        let mut state = filled_state();
        let report = AreaClear::default().apply(&mut state, Pivot::new(0, 0));
        assert!(report.success);
        assert_eq!(report.blocks_cleared, 9);
        assert!(report.cleared_cells.iter().all(|&(x, y)| x <= 2 && y <= 2));
    }

    #[test]
    fn test_out_of_range_pivot_fails_without_change() {
        let mut state = filled_state();
        let before = state.clone();
        let report = AreaClear::default().apply(&mut state, Pivot::new(25, 3));
        assert!(!report.success);
        assert_eq!(report.blocks_cleared, 0);
        assert_eq!(state, before);

        let report = AreaClear::default().apply(&mut state, Pivot::new(-1, -1));
        assert!(!report.success);
    }

    #[test]
    fn test_empty_area_still_succeeds() {
        let mut state = state_with_cells(&[(0, 19)]);
        let report = AreaClear::new(1).apply(&mut state, Pivot::new(5, 5));
        assert!(report.success);
        assert_eq!(report.blocks_cleared, 0);
        assert_eq!(state.board().occupied_count(), 1);
    }

    #[test]
    fn test_empty_area_moves_nothing() {
        let mut state = state_with_cells(&[(0, 10)]);
        let report = AreaClear::new(1).apply(&mut state, Pivot::new(19, 7));
        assert!(report.success);
        assert_eq!(report.blocks_cleared, 0);
        assert!(state.board().is_occupied(0, 10));
        assert!(!state.board().is_occupied(0, 19));
    }

    #[test]
    fn test_distant_overhang_stays_in_place() {
        // A lone block hanging over column 0 and a stack under the blast at column 7.
        let mut state = state_with_cells(&[(0, 5), (7, 19), (7, 18)]);
        let report = AreaClear::new(1).apply(&mut state, Pivot::new(19, 7));
        assert_eq!(report.blocks_cleared, 2);
        assert!(state.board().is_occupied(0, 5));
        assert_eq!(state.board().occupied_count(), 1);
    }

    #[test]
    fn test_blocks_above_fall_into_hole() {
        let mut state = state_with_cells(&[(5, 10), (5, 4)]);
        let report = AreaClear::new(1).apply(&mut state, Pivot::new(10, 5));
        assert_eq!(report.blocks_cleared, 1);
        assert!(state.board().is_occupied(5, 19));
        assert_eq!(state.board().occupied_count(), 1);
    }
}
