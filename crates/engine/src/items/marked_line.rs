//! Marked-line clear
//!
//! A `LineClear` piece leaves a marker on one of its cells when it locks. Every row that
//! carries such a marker, on an occupied cell or not, is removed in one compaction
//! whether or not the row is full.

use blockfall_core::types::ItemKind;
use blockfall_core::{EffectReport, GameState, Pivot};

use super::ItemEffect;

pub const POINTS_PER_MARKED_ROW: i64 = 100;
pub const POINTS_PER_MARKED_BLOCK: i64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkedLineClear;

impl MarkedLineClear {
    /// Rows carrying a line clear marker, top to bottom
    pub fn marked_rows(state: &GameState) -> Vec<usize> {
        let board = state.board();
        (0..board.height())
            .filter(|&y| board.is_row_marked(y, ItemKind::LineClear))
            .map(|y| y as usize)
            .collect()
    }
}

impl ItemEffect for MarkedLineClear {
    fn kind(&self) -> ItemKind {
        ItemKind::LineClear
    }

    /// Rows are found by scanning the board; the pivot is not consulted.
    fn apply(&self, state: &mut GameState, _pivot: Pivot) -> EffectReport {
        let rows = Self::marked_rows(state);
        if rows.is_empty() {
            return EffectReport::failed(self.kind(), "no marked rows");
        }

        let board = state.board();
        let cleared_cells: Vec<(i32, i32)> = rows
            .iter()
            .flat_map(|&y| {
                let y = y as i32;
                (0..board.width())
                    .filter(move |&x| board.is_occupied(x, y))
                    .map(move |x| (x, y))
            })
            .collect();

        let removed = state.board_mut().remove_rows(&rows);
        let blocks = cleared_cells.len();
        let bonus = removed.len() as i64 * POINTS_PER_MARKED_ROW * i64::from(state.level())
            + blocks as i64 * POINTS_PER_MARKED_BLOCK;

        EffectReport {
            blocks_cleared: blocks,
            bonus_score: bonus,
            lines_cleared: removed.len(),
            cleared_cells,
            ..EffectReport::succeeded(
                self.kind(),
                format!("cleared {} marked rows", removed.len()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::tests::state_with_cells;
    use blockfall_core::types::Color;
    use blockfall_core::Cell;

    #[test]
    fn test_partial_marked_row_is_removed() {
        let mut state = state_with_cells(&[(0, 19), (1, 19), (2, 19), (4, 18)]);
        state
            .board_mut()
            .set(1, 19, Cell::filled(Color::Cyan).with_marker(ItemKind::LineClear));

        let report = MarkedLineClear.apply(&mut state, Pivot::new(0, 0));
        assert!(report.success);
        assert_eq!(report.lines_cleared, 1);
        assert_eq!(report.blocks_cleared, 3);
        // level 1: 1 * 100 * 1 + 3 * 10
        assert_eq!(report.bonus_score, 130);
        // Row 18 slid down into 19.
        assert!(state.board().is_occupied(4, 19));
        assert_eq!(state.board().occupied_count(), 1);
    }

    #[test]
    fn test_marker_on_empty_cell_still_counts() {
        let mut state = state_with_cells(&[(3, 10)]);
        state
            .board_mut()
            .set(7, 12, Cell::EMPTY.with_marker(ItemKind::LineClear));

        let report = MarkedLineClear.apply(&mut state, Pivot::new(0, 0));
        assert!(report.success);
        assert_eq!(report.lines_cleared, 1);
        assert_eq!(report.blocks_cleared, 0);
        assert_eq!(report.bonus_score, 100);
        assert!(state.board().is_occupied(3, 11));
    }

    #[test]
    fn test_two_marked_rows_in_one_compaction() {
        let mut state = state_with_cells(&[(0, 19), (0, 17), (0, 16)]);
        state
            .board_mut()
            .set(5, 19, Cell::EMPTY.with_marker(ItemKind::LineClear));
        state
            .board_mut()
            .set(5, 17, Cell::EMPTY.with_marker(ItemKind::LineClear));

        assert_eq!(MarkedLineClear::marked_rows(&state), vec![17, 19]);
        let report = MarkedLineClear.apply(&mut state, Pivot::new(0, 0));
        assert_eq!(report.lines_cleared, 2);
        assert_eq!(report.blocks_cleared, 2);
        // Row 16 drops past both removed rows.
        assert!(state.board().is_occupied(0, 18));
        assert_eq!(state.board().occupied_count(), 1);
    }

    #[test]
    fn test_nothing_marked() {
        let mut state = state_with_cells(&[(0, 19)]);
        let report = MarkedLineClear.apply(&mut state, Pivot::new(0, 0));
        assert!(!report.success);
        assert_eq!(state.board().occupied_count(), 1);
    }
}
