//! Heavy piece: digs through the stack
//!
//! While falling, each step first removes the blocks directly beneath its minos. At lock
//! it clears every block below it in the columns it covers and drops to the floor.
//! Both earn [`POINTS_PER_HEAVY_BLOCK`] per removed block.

use blockfall_core::types::ItemKind;
use blockfall_core::{ActivePiece, Board, EffectReport};

pub const POINTS_PER_HEAVY_BLOCK: i64 = 10;

/// Remove the occupied cells one row below each mino, returning them
pub fn dig_beneath(board: &mut Board, piece: &ActivePiece) -> Vec<(i32, i32)> {
    let mut removed = Vec::new();
    for (x, y) in piece.cells() {
        let below = y + 1;
        if below >= 0 && board.clear_cell(x, below) {
            removed.push((x, below));
        }
    }
    removed
}

/// Clear the vertical path under the piece and drop it as far as it goes
pub fn settle(board: &mut Board, piece: ActivePiece) -> (ActivePiece, EffectReport) {
    let minos = piece.minos();
    let mut columns: Vec<i32> = minos.iter().map(|&(x, _)| x).collect();
    columns.sort_unstable();
    columns.dedup();

    let mut cleared_cells = Vec::new();
    for x in columns {
        let lowest = minos
            .iter()
            .filter(|&&(px, _)| px == x)
            .map(|&(_, py)| py)
            .max()
            .unwrap_or(piece.y);
        for y in (lowest + 1).max(0)..board.height() {
            if board.clear_cell(x, y) {
                cleared_cells.push((x, y));
            }
        }
    }

    let settled = piece.moved(0, piece.drop_distance(board) as i32);
    let blocks = cleared_cells.len();
    let report = EffectReport {
        blocks_cleared: blocks,
        bonus_score: blocks as i64 * POINTS_PER_HEAVY_BLOCK,
        cleared_cells,
        ..EffectReport::succeeded(
            ItemKind::HeavyDrop,
            format!("heavy piece crushed {blocks} blocks"),
        )
    };
    (settled, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::{Color, PieceKind};
    use blockfall_core::Cell;

    fn heavy_at(x: i32, y: i32) -> ActivePiece {
        ActivePiece {
            x,
            y,
            ..ActivePiece::spawn(PieceKind::Heavy, Some(ItemKind::HeavyDrop), 10)
        }
    }

    #[test]
    fn test_dig_removes_only_cells_directly_below() {
        let mut board = Board::default();
        // Lower row of the heavy piece at y = 10 spans x = 3..=6.
        for x in 0..10 {
            board.set(x, 11, Cell::filled(Color::Gray));
            board.set(x, 12, Cell::filled(Color::Gray));
        }

        let removed = dig_beneath(&mut board, &heavy_at(4, 10));
        assert_eq!(removed.len(), 4);
        assert!(!board.is_occupied(3, 11));
        assert!(!board.is_occupied(6, 11));
        assert!(board.is_occupied(2, 11));
        assert!(board.is_occupied(4, 12));
    }

    #[test]
    fn test_settle_clears_columns_and_reaches_floor() {
        let mut board = Board::default();
        for y in 12..20 {
            for x in 0..10 {
                board.set(x, y, Cell::filled(Color::Gray));
            }
        }

        let (settled, report) = settle(&mut board, heavy_at(4, 11));
        // Four columns, eight rows each.
        assert_eq!(report.blocks_cleared, 32);
        assert_eq!(report.bonus_score, 320);
        assert_eq!(settled.y, 19);
        assert!(board.is_occupied(2, 19));
        assert!(board.is_occupied(7, 19));
        assert!(!board.is_occupied(5, 15));
    }

    #[test]
    fn test_settle_on_empty_board_just_drops() {
        let mut board = Board::default();
        let (settled, report) = settle(&mut board, heavy_at(4, 0));
        assert!(report.success);
        assert_eq!(report.blocks_cleared, 0);
        assert_eq!(settled.y, 19);
    }
}
