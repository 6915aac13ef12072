//! Board module - manages the playfield grid
//!
//! The board is a `width x height` grid stored as a flat row-major vector for cache
//! locality. Each cell is empty or occupied with a color, and may carry an item marker.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom, row 0 is
//! the top row. The size is fixed when the board is created.

use serde::{Deserialize, Serialize};

use crate::types::{Color, ItemKind, BOARD_HEIGHT, BOARD_WIDTH};

/// A single board cell.
///
/// Occupancy is the presence of a color, so the two can never disagree. A marker may sit
/// on an empty cell; marked-line clearing still honors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    color: Option<Color>,
    marker: Option<ItemKind>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        color: None,
        marker: None,
    };

    /// An occupied cell of the given color
    pub fn filled(color: Color) -> Self {
        Self {
            color: Some(color),
            marker: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.color.is_some()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn marker(&self) -> Option<ItemKind> {
        self.marker
    }

    /// Same cell with an item marker attached
    pub fn with_marker(self, marker: ItemKind) -> Self {
        Self {
            marker: Some(marker),
            ..self
        }
    }
}

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Self {
        let (width, height) = (i32::from(width), i32::from(height));
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; (width * height) as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Empty the cell at (x, y), returning whether it held a block
    pub fn clear_cell(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                let was_occupied = self.cells[idx].is_occupied();
                self.cells[idx] = Cell::EMPTY;
                was_occupied
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(cell) if !cell.is_occupied())
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(cell) if cell.is_occupied())
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width || y < 0 || y >= self.height
    }

    /// Occupied or outside the board; used for spin corner checks
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.is_out_of_bounds(x, y) || self.is_occupied(x, y)
    }

    /// Whether a falling piece may have a mino at (x, y).
    ///
    /// Rows above the top edge are open space; walls and the floor are not.
    pub fn accepts_mino(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width || y >= self.height {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// Cells of row `y` (empty slice when out of range)
    pub fn row(&self, y: i32) -> &[Cell] {
        if y < 0 || y >= self.height {
            return &[];
        }
        let start = (y * self.width) as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        let row = self.row(y);
        !row.is_empty() && row.iter().all(Cell::is_occupied)
    }

    /// Whether any cell of row `y` carries `marker`, occupied or not
    pub fn is_row_marked(&self, y: i32, marker: ItemKind) -> bool {
        self.row(y).iter().any(|cell| cell.marker() == Some(marker))
    }

    pub fn row_occupied_count(&self, y: i32) -> usize {
        self.row(y).iter().filter(|cell| cell.is_occupied()).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// True when no cell is occupied (perfect clear)
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(Cell::is_occupied)
    }

    /// Clear all full rows and return the removed row indices, bottom to top
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        self.compact_rows(|board, y| board.is_row_full(y as i32))
    }

    /// Remove the given rows in a single compaction, returning the indices removed
    /// (bottom to top). Out-of-range indices are ignored.
    pub fn remove_rows(&mut self, rows: &[usize]) -> Vec<usize> {
        self.compact_rows(|_, y| rows.contains(&y))
    }

    /// Two-pointer bottom-up compaction: rows matching `remove` are dropped, survivors
    /// slide down keeping their order, vacated top rows are emptied.
    fn compact_rows(&mut self, remove: impl Fn(&Board, usize) -> bool) -> Vec<usize> {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut removed = Vec::new();
        let mut write_y = height;

        for read_y in (0..height).rev() {
            if remove(&*self, read_y) {
                removed.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = Cell::EMPTY;
        }

        removed
    }

    /// Let every occupied cell fall straight down within its column
    pub fn apply_column_gravity(&mut self) {
        for x in 0..self.width {
            self.compact_column(x);
        }
    }

    /// Close the gaps in one column; out-of-range columns are ignored
    pub fn compact_column(&mut self, x: i32) {
        if x < 0 || x >= self.width {
            return;
        }
        let mut write_y = self.height - 1;
        for read_y in (0..self.height).rev() {
            let Some(cell) = self.get(x, read_y) else {
                continue;
            };
            if !cell.is_occupied() {
                continue;
            }
            if write_y != read_y {
                self.set(x, write_y, cell);
                self.set(x, read_y, Cell::EMPTY);
            }
            write_y -= 1;
        }
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}
