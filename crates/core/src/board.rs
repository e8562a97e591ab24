//! Board module - manages the game grid
//!
//! The board is a 20x10 grid where each cell is either empty or holds the color
//! of a locked piece. Uses a flat array for cache locality and zero allocation.
//! Coordinates are `(row, col)`: row 0..19 top to bottom, col 0..9 left to right.
//!
//! Rows above the board (negative) are never stored. Pieces may occupy them
//! while spawning or rotating; they never collide there and are dropped on merge.

use crate::pieces::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at (row, col); `None` if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Would `piece`, shifted by (`d_row`, `d_col`), collide?
    ///
    /// A shifted cell collides when its column is outside `[0, WIDTH)`, its row
    /// is at or below the floor, or it lands on an occupied cell. Cells with a
    /// negative row are exempt.
    pub fn collides(&self, piece: &Piece, d_row: i8, d_col: i8) -> bool {
        piece.cells().any(|(row, col)| {
            let row = row + d_row;
            let col = col + d_col;
            if col < 0 || col >= BOARD_WIDTH as i8 || row >= BOARD_HEIGHT as i8 {
                return true;
            }
            row >= 0 && self.is_occupied(row, col)
        })
    }

    /// Write the piece's color into every in-bounds cell it covers.
    ///
    /// Cells above row 0 are dropped; that is how a partial top-out loses blocks.
    pub fn merge(&mut self, piece: &Piece) {
        for (row, col) in piece.cells() {
            self.set(row, col, Some(piece.color));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row, shift the rows above it down and refill the top
    /// with empty rows. Returns the number of rows removed.
    ///
    /// Two-pointer pass from the bottom: surviving rows are copied down to the
    /// write cursor in order, so several non-contiguous full rows are handled in
    /// one sweep and the row count never changes.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_row = HEIGHT;

        for read_row in (0..HEIGHT).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * WIDTH;
                    self.cells.copy_within(src..src + WIDTH, write_row * WIDTH);
                }
            }
        }

        for cell in &mut self.cells[..write_row * WIDTH] {
            *cell = None;
        }

        cleared
    }

    /// Row-major view of the board
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Copy the board into a 2D grid
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Build a board from rows given top to bottom
    pub fn from_rows(rows: &[[Cell; WIDTH]; HEIGHT]) -> Self {
        let mut board = Self::new();
        for (row, cells) in rows.iter().enumerate() {
            board.cells[row * WIDTH..(row + 1) * WIDTH].copy_from_slice(cells);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
