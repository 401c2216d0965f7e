//! Board module - manages the placed-tile grid
//!
//! The board is a 10x26 grid where each cell can be empty or tagged with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..25 (bottom to top).
//! Rows 20..25 are above the skyline and never drawn.

use arrayvec::ArrayVec;

use crate::geometry::MinoOffset;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 26 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x), row 0 at the bottom
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// True iff every tile is inside the board and on an empty cell
    pub fn is_valid_position(&self, tiles: &[MinoOffset]) -> bool {
        tiles.iter().all(|&(x, y)| self.is_valid(x, y))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Mark each tile's cell with `kind`
    ///
    /// The caller validates the position first; out-of-bounds tiles are skipped.
    pub fn place(&mut self, tiles: &[MinoOffset], kind: PieceKind) {
        for &(x, y) in tiles {
            self.set(x, y, Some(kind));
        }
    }

    /// Remove a single row, shifting every row above it down by one
    /// and appending an empty row at the top
    pub fn remove_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;
        let start = y * width;
        self.cells.copy_within(start + width.., start);

        let top = (BOARD_HEIGHT as usize - 1) * width;
        self.cells[top..].fill(None);
    }

    /// Clear the full rows among `candidate_rows` and return the rows removed
    ///
    /// Only rows touched by the last placement need checking. Rows are removed
    /// from the highest index down so lower indices stay valid while removing.
    pub fn clear_full_rows(&mut self, candidate_rows: &[i8]) -> ArrayVec<usize, 4> {
        let mut full: ArrayVec<usize, 4> = ArrayVec::new();
        for &y in candidate_rows {
            if y < 0 {
                continue;
            }
            let y = y as usize;
            if self.is_row_full(y) && !full.contains(&y) && !full.is_full() {
                full.push(y);
            }
        }

        // Sorted bottom to top.
        full.sort_unstable();
        for &y in full.iter().rev() {
            self.remove_row(y);
        }
        full
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the grid as cell codes (0 = empty), row 0 first
    pub fn write_u8_grid(
        &self,
        out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    ) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * width;
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[start + x].map(|k| k.code()).unwrap_or(0);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Create from a 2D vector for testing (row 0 = bottom)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(BOARD_WIDTH as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 25), Some(259));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 26), None);
    }

    #[test]
    fn test_board_from_cells_roundtrip() {
        let mut cells_2d = vec![vec![None; 10]; 26];
        cells_2d[5][3] = Some(PieceKind::O);
        cells_2d[22][7] = Some(PieceKind::L);

        let board = Board::from_cells(cells_2d.clone());
        assert_eq!(cells_2d, board.to_cells());
    }

    #[test]
    fn test_clear_only_checks_candidate_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 0, PieceKind::I);
        fill_row(&mut board, 3, PieceKind::I);

        let cleared = board.clear_full_rows(&[3, 4]);
        assert_eq!(cleared.as_slice(), &[3]);
        // Row 0 was full but not a candidate.
        assert!(board.is_row_full(0));
    }

    #[test]
    fn test_clear_non_adjacent_rows_shifts_correctly() {
        let mut board = Board::new();
        fill_row(&mut board, 1, PieceKind::T);
        fill_row(&mut board, 3, PieceKind::T);
        board.set(0, 2, Some(PieceKind::J));
        board.set(0, 4, Some(PieceKind::L));

        let cleared = board.clear_full_rows(&[3, 2, 1, 3]);
        assert_eq!(cleared.as_slice(), &[1, 3]);
        assert_eq!(board.get(0, 1), Some(Some(PieceKind::J)));
        assert_eq!(board.get(0, 2), Some(Some(PieceKind::L)));
        assert_eq!(board.get(0, 3), Some(None));
    }

    #[test]
    fn test_write_u8_grid_uses_piece_codes() {
        let mut board = Board::new();
        board.set(2, 0, Some(PieceKind::T));
        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[0][2], PieceKind::T.code());
        assert_eq!(grid[1][2], 0);
    }
}
