//! Grid module - the playfield
//!
//! The grid is a 10x20 field where each cell is empty or holds the color of a
//! landed piece. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Collision queries treat everything outside the field asymmetrically:
//! above the field (`y < 0`) is open sky, the floor (`y >= rows`) and the side
//! walls are solid.

use arrayvec::ArrayVec;

use crate::types::{Cell, ClearedCell, Color, Position, FIELD_COLS, FIELD_ROWS, MAX_CLEARED_CELLS};

/// Total number of cells on the field
const GRID_SIZE: usize = (FIELD_COLS as usize) * (FIELD_ROWS as usize);

/// Result of [`Grid::clear_and_compact`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Number of full rows removed
    pub rows: u32,
    /// Every removed cell with its color and pre-clear coordinates
    pub cells: ArrayVec<ClearedCell, MAX_CLEARED_CELLS>,
}

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * COLS + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= FIELD_COLS || y < 0 || y >= FIELD_ROWS {
            return None;
        }
        Some((y as usize) * (FIELD_COLS as usize) + (x as usize))
    }

    pub fn cols(&self) -> i8 {
        FIELD_COLS
    }

    pub fn rows(&self) -> i8 {
        FIELD_ROWS
    }

    /// Get cell at (x, y), `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Collision query used by pieces.
    ///
    /// - `y < 0`: never occupied (pieces may hang above the field)
    /// - `y >= rows`: always occupied (floor)
    /// - `x` outside the field: always occupied (walls)
    /// - otherwise: whether the cell is filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if y < 0 {
            return x < 0 || x >= FIELD_COLS;
        }
        match Self::index(x, y) {
            Some(idx) => self.cells[idx].is_some(),
            None => true,
        }
    }

    /// Whether any of the positions collide
    pub fn collides(&self, cells: &[Position]) -> bool {
        cells.iter().any(|p| self.is_occupied(p.x, p.y))
    }

    /// Write a color into a cell.
    /// Returns false (and writes nothing) if out of bounds.
    pub fn set_cell(&mut self, x: i8, y: i8, color: Color) -> bool {
        self.set(x, y, Some(color))
    }

    /// Set or clear a cell. Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn row_is_full(&self, y: i8) -> bool {
        if y < 0 || y >= FIELD_ROWS {
            return false;
        }
        self.row(y as usize).iter().all(|cell| cell.is_some())
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * FIELD_COLS as usize;
        &self.cells[start..start + FIELD_COLS as usize]
    }

    /// Remove every full row and let the rows above fall.
    ///
    /// Single bottom-to-top pass: the write cursor only moves up past rows that
    /// are kept, so each row above a cleared row falls exactly one row per
    /// clear below it. Vacated rows at the top become empty.
    pub fn clear_and_compact(&mut self) -> ClearReport {
        let mut report = ClearReport::default();
        let width = FIELD_COLS as usize;
        let mut row_to_fill = FIELD_ROWS as usize;

        for read_y in (0..FIELD_ROWS as usize).rev() {
            if self.row_is_full(read_y as i8) {
                report.rows += 1;
                for (x, cell) in self.row(read_y).iter().enumerate() {
                    if let Some(color) = *cell {
                        let _ = report.cells.try_push(ClearedCell {
                            position: Position::new(x as i8, read_y as i8),
                            color,
                        });
                    }
                }
            } else {
                row_to_fill -= 1;
                if row_to_fill != read_y {
                    let src = read_y * width;
                    self.cells
                        .copy_within(src..src + width, row_to_fill * width);
                }
            }
        }

        for cell in &mut self.cells[..row_to_fill * width] {
            *cell = None;
        }

        report
    }

    /// Number of filled cells on the field
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array
    pub fn write_rows(&self, out: &mut [[Cell; FIELD_COLS as usize]; FIELD_ROWS as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::from_hue(0);
    const BLUE: Color = Color::from_hue(240);

    fn fill_row(grid: &mut Grid, y: i8, color: Color) {
        for x in 0..FIELD_COLS {
            grid.set_cell(x, y, color);
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn test_occupancy_outside_field() {
        let grid = Grid::new();

        // Sky is open, floor and walls are solid.
        assert!(!grid.is_occupied(4, -1));
        assert!(!grid.is_occupied(4, -5));
        assert!(grid.is_occupied(4, FIELD_ROWS));
        assert!(grid.is_occupied(-1, 5));
        assert!(grid.is_occupied(FIELD_COLS, 5));
        assert!(grid.is_occupied(-1, -1));
    }

    #[test]
    fn test_clear_keeps_colors_of_falling_rows() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 19, RED);
        grid.set_cell(2, 18, BLUE);

        let report = grid.clear_and_compact();

        assert_eq!(report.rows, 1);
        assert_eq!(report.cells.len(), FIELD_COLS as usize);
        assert!(report.cells.iter().all(|c| c.color == RED && c.position.y == 19));
        assert_eq!(grid.get(2, 19), Some(Some(BLUE)));
        assert_eq!(grid.get(2, 18), Some(None));
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 19, RED);
        grid.set_cell(0, 18, BLUE);
        fill_row(&mut grid, 17, RED);
        grid.set_cell(5, 16, BLUE);

        let report = grid.clear_and_compact();

        assert_eq!(report.rows, 2);
        // Row 18 falls one row (one clear below it), row 16 falls two.
        assert_eq!(grid.get(0, 19), Some(Some(BLUE)));
        assert_eq!(grid.get(5, 18), Some(Some(BLUE)));
        assert_eq!(grid.filled_count(), 2);
    }
}
