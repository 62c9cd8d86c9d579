//! Piece module - the active falling shape
//!
//! A piece stores its four absolute cell positions rather than an origin and a
//! rotation state. Rotation is computed around the first cell, and a colliding
//! rotation is retried with horizontal kicks: right by 1..=4, then left by 1..=4.
//!
//! Landing is not a separate predicate: a piece becomes landed only when a
//! downward move is rejected.

use crate::grid::Grid;
use crate::shapes::{is_rotation_invariant, min_offset_y, offsets};
use crate::types::{Color, Direction, Position, Shape, MAX_KICK, SPAWN_COLUMN};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    cells: [Position; 4],
    landed: bool,
}

impl Piece {
    /// Create a piece at the spawn column with its highest cell on row 0
    pub fn spawn(shape: Shape) -> Self {
        let top = min_offset_y(shape);
        let shape_offsets = offsets(shape);
        let mut cells = [Position::default(); 4];
        for (cell, &(dx, dy)) in cells.iter_mut().zip(shape_offsets.iter()) {
            *cell = Position::new(SPAWN_COLUMN + dx, dy - top);
        }

        Self {
            shape,
            cells,
            landed: false,
        }
    }

    /// Build a piece from explicit cells (first cell is the pivot).
    pub fn from_cells(shape: Shape, cells: [Position; 4]) -> Self {
        Self {
            shape,
            cells,
            landed: false,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.shape.color()
    }

    pub fn cells(&self) -> &[Position; 4] {
        &self.cells
    }

    pub fn landed(&self) -> bool {
        self.landed
    }

    /// Lowest row any cell occupies
    pub fn bottom(&self) -> i8 {
        self.cells.iter().map(|p| p.y).max().unwrap_or(0)
    }

    /// Try to translate the piece one cell.
    ///
    /// A rejected `Down` marks the piece landed; rejected sideways moves leave
    /// it untouched.
    pub fn try_move(&mut self, direction: Direction, grid: &Grid) -> bool {
        let (dx, dy) = direction.delta();
        let candidate = self.cells.map(|p| p.offset(dx, dy));

        if grid.collides(&candidate) {
            if direction == Direction::Down {
                self.landed = true;
            }
            return false;
        }

        self.cells = candidate;
        true
    }

    /// Try to rotate the piece 90° clockwise around its first cell.
    ///
    /// The O shape never rotates. On collision the rotated cells are shifted
    /// right by 1..=4 and then left by 1..=4; the first free candidate wins.
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        if is_rotation_invariant(self.shape) {
            return false;
        }

        let rotated = rotate_cw(&self.cells);

        let kicks = (0..=MAX_KICK).chain((1..=MAX_KICK).map(|k| -k));
        for kick in kicks {
            let candidate = rotated.map(|p| p.offset(kick, 0));
            if !grid.collides(&candidate) {
                self.cells = candidate;
                return true;
            }
        }

        false
    }

    /// Cells the piece would occupy after falling as far as it can.
    ///
    /// Simulated on a copy; `self` is never mutated.
    pub fn landing_cells(&self, grid: &Grid) -> [Position; 4] {
        let mut probe = *self;
        while probe.try_move(Direction::Down, grid) {}
        probe.cells
    }
}

/// Rotate cells clockwise around `cells[0]`: `(x, y) -> (-(y - py) + px, (x - px) + py)`
fn rotate_cw(cells: &[Position; 4]) -> [Position; 4] {
    let pivot = cells[0];
    cells.map(|p| Position::new(-(p.y - pivot.y) + pivot.x, (p.x - pivot.x) + pivot.y))
}
