use crate::piece::Piece;
use crate::types::{Cell, Color, Lifecycle, Position, Shape, FIELD_COLS, FIELD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub shape: Shape,
    pub cells: [Position; 4],
    pub color: Color,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: value.shape(),
            cells: *value.cells(),
            color: value.color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub grid: [[Cell; FIELD_COLS as usize]; FIELD_ROWS as usize],
    pub current: PieceSnapshot,
    /// Where the current piece would come to rest
    pub ghost: [Position; 4],
    pub next: Shape,
    pub score: u32,
    pub lines: u32,
    pub pieces_landed: u32,
    pub lifecycle: Lifecycle,
    pub hard_dropping: bool,
}

impl SessionSnapshot {
    pub fn game_over(&self) -> bool {
        self.lifecycle == Lifecycle::GameOver
    }

    /// Cell at (x, y), `None` for empty or out-of-field
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || x >= FIELD_COLS || y < 0 || y >= FIELD_ROWS {
            return None;
        }
        self.grid[y as usize][x as usize]
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        let current = PieceSnapshot::from(Piece::spawn(Shape::T));
        Self {
            grid: [[None; FIELD_COLS as usize]; FIELD_ROWS as usize],
            current,
            ghost: current.cells,
            next: Shape::T,
            score: 0,
            lines: 0,
            pieces_landed: 0,
            lifecycle: Lifecycle::Playing,
            hard_dropping: false,
        }
    }
}
