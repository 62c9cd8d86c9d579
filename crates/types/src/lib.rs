//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no I/O, making them usable in any
//! context (core logic, terminal rendering, replay files).
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn column**: 4 (`FIELD_COLS / 2 - 1`)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal runner |
//! | `DROP_INTERVAL_MS` | 400 | Gravity step interval |
//! | `MOVE_REPEAT_MS` | 80 | Repeat delay for left/right/soft-drop |
//! | `ROTATE_REPEAT_MS` | 100 | Repeat delay for rotation |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Control, Shape, FIELD_COLS, FIELD_ROWS};
//!
//! let shape = Shape::from_str("t").unwrap();
//! assert_eq!(shape, Shape::T);
//! assert_eq!(shape.index(), 0);
//!
//! assert_eq!(Control::from_str("hardDrop"), Some(Control::HardDrop));
//!
//! assert_eq!(FIELD_COLS, 10);
//! assert_eq!(FIELD_ROWS, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Field width in cells (10 columns)
pub const FIELD_COLS: i8 = 10;

/// Field height in cells (20 rows)
pub const FIELD_ROWS: i8 = 20;

/// Column new pieces are anchored at (field-center column)
pub const SPAWN_COLUMN: i8 = FIELD_COLS / 2 - 1;

/// Frame interval of the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval: one automatic downward step per 400ms
pub const DROP_INTERVAL_MS: u32 = 400;

/// Repeat delay for lateral moves and soft drop
pub const MOVE_REPEAT_MS: u32 = 80;

/// Repeat delay for rotation
pub const ROTATE_REPEAT_MS: u32 = 100;

/// Points per cleared row (linear, no multi-line bonus)
pub const LINE_SCORE_MULTIPLIER: u32 = 20;

/// Horizontal wall-kick distances tried after a colliding rotation
pub const MAX_KICK: i8 = 4;

/// Upper bound of cells a single clear can report (4 rows of a full field width)
pub const MAX_CLEARED_CELLS: usize = 4 * FIELD_COLS as usize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gameplay_constants_are_pinned() {
        assert_eq!(FIELD_COLS, 10);
        assert_eq!(FIELD_ROWS, 20);
        assert_eq!(SPAWN_COLUMN, 4);
        assert_eq!(DROP_INTERVAL_MS, 400);
        assert_eq!(MOVE_REPEAT_MS, 80);
        assert_eq!(ROTATE_REPEAT_MS, 100);
        assert_eq!(LINE_SCORE_MULTIPLIER, 20);
        assert_eq!(MAX_CLEARED_CELLS, 40);
    }

    #[test]
    fn shape_colors_are_distinct() {
        for a in Shape::ALL {
            for b in Shape::ALL {
                if a != b {
                    assert_ne!(a.color(), b.color());
                }
            }
        }
    }

    #[test]
    fn shape_index_roundtrip() {
        for (i, shape) in Shape::ALL.iter().enumerate() {
            assert_eq!(shape.index(), i);
            assert_eq!(Shape::from_index(i), Some(*shape));
        }
        assert_eq!(Shape::from_index(7), None);
    }
}

/// The seven piece shapes, in catalog order.
///
/// The order matters: a shape's color is derived from its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    T,
    O,
    J,
    L,
    I,
    S,
    Z,
}

impl Shape {
    /// All shapes in catalog order
    pub const ALL: [Shape; 7] = [
        Shape::T,
        Shape::O,
        Shape::J,
        Shape::L,
        Shape::I,
        Shape::S,
        Shape::Z,
    ];

    /// Number of shapes in the catalog
    pub const COUNT: usize = 7;

    /// Position of this shape in [`Shape::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Shape::T => 0,
            Shape::O => 1,
            Shape::J => 2,
            Shape::L => 3,
            Shape::I => 4,
            Shape::S => 5,
            Shape::Z => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Color assigned to this shape.
    ///
    /// Hues are spread evenly around the color wheel by catalog index.
    ///
    /// ```
    /// use blockfall_types::Shape;
    ///
    /// assert_eq!(Shape::T.color().hue, 0);
    /// assert_eq!(Shape::O.color().hue, 51);
    /// ```
    pub fn color(&self) -> Color {
        Color::from_hue((self.index() * 360 / Self::COUNT) as u16)
    }

    /// Parse shape from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(Shape::T),
            "o" => Some(Shape::O),
            "j" => Some(Shape::J),
            "l" => Some(Shape::L),
            "i" => Some(Shape::I),
            "s" => Some(Shape::S),
            "z" => Some(Shape::Z),
            _ => None,
        }
    }

    /// Single uppercase letter, used by the next-piece preview
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::T => "T",
            Shape::O => "O",
            Shape::J => "J",
            Shape::L => "L",
            Shape::I => "I",
            Shape::S => "S",
            Shape::Z => "Z",
        }
    }
}

/// A block color as HSL with fixed saturation and lightness.
///
/// Only the hue varies between shapes; renderers convert to RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Hue in degrees, 0..360
    pub hue: u16,
}

/// Saturation shared by every block color (percent)
pub const COLOR_SATURATION: u8 = 70;

/// Lightness shared by every block color (percent)
pub const COLOR_LIGHTNESS: u8 = 55;

impl Color {
    pub const fn from_hue(hue: u16) -> Self {
        Self { hue: hue % 360 }
    }

    /// Convert to 8-bit RGB.
    ///
    /// ```
    /// use blockfall_types::Color;
    ///
    /// let (r, g, b) = Color::from_hue(0).to_rgb();
    /// assert!(r > g && r > b);
    /// ```
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let s = COLOR_SATURATION as f32 / 100.0;
        let l = COLOR_LIGHTNESS as f32 / 100.0;
        let h = self.hue as f32 / 60.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (to_u8(r), to_u8(g), to_u8(b))
    }
}

/// A cell on the field
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a landed piece of that color
pub type Cell = Option<Color>;

/// A grid coordinate. `y` grows downward; negative `y` is above the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Translation directions a piece can attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector `(dx, dy)` of this direction
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Player controls fed into the session.
///
/// `Left`, `Right`, `Down` and `Rotate` are held (pressed until released).
/// `HardDrop` is a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Control {
    Left,
    Right,
    Down,
    Rotate,
    HardDrop,
}

impl Control {
    /// Parse control from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Control::Left),
            "right" => Some(Control::Right),
            "down" => Some(Control::Down),
            "rotate" => Some(Control::Rotate),
            "harddrop" => Some(Control::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Left => "left",
            Control::Right => "right",
            Control::Down => "down",
            Control::Rotate => "rotate",
            Control::HardDrop => "hardDrop",
        }
    }

    /// Repeat delay for held controls, `None` for triggers
    pub fn repeat_delay_ms(&self) -> Option<u32> {
        match self {
            Control::Left | Control::Right | Control::Down => Some(MOVE_REPEAT_MS),
            Control::Rotate => Some(ROTATE_REPEAT_MS),
            Control::HardDrop => None,
        }
    }
}

/// Session lifecycle. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    #[default]
    Playing,
    GameOver,
}

/// A cell removed by a line clear, with its color and prior coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedCell {
    pub position: Position,
    pub color: Color,
}

/// Core-side event emitted after a piece lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingEvent {
    pub shape: Shape,
    pub lines_cleared: u32,
    pub points: u32,
    pub game_over: bool,
}
