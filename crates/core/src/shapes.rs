//! Shape catalog - relative cell offsets of the seven pieces
//!
//! Each shape is four `(x, y)` offsets. The first offset is always `(0, 0)`:
//! it is the pivot the piece rotates around. Rotation is computed at runtime
//! (see [`crate::piece`]), so only the spawn orientation is stored here.

use crate::types::Shape;

/// Offset of a single cell relative to the pivot
pub type CellOffset = (i8, i8);

/// Four offsets, pivot first
pub type ShapeOffsets = [CellOffset; 4];

const T_OFFSETS: ShapeOffsets = [(0, 0), (-1, 0), (1, 0), (0, -1)];
const O_OFFSETS: ShapeOffsets = [(0, 0), (1, 0), (0, 1), (1, 1)];
const J_OFFSETS: ShapeOffsets = [(0, 0), (0, -1), (0, 1), (-1, 1)];
const L_OFFSETS: ShapeOffsets = [(0, 0), (0, -1), (0, 1), (1, 1)];
const I_OFFSETS: ShapeOffsets = [(0, 0), (0, -1), (0, 1), (0, 2)];
const S_OFFSETS: ShapeOffsets = [(0, 0), (1, 0), (0, 1), (-1, 1)];
const Z_OFFSETS: ShapeOffsets = [(0, 0), (-1, 0), (0, 1), (1, 1)];

/// Get the spawn offsets for a shape
pub fn offsets(shape: Shape) -> &'static ShapeOffsets {
    match shape {
        Shape::T => &T_OFFSETS,
        Shape::O => &O_OFFSETS,
        Shape::J => &J_OFFSETS,
        Shape::L => &L_OFFSETS,
        Shape::I => &I_OFFSETS,
        Shape::S => &S_OFFSETS,
        Shape::Z => &Z_OFFSETS,
    }
}

/// Smallest relative y of a shape (its topmost offset)
pub fn min_offset_y(shape: Shape) -> i8 {
    offsets(shape)
        .iter()
        .map(|&(_, dy)| dy)
        .min()
        .unwrap_or(0)
}

/// Whether rotating the shape can change its cells at all
pub fn is_rotation_invariant(shape: Shape) -> bool {
    shape == Shape::O
}
