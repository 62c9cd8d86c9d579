//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game and nothing else:
//! no terminal, no input devices, no clocks. Time only moves when the caller
//! passes an elapsed `dt` to [`Session::tick`].
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven shapes as pivot-relative offsets
//! - [`grid`]: 10x20 field with collision queries and row compaction
//! - [`piece`]: the falling piece, translation, rotation and wall kicks
//! - [`line_clear`]: compaction plus linear scoring
//! - [`controls`]: held-control ordering and repeat timers
//! - [`session`]: gravity, commands, landing and game over
//! - [`rng`]: seeded uniform shape selection
//! - [`snapshot`]: read-only view for renderers
//! - [`replay`]: recording and deterministic playback
//!
//! # Example
//!
//! ```
//! use blockfall_core::Session;
//! use blockfall_core::types::Control;
//!
//! let mut session = Session::new(12345);
//!
//! session.press(Control::Left);
//! session.tick(16);
//! session.release(Control::Left);
//!
//! session.press(Control::HardDrop);
//! while !session.tick(16) {}
//!
//! assert_eq!(session.pieces_landed(), 1);
//! assert!(!session.game_over());
//! ```

pub mod controls;
pub mod grid;
pub mod line_clear;
pub mod piece;
pub mod replay;
pub mod rng;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use grid::{ClearReport, Grid};
pub use line_clear::ScoreDelta;
pub use piece::Piece;
pub use replay::{InputEvent, Recorder, Replay, ReplayFrame};
pub use rng::{ShapePicker, SimpleRng};
pub use session::Session;
pub use snapshot::{PieceSnapshot, SessionSnapshot};
