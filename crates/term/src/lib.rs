//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a plain framebuffer that is flushed to the
//! terminal with crossterm.
//!
//! - [`game_view`]: pure snapshot-to-framebuffer drawing
//! - [`effects`]: cosmetic line-clear sparks
//! - [`renderer`]: terminal setup and full/diff frame encoding

pub mod effects;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use effects::{Effects, Spark};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
