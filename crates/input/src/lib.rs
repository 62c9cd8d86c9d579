//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Control`] and synthesizes
//! key releases for terminals that do not emit them. Repeat timing is not done
//! here: the session rate-limits held controls itself.

pub mod map;
pub mod release;

pub use blockfall_types as types;

pub use map::{control_for_key, handle_key_event, should_quit, should_restart};
pub use release::ReleaseTracker;
