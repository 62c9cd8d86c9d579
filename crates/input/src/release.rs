//! Synthesized key releases for terminals that never report them.
//!
//! Without the keyboard enhancement protocol most terminals only send presses
//! (plus OS auto-repeat presses while a key stays down). The session expects
//! explicit releases, so a held control is released once no press for it has
//! been seen for `timeout_ms`.

use arrayvec::ArrayVec;

use crate::types::Control;

// Longer than the typical OS auto-repeat interval (~30-50ms) but short enough
// that a single tap does not keep repeating.
const DEFAULT_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tracked {
    control: Control,
    idle_ms: u32,
}

/// Tracks pressed controls and emits releases after a quiet period.
#[derive(Debug, Clone)]
pub struct ReleaseTracker {
    tracked: ArrayVec<Tracked, 4>,
    timeout_ms: u32,
    /// Set once a real release event is observed; disables synthesis.
    native_releases: bool,
}

impl ReleaseTracker {
    pub fn new() -> Self {
        Self::with_timeout_ms(DEFAULT_RELEASE_TIMEOUT_MS)
    }

    pub fn with_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            tracked: ArrayVec::new(),
            timeout_ms,
            native_releases: false,
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Record a press (or OS auto-repeat press). Triggers are not tracked.
    pub fn on_press(&mut self, control: Control) {
        if control.repeat_delay_ms().is_none() {
            return;
        }
        match self.tracked.iter_mut().find(|t| t.control == control) {
            Some(t) => t.idle_ms = 0,
            None => {
                let _ = self.tracked.try_push(Tracked {
                    control,
                    idle_ms: 0,
                });
            }
        }
    }

    /// Record a real release event from the terminal.
    pub fn on_release(&mut self, control: Control) {
        self.native_releases = true;
        self.tracked.retain(|t| t.control != control);
    }

    /// Advance idle time; returns controls whose release should be synthesized.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Control, 4> {
        let mut expired = ArrayVec::new();
        if self.native_releases {
            return expired;
        }

        for t in &mut self.tracked {
            t.idle_ms = t.idle_ms.saturating_add(elapsed_ms);
            if t.idle_ms > self.timeout_ms {
                expired.push(t.control);
            }
        }
        self.tracked.retain(|t| t.idle_ms <= self.timeout_ms);
        expired
    }

    pub fn reset(&mut self) {
        self.tracked.clear();
    }
}

impl Default for ReleaseTracker {
    fn default() -> Self {
        Self::new()
    }
}
