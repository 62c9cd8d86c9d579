//! Held controls and their repeat timers.
//!
//! [`HeldControls`] is an ordered set: the most recently pressed control that
//! is still held is the only one the session acts on. [`RepeatTimers`] is a
//! small registry keyed by [`Control`] that rate-limits each held control.

use arrayvec::ArrayVec;

use crate::types::Control;

/// Number of held (non-trigger) controls
const HELD_CONTROLS: usize = 4;

fn slot(control: Control) -> Option<usize> {
    match control {
        Control::Left => Some(0),
        Control::Right => Some(1),
        Control::Down => Some(2),
        Control::Rotate => Some(3),
        Control::HardDrop => None,
    }
}

/// Controls currently held down, oldest press first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldControls {
    order: ArrayVec<Control, HELD_CONTROLS>,
}

impl HeldControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns false if the control was already held or is a trigger.
    pub fn press(&mut self, control: Control) -> bool {
        if slot(control).is_none() || self.order.contains(&control) {
            return false;
        }
        self.order.push(control);
        true
    }

    /// Record a release. Returns false if the control was not held.
    pub fn release(&mut self, control: Control) -> bool {
        match self.order.iter().position(|&c| c == control) {
            Some(i) => {
                self.order.remove(i);
                true
            }
            None => false,
        }
    }

    /// The most recently pressed control still held
    pub fn latest(&self) -> Option<Control> {
        self.order.last().copied()
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.order.contains(&control)
    }

    pub fn as_slice(&self) -> &[Control] {
        &self.order
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}

/// Per-control repeat accumulators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatTimers {
    elapsed_ms: [u32; HELD_CONTROLS],
}

impl RepeatTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `dt_ms` for `control`; fires (and resets to zero) once the
    /// accumulated time reaches the control's repeat delay.
    ///
    /// Triggers have no delay and always fire.
    pub fn tick(&mut self, control: Control, dt_ms: u32) -> bool {
        let (Some(i), Some(delay)) = (slot(control), control.repeat_delay_ms()) else {
            return true;
        };

        self.elapsed_ms[i] = self.elapsed_ms[i].saturating_add(dt_ms);
        if self.elapsed_ms[i] >= delay {
            self.elapsed_ms[i] = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self, control: Control) {
        if let Some(i) = slot(control) {
            self.elapsed_ms[i] = 0;
        }
    }

    pub fn elapsed_ms(&self, control: Control) -> u32 {
        slot(control).map(|i| self.elapsed_ms[i]).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MOVE_REPEAT_MS, ROTATE_REPEAT_MS};

    #[test]
    fn test_last_pressed_wins() {
        let mut held = HeldControls::new();
        assert!(held.press(Control::Left));
        assert!(held.press(Control::Right));
        assert_eq!(held.latest(), Some(Control::Right));

        // Releasing the newest falls back to the older one still held.
        assert!(held.release(Control::Right));
        assert_eq!(held.latest(), Some(Control::Left));

        assert!(held.release(Control::Left));
        assert_eq!(held.latest(), None);
    }

    #[test]
    fn test_press_is_idempotent() {
        let mut held = HeldControls::new();
        assert!(held.press(Control::Left));
        assert!(held.press(Control::Down));
        assert!(!held.press(Control::Left));
        // Re-pressing does not move Left to the front.
        assert_eq!(held.latest(), Some(Control::Down));
        assert_eq!(held.as_slice().len(), 2);
    }

    #[test]
    fn test_hard_drop_is_never_held() {
        let mut held = HeldControls::new();
        assert!(!held.press(Control::HardDrop));
        assert!(!held.is_held(Control::HardDrop));
        assert!(!held.release(Control::HardDrop));
    }

    #[test]
    fn test_timer_fires_at_delay_and_resets() {
        let mut timers = RepeatTimers::new();
        assert!(!timers.tick(Control::Left, MOVE_REPEAT_MS - 1));
        assert!(timers.tick(Control::Left, 1));
        assert_eq!(timers.elapsed_ms(Control::Left), 0);

        assert!(!timers.tick(Control::Rotate, MOVE_REPEAT_MS));
        assert!(timers.tick(Control::Rotate, ROTATE_REPEAT_MS - MOVE_REPEAT_MS));
    }

    #[test]
    fn test_timers_are_independent() {
        let mut timers = RepeatTimers::new();
        timers.tick(Control::Left, 50);
        assert_eq!(timers.elapsed_ms(Control::Left), 50);
        assert_eq!(timers.elapsed_ms(Control::Right), 0);
    }

    #[test]
    fn test_reset_discards_partial_progress() {
        let mut timers = RepeatTimers::new();
        assert!(!timers.tick(Control::Down, MOVE_REPEAT_MS - 1));
        timers.reset(Control::Down);
        assert_eq!(timers.elapsed_ms(Control::Down), 0);
        assert!(!timers.tick(Control::Down, MOVE_REPEAT_MS - 1));
        assert!(timers.tick(Control::Down, 1));
    }
}
