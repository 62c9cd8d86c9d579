//! Replay module - frame-by-frame input recording
//!
//! A replay is the seed plus, for every tick, the presses/releases fed before
//! it and the tick's `dt`. Because [`Session`] is deterministic, playing a
//! replay back rebuilds the exact same session.
//!
//! Replays serialize to JSON:
//!
//! ```
//! use blockfall_core::replay::{InputEvent, Replay, ReplayFrame};
//! use blockfall_core::types::Control;
//!
//! let replay = Replay {
//!     seed: 3,
//!     frames: vec![ReplayFrame {
//!         dt_ms: 16,
//!         inputs: vec![InputEvent::Press(Control::Left)],
//!     }],
//! };
//! let json = replay.to_json().unwrap();
//! assert_eq!(Replay::from_json(&json).unwrap(), replay);
//! ```

use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::types::Control;

/// A single press or release fed to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "control", rename_all = "camelCase")]
pub enum InputEvent {
    Press(Control),
    Release(Control),
}

impl InputEvent {
    pub fn apply(&self, session: &mut Session) {
        match *self {
            InputEvent::Press(control) => session.press(control),
            InputEvent::Release(control) => session.release(control),
        }
    }
}

/// Inputs applied before one tick, and that tick's elapsed time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayFrame {
    pub dt_ms: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<InputEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub seed: u32,
    pub frames: Vec<ReplayFrame>,
}

impl Replay {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            frames: Vec::new(),
        }
    }

    /// Apply one frame to a session
    pub fn step(frame: &ReplayFrame, session: &mut Session) -> bool {
        for input in &frame.inputs {
            input.apply(session);
        }
        session.tick(frame.dt_ms)
    }

    /// Rebuild the session this replay recorded
    pub fn play(&self) -> Session {
        let mut session = Session::new(self.seed);
        for frame in &self.frames {
            Self::step(frame, &mut session);
        }
        session
    }

    /// Total recorded time
    pub fn duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.dt_ms as u64).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Drives a session while recording everything fed to it
#[derive(Debug, Clone)]
pub struct Recorder {
    session: Session,
    replay: Replay,
    pending: Vec<InputEvent>,
}

impl Recorder {
    pub fn new(seed: u32) -> Self {
        Self {
            session: Session::new(seed),
            replay: Replay::new(seed),
            pending: Vec::new(),
        }
    }

    pub fn press(&mut self, control: Control) {
        self.feed(InputEvent::Press(control));
    }

    pub fn release(&mut self, control: Control) {
        self.feed(InputEvent::Release(control));
    }

    fn feed(&mut self, input: InputEvent) {
        input.apply(&mut self.session);
        self.pending.push(input);
    }

    pub fn tick(&mut self, dt_ms: u32) -> bool {
        self.replay.frames.push(ReplayFrame {
            dt_ms,
            inputs: std::mem::take(&mut self.pending),
        });
        self.session.tick(dt_ms)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    /// Stop recording. Inputs fed after the last tick are kept as a zero-length frame.
    pub fn finish(mut self) -> Replay {
        if !self.pending.is_empty() {
            self.tick(0);
        }
        self.replay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_event_json_shape() {
        let json = serde_json::to_string(&InputEvent::Press(Control::HardDrop)).unwrap();
        assert_eq!(json, r#"{"kind":"press","control":"hardDrop"}"#);
    }

    #[test]
    fn test_empty_inputs_are_omitted() {
        let frame = ReplayFrame {
            dt_ms: 16,
            inputs: Vec::new(),
        };
        assert_eq!(serde_json::to_string(&frame).unwrap(), r#"{"dtMs":16}"#);
        let back: ReplayFrame = serde_json::from_str(r#"{"dtMs":16}"#).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_finish_flushes_pending_inputs() {
        let mut recorder = Recorder::new(5);
        recorder.tick(16);
        recorder.press(Control::Left);
        let replay = recorder.finish();
        assert_eq!(replay.frames.len(), 2);
        assert_eq!(replay.frames[1].dt_ms, 0);
        assert_eq!(replay.frames[1].inputs, vec![InputEvent::Press(Control::Left)]);
    }
}
