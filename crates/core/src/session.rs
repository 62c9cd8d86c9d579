//! Session module - the game orchestrator
//!
//! Owns the grid, the current and next piece, the score and the lifecycle.
//! Everything advances inside [`Session::tick`] in a fixed order:
//!
//! 1. hard-drop sub-state (when active it replaces steps 2 and 3)
//! 2. the most recently pressed held control, rate-limited by its repeat timer
//! 3. gravity
//! 4. the landing sequence, if the current piece landed during this tick
//!
//! Replaying the same seed, presses/releases and `dt` sequence reproduces the
//! same state.

use std::mem;

use arrayvec::ArrayVec;

use crate::controls::{HeldControls, RepeatTimers};
use crate::grid::Grid;
use crate::line_clear;
use crate::piece::Piece;
use crate::rng::ShapePicker;
use crate::snapshot::{PieceSnapshot, SessionSnapshot};
use crate::types::*;

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    current: Piece,
    next: Piece,
    picker: ShapePicker,
    score: u32,
    lines: u32,
    pieces_landed: u32,
    lifecycle: Lifecycle,
    drop_timer_ms: u32,
    held: HeldControls,
    timers: RepeatTimers,
    hard_drop_pending: bool,
    hard_dropping: bool,
    /// Last landing event (consumed by observers).
    last_event: Option<LandingEvent>,
    /// Cells removed by the last clear (consumed by the effects layer).
    cleared: ArrayVec<ClearedCell, MAX_CLEARED_CELLS>,
}

impl Session {
    /// Create a new session on an empty grid with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut picker = ShapePicker::new(seed);
        let current = Piece::spawn(picker.draw());
        Self::assemble(Grid::new(), current, picker)
    }

    /// Create a session from a prepared grid and current piece.
    ///
    /// The next piece is still drawn from `seed`.
    pub fn with_state(seed: u32, grid: Grid, current: Piece) -> Self {
        Self::assemble(grid, current, ShapePicker::new(seed))
    }

    fn assemble(grid: Grid, current: Piece, mut picker: ShapePicker) -> Self {
        let next = Piece::spawn(picker.draw());
        Self {
            grid,
            current,
            next,
            picker,
            score: 0,
            lines: 0,
            pieces_landed: 0,
            lifecycle: Lifecycle::Playing,
            drop_timer_ms: 0,
            held: HeldControls::new(),
            timers: RepeatTimers::new(),
            hard_drop_pending: false,
            hard_dropping: false,
            last_event: None,
            cleared: ArrayVec::new(),
        }
    }

    pub fn seed(&self) -> u32 {
        self.picker.seed()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next_shape(&self) -> Shape {
        self.next.shape()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_landed(&self) -> u32 {
        self.pieces_landed
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn game_over(&self) -> bool {
        self.lifecycle == Lifecycle::GameOver
    }

    pub fn hard_dropping(&self) -> bool {
        self.hard_dropping || self.hard_drop_pending
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn held(&self) -> &HeldControls {
        &self.held
    }

    /// Cells where the current piece would come to rest
    pub fn ghost(&self) -> [Position; 4] {
        self.current.landing_cells(&self.grid)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.grid.write_rows(&mut out.grid);
        out.current = PieceSnapshot::from(self.current);
        out.ghost = self.ghost();
        out.next = self.next.shape();
        out.score = self.score;
        out.lines = self.lines;
        out.pieces_landed = self.pieces_landed;
        out.lifecycle = self.lifecycle;
        out.hard_dropping = self.hard_dropping();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Feed a key press.
    ///
    /// Held controls join the held set (pressing an already-held control is a
    /// no-op) with their repeat timer starting from zero, so the first action
    /// comes one full repeat delay after the press. `HardDrop` arms the
    /// hard-drop sub-state for the next tick.
    pub fn press(&mut self, control: Control) {
        if self.game_over() {
            return;
        }
        if control == Control::HardDrop {
            if !self.hard_dropping {
                self.hard_drop_pending = true;
            }
            return;
        }
        if self.held.press(control) {
            self.timers.reset(control);
        }
    }

    /// Feed a key release
    pub fn release(&mut self, control: Control) {
        if self.held.release(control) {
            self.timers.reset(control);
        }
    }

    /// Advance the session by `dt_ms` milliseconds.
    ///
    /// Returns true if a piece landed during this tick.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        if self.game_over() {
            return false;
        }

        if mem::take(&mut self.hard_drop_pending) {
            self.hard_dropping = true;
        }

        if self.hard_dropping {
            self.current.try_move(Direction::Down, &self.grid);
            if self.current.landed() {
                self.hard_dropping = false;
                self.land();
                return true;
            }
            return false;
        }

        self.apply_held(dt_ms);

        if !self.current.landed() {
            self.drop_timer_ms = self.drop_timer_ms.saturating_add(dt_ms);
            if self.drop_timer_ms >= DROP_INTERVAL_MS {
                self.drop_timer_ms = 0;
                self.current.try_move(Direction::Down, &self.grid);
            }
        }

        if self.current.landed() {
            self.land();
            return true;
        }

        false
    }

    fn apply_held(&mut self, dt_ms: u32) {
        let Some(control) = self.held.latest() else {
            return;
        };
        if !self.timers.tick(control, dt_ms) {
            return;
        }

        match control {
            Control::Left => {
                self.current.try_move(Direction::Left, &self.grid);
            }
            Control::Right => {
                self.current.try_move(Direction::Right, &self.grid);
            }
            Control::Down => {
                self.current.try_move(Direction::Down, &self.grid);
            }
            Control::Rotate => {
                self.current.try_rotate(&self.grid);
            }
            Control::HardDrop => {}
        }
    }

    /// Commit the landed piece, clear rows, then either end the game or
    /// promote the next piece.
    fn land(&mut self) {
        let piece = self.current;
        let color = piece.color();
        for cell in piece.cells() {
            if cell.y >= 0 {
                self.grid.set_cell(cell.x, cell.y, color);
            }
        }

        let delta = line_clear::process(&mut self.grid);
        self.score = self.score.saturating_add(delta.points);
        self.lines = self.lines.saturating_add(delta.lines);
        self.pieces_landed = self.pieces_landed.wrapping_add(1);
        self.cleared = delta.cleared;

        let game_over = piece.cells().iter().any(|cell| cell.y <= 0);
        self.last_event = Some(LandingEvent {
            shape: piece.shape(),
            lines_cleared: delta.lines,
            points: delta.points,
            game_over,
        });

        if game_over {
            self.lifecycle = Lifecycle::GameOver;
            self.held.clear();
            return;
        }

        self.current = self.next;
        self.next = Piece::spawn(self.picker.draw());
        self.drop_timer_ms = 0;
    }

    /// Take and clear the last landing event.
    pub fn take_last_event(&mut self) -> Option<LandingEvent> {
        self.last_event.take()
    }

    /// Take the cells removed by the most recent clear.
    pub fn take_cleared(&mut self) -> ArrayVec<ClearedCell, MAX_CLEARED_CELLS> {
        mem::take(&mut self.cleared)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
