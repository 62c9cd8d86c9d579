//! Line-clear sparks.
//!
//! Purely cosmetic: every cleared cell turns into a spark that fades out and
//! drifts sideways. Nothing here feeds back into the session.

use crate::types::{ClearedCell, Color, Position};

/// Lifetime of a spark
pub const SPARK_MS: u32 = 360;

/// Horizontal drift: one cell per this many milliseconds
const DRIFT_MS_PER_CELL: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spark {
    pub origin: Position,
    pub color: Color,
    /// Drift direction, -1 or 1
    pub heading: i8,
    pub age_ms: u32,
}

impl Spark {
    /// Current cell, after drifting from `origin`
    pub fn position(&self) -> Position {
        let drift = (self.age_ms / DRIFT_MS_PER_CELL) as i8;
        self.origin.offset(drift * self.heading, 0)
    }

    /// Remaining intensity, 255 (fresh) down to 0 (expired)
    pub fn intensity(&self) -> u8 {
        let left = SPARK_MS.saturating_sub(self.age_ms);
        (left * 255 / SPARK_MS) as u8
    }
}

#[derive(Debug, Clone, Default)]
pub struct Effects {
    sparks: Vec<Spark>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn cleared cells into sparks.
    ///
    /// Cells left of the field center drift left, the rest drift right.
    pub fn spawn(&mut self, cleared: &[ClearedCell]) {
        self.sparks.extend(cleared.iter().map(|c| Spark {
            origin: c.position,
            color: c.color,
            heading: if c.position.x < crate::types::FIELD_COLS / 2 { -1 } else { 1 },
            age_ms: 0,
        }));
    }

    /// Age every spark and drop the expired ones.
    pub fn advance(&mut self, dt_ms: u32) {
        let mut i = 0;
        while i < self.sparks.len() {
            let spark = &mut self.sparks[i];
            spark.age_ms = spark.age_ms.saturating_add(dt_ms);
            if spark.age_ms >= SPARK_MS {
                // Order is irrelevant for drawing.
                self.sparks.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    pub fn clear(&mut self) {
        self.sparks.clear();
    }
}
