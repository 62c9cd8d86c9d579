//! Line-clear engine - compaction plus scoring
//!
//! Scoring is linear: every cleared row is worth [`LINE_SCORE_MULTIPLIER`]
//! points regardless of how many rows clear at once.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{ClearedCell, LINE_SCORE_MULTIPLIER, MAX_CLEARED_CELLS};

/// Outcome of one line-clear pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreDelta {
    pub lines: u32,
    pub points: u32,
    /// Removed cells for the effects layer
    pub cleared: ArrayVec<ClearedCell, MAX_CLEARED_CELLS>,
}

/// Points for clearing `lines` rows
pub fn line_score(lines: u32) -> u32 {
    lines.saturating_mul(LINE_SCORE_MULTIPLIER)
}

/// Clear every full row of `grid` and compute the score delta
pub fn process(grid: &mut Grid) -> ScoreDelta {
    let report = grid.clear_and_compact();
    ScoreDelta {
        lines: report.rows,
        points: line_score(report.rows),
        cleared: report.cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, FIELD_COLS};

    #[test]
    fn test_line_score_is_linear() {
        assert_eq!(line_score(0), 0);
        assert_eq!(line_score(1), 20);
        assert_eq!(line_score(2), 40);
        assert_eq!(line_score(3), 60);
        assert_eq!(line_score(4), 80);
    }

    #[test]
    fn test_process_without_full_rows() {
        let mut grid = Grid::new();
        grid.set_cell(0, 19, Color::from_hue(10));

        let delta = process(&mut grid);
        assert_eq!(delta, ScoreDelta::default());
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_process_reports_cleared_cells() {
        let mut grid = Grid::new();
        for x in 0..FIELD_COLS {
            grid.set_cell(x, 19, Color::from_hue(x as u16 * 30));
        }

        let delta = process(&mut grid);
        assert_eq!(delta.lines, 1);
        assert_eq!(delta.points, 20);
        assert_eq!(delta.cleared.len(), FIELD_COLS as usize);
        assert_eq!(delta.cleared[3].color, Color::from_hue(90));
        assert_eq!(delta.cleared[3].position.x, 3);
    }
}
