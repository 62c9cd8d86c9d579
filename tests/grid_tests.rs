//! Grid tests - collision queries and row compaction

use blockfall::core::Grid;
use blockfall::types::{Color, Position, FIELD_COLS, FIELD_ROWS};

fn fill_row(grid: &mut Grid, y: i8, color: Color) {
    for x in 0..FIELD_COLS {
        grid.set_cell(x, y, color);
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.cols(), FIELD_COLS);
    assert_eq!(grid.rows(), FIELD_ROWS);
    assert_eq!(grid.filled_count(), 0);

    for y in 0..FIELD_ROWS {
        for x in 0..FIELD_COLS {
            assert_eq!(grid.get(x, y), Some(None), "cell ({x}, {y}) should be empty");
            assert!(!grid.is_occupied(x, y));
        }
    }
}

#[test]
fn test_grid_outside_field() {
    let grid = Grid::new();

    // Sky is open, walls and floor are solid.
    assert!(!grid.is_occupied(4, -3));
    assert!(grid.is_occupied(-1, -3));
    assert!(grid.is_occupied(FIELD_COLS, -1));
    assert!(grid.is_occupied(-1, 5));
    assert!(grid.is_occupied(FIELD_COLS, 5));
    assert!(grid.is_occupied(0, FIELD_ROWS));

    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, FIELD_ROWS), None);
}

#[test]
fn test_grid_set_out_of_bounds_is_rejected() {
    let mut grid = Grid::new();
    assert!(!grid.set_cell(-1, 0, Color::from_hue(0)));
    assert!(!grid.set_cell(0, -1, Color::from_hue(0)));
    assert!(!grid.set_cell(0, FIELD_ROWS, Color::from_hue(0)));
    assert_eq!(grid.filled_count(), 0);
}

#[test]
fn test_collides() {
    let mut grid = Grid::new();
    grid.set_cell(3, 10, Color::from_hue(0));

    assert!(grid.collides(&[Position::new(2, 10), Position::new(3, 10)]));
    assert!(!grid.collides(&[Position::new(2, 10), Position::new(3, 9)]));
    assert!(!grid.collides(&[Position::new(3, -1)]));
}

#[test]
fn test_clear_two_rows_shifts_rows_above() {
    let mut grid = Grid::new();
    let red = Color::from_hue(0);
    let blue = Color::from_hue(240);

    fill_row(&mut grid, 18, red);
    fill_row(&mut grid, 19, red);
    grid.set_cell(3, 17, blue);
    grid.set_cell(7, 10, blue);

    let report = grid.clear_and_compact();
    assert_eq!(report.rows, 2);
    assert_eq!(report.cells.len(), 2 * FIELD_COLS as usize);

    assert_eq!(grid.get(3, 19), Some(Some(blue)));
    assert_eq!(grid.get(7, 12), Some(Some(blue)));
    assert_eq!(grid.get(3, 17), Some(None));
    assert_eq!(grid.filled_count(), 2);
}

#[test]
fn test_clear_conserves_cells_and_is_idempotent() {
    let mut grid = Grid::new();
    let c = Color::from_hue(100);

    fill_row(&mut grid, 19, c);
    fill_row(&mut grid, 16, c);
    for x in 0..FIELD_COLS - 1 {
        grid.set_cell(x, 17, c);
    }
    grid.set_cell(5, 18, c);
    grid.set_cell(0, 2, c);

    let before = grid.filled_count();
    let report = grid.clear_and_compact();
    assert_eq!(report.rows, 2);
    assert_eq!(grid.filled_count(), before - report.cells.len());

    // No full rows remain, so a second pass is a no-op.
    let after = grid.clone();
    let again = grid.clear_and_compact();
    assert_eq!(again.rows, 0);
    assert!(again.cells.is_empty());
    assert_eq!(grid, after);

    for y in 0..FIELD_ROWS {
        assert!(!grid.row_is_full(y));
    }
}

#[test]
fn test_cleared_cells_keep_color_and_position() {
    let mut grid = Grid::new();
    for x in 0..FIELD_COLS {
        grid.set_cell(x, 12, Color::from_hue(x as u16 * 30));
    }

    let report = grid.clear_and_compact();
    assert_eq!(report.rows, 1);
    for cleared in &report.cells {
        assert_eq!(cleared.position.y, 12);
        assert_eq!(cleared.color, Color::from_hue(cleared.position.x as u16 * 30));
    }
}

#[test]
fn test_write_rows_matches_get() {
    let mut grid = Grid::new();
    grid.set_cell(1, 2, Color::from_hue(50));
    grid.set_cell(9, 19, Color::from_hue(300));

    let mut rows = [[None; FIELD_COLS as usize]; FIELD_ROWS as usize];
    grid.write_rows(&mut rows);

    for y in 0..FIELD_ROWS {
        for x in 0..FIELD_COLS {
            assert_eq!(Some(rows[y as usize][x as usize]), grid.get(x, y));
        }
    }
}
