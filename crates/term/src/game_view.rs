//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::shapes::{min_offset_y, offsets};
use crate::core::SessionSnapshot;
use crate::effects::Effects;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, Position, Shape, FIELD_COLS, FIELD_ROWS};

const FIELD_BG: Rgb = Rgb::new(62, 61, 66);
const GRID_DOT: Rgb = Rgb::new(90, 89, 96);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Top-left corner of the field frame inside the viewport
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            FIELD_COLS as u16 * self.cell_w + 2,
            FIELD_ROWS as u16 * self.cell_h + 2,
        )
    }

    /// Render into a fresh framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, effects: &Effects, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, effects, viewport, &mut fb);
        fb
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        effects: &Effects,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::default(), PANEL_BG).cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
        };

        self.draw_border(fb, origin, frame_w, frame_h);

        for y in 0..FIELD_ROWS {
            for x in 0..FIELD_COLS {
                match snap.cell(x, y) {
                    Some(color) => self.draw_block(fb, origin, Position::new(x, y), color, false),
                    None => self.draw_empty(fb, origin, Position::new(x, y)),
                }
            }
        }

        if !snap.game_over() {
            for &p in &snap.ghost {
                if snap.cell(p.x, p.y).is_none() {
                    self.draw_ghost(fb, origin, p, snap.current.color);
                }
            }
            for &p in &snap.current.cells {
                self.draw_block(fb, origin, p, snap.current.color, true);
            }
        }

        for spark in effects.sparks() {
            let fg = FIELD_BG.mix(Rgb::from_color(spark.color), spark.intensity());
            self.fill_field_cell(fb, origin, spark.position(), '*', CellStyle::new(fg, FIELD_BG).bold());
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.game_over() {
            self.draw_overlay_text(fb, origin, frame_w, frame_h / 2, "GAME OVER");
            self.draw_overlay_text(fb, origin, frame_w, frame_h / 2 + 1, "r: restart");
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, o: Origin, w: u16, h: u16) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let right = o.x + w - 1;
        let bottom = o.y + h - 1;

        fb.set(o.x, o.y, style.cell('┌'));
        fb.set(right, o.y, style.cell('┐'));
        fb.set(o.x, bottom, style.cell('└'));
        fb.set(right, bottom, style.cell('┘'));
        for x in o.x + 1..right {
            fb.set(x, o.y, style.cell('─'));
            fb.set(x, bottom, style.cell('─'));
        }
        for y in o.y + 1..bottom {
            fb.set(o.x, y, style.cell('│'));
            fb.set(right, y, style.cell('│'));
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, o: Origin, p: Position) {
        self.fill_field_cell(fb, o, p, '·', CellStyle::new(GRID_DOT, FIELD_BG).dim());
    }

    fn draw_block(&self, fb: &mut FrameBuffer, o: Origin, p: Position, color: Color, bold: bool) {
        let mut style = CellStyle::new(Rgb::from_color(color), FIELD_BG);
        style.bold = bold;
        self.fill_field_cell(fb, o, p, '█', style);
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, o: Origin, p: Position, color: Color) {
        let fg = FIELD_BG.mix(Rgb::from_color(color), 140);
        self.fill_field_cell(fb, o, p, '░', CellStyle::new(fg, FIELD_BG));
    }

    /// Paint one field cell; cells outside the field (e.g. above row 0) are skipped.
    fn fill_field_cell(&self, fb: &mut FrameBuffer, o: Origin, p: Position, ch: char, style: CellStyle) {
        if p.x < 0 || p.x >= FIELD_COLS || p.y < 0 || p.y >= FIELD_ROWS {
            return;
        }
        let px = o.x + 1 + p.x as u16 * self.cell_w;
        let py = o.y + 1 + p.y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, style.cell(ch));
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        o: Origin,
        frame_w: u16,
    ) {
        let panel_x = o.x.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = o.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_str(panel_x, y + 1, &snap.score.to_string(), value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_str(panel_x, y + 1, &snap.lines.to_string(), value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        self.draw_preview(fb, panel_x, y, snap.next);
    }

    /// Draw a shape in spawn orientation, top-left aligned at (x, y)
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: Shape) {
        let style = CellStyle::new(Rgb::from_color(shape.color()), PANEL_BG);
        let shape_offsets = offsets(shape);
        let min_x = shape_offsets.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let min_y = min_offset_y(shape);

        for &(dx, dy) in shape_offsets {
            let px = x + (dx - min_x) as u16 * self.cell_w;
            let py = y + (dy - min_y) as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, style.cell('█'));
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, o: Origin, frame_w: u16, row: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = o.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, o.y.saturating_add(row), text, style);
    }
}
