//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; later frames only rewrite runs of changed cells.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
    /// Whether the terminal accepted the key release reporting request.
    enhanced_keys: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            prev: None,
            buf: Vec::with_capacity(64 * 1024),
            enhanced_keys: false,
        }
    }

    /// Switch to raw mode and the alternate screen.
    ///
    /// Also asks the terminal to report key releases where supported.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.enhanced_keys {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf().context("enter alternate screen")
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced_keys {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf().context("leave alternate screen")?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Whether key release events can be expected from the terminal
    pub fn reports_key_releases(&self) -> bool {
        self.enhanced_keys
    }

    /// Force the next frame to be a full redraw.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Present a frame.
    ///
    /// The frame is swapped with the renderer's previous frame, so after the
    /// call `fb` holds stale contents the caller is expected to overwrite.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.prev.as_ref() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(prev, fb, &mut self.buf)?;
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
            }
        }
        self.flush_buf().context("write frame")?;

        let mut prev = self
            .prev
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        prev.resize(fb.width(), fb.height());
        std::mem::swap(&mut prev, fb);
        self.prev = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits style changes only when the style actually differs.
struct StyleCursor {
    current: Option<CellStyle>,
}

impl StyleCursor {
    fn new() -> Self {
        Self { current: None }
    }

    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.current == Some(style) {
            return Ok(());
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.current = Some(style);
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut styles = StyleCursor::new();
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            styles.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }

    styles.finish(out)
}

/// Encode only the changed runs between `prev` and `next` into `out`.
///
/// Both buffers must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut styles = StyleCursor::new();

    for (y, start, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(start, y))?;
        for x in start..start + len {
            let cell = next.get(x, y).unwrap_or_default();
            styles.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }

    styles.finish(out)
}

/// Maximal horizontal runs `(y, x, len)` of cells that differ.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let width = next.width();
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < width && !differs(x) {
                x += 1;
            }
            if x >= width {
                return None;
            }
            let start = x;
            while x < width && differs(x) {
                x += 1;
            }
            Some((y, start, x - start))
        })
    })
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
