/// Terminal stand-ins for the board: panel presenter, button and clock.
///
/// The presenter maps two panel rows onto one character cell using an upper
/// half block (foreground = upper pixel, background = lower pixel) and only
/// repaints cells whose pixels changed, just like the game itself.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    style::{self, Color as TermColor, Colors, Print},
    QueueableCommand,
};

use crate::framebuffer::FrameBuffer;
use crate::hal::{Clock, Color, DrawSurface, InputSource};

// ── Presenter ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TerminalPresenter {
    /// Top-left cell of the panel.
    origin: (u16, u16),
    /// (upper, lower) pixel pair per cell as last emitted.
    cells: Vec<Option<(Color, Color)>>,
    presented_revision: Option<u64>,
}

impl TerminalPresenter {
    pub fn new(origin: (u16, u16)) -> Self {
        TerminalPresenter {
            origin,
            cells: Vec::new(),
            presented_revision: None,
        }
    }

    /// Terminal rows the panel occupies.
    pub fn rows_for(panel_height: u16) -> u16 {
        panel_height.div_ceil(2)
    }

    /// Forget what the terminal shows (after a clear or resize).
    pub fn invalidate(&mut self) {
        self.cells.clear();
        self.presented_revision = None;
    }

    /// Emit every changed cell. Returns the number of cells written.
    pub fn present<W: Write>(&mut self, out: &mut W, fb: &FrameBuffer) -> io::Result<usize> {
        if self.presented_revision == Some(fb.revision()) {
            return Ok(0);
        }

        let (w, h) = (fb.width(), fb.height());
        let rows = Self::rows_for(h);
        let total = w as usize * rows as usize;
        if self.cells.len() != total {
            self.cells = vec![None; total];
        }

        let mut written = 0;
        // Position of the terminal cursor after the last print, if known.
        let mut at: Option<(u16, u16)> = None;
        for row in 0..rows {
            for col in 0..w {
                let upper = fb.visible_pixel(col as i32, 2 * row as i32);
                let lower = fb.visible_pixel(col as i32, 2 * row as i32 + 1);
                let slot = &mut self.cells[row as usize * w as usize + col as usize];
                if *slot == Some((upper, lower)) {
                    continue;
                }
                *slot = Some((upper, lower));

                let target = (self.origin.0 + col, self.origin.1 + row);
                if at != Some(target) {
                    out.queue(cursor::MoveTo(target.0, target.1))?;
                }
                out.queue(style::SetColors(Colors::new(term_color(upper), term_color(lower))))?;
                out.queue(Print('▀'))?;
                at = Some((target.0 + 1, target.1));
                written += 1;
            }
        }

        if written > 0 {
            out.queue(style::ResetColor)?;
            out.flush()?;
        }
        self.presented_revision = Some(fb.revision());
        Ok(written)
    }
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb888();
    TermColor::Rgb { r, g, b }
}

// ── Button ────────────────────────────────────────────────────────────────────

/// A key is considered held if its last press/repeat event arrived within this
/// window. Covers terminals that never report releases: OS key repeat runs at
/// 15 Hz or faster, so a held key refreshes it before it expires.
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Level-style jump button built from key events.
#[derive(Clone, Debug)]
pub struct KeyButton {
    last_seen: Option<Instant>,
    /// The terminal sends release events, so a press lasts until released.
    releases_reported: bool,
    hold_window: Duration,
}

impl KeyButton {
    pub fn new(releases_reported: bool) -> Self {
        KeyButton {
            last_seen: None,
            releases_reported,
            hold_window: HOLD_WINDOW,
        }
    }

    /// Record a press or auto-repeat.
    pub fn press(&mut self, now: Instant) {
        self.last_seen = Some(now);
    }

    pub fn release(&mut self) {
        self.last_seen = None;
    }

    pub fn is_pressed_at(&self, now: Instant) -> bool {
        match self.last_seen {
            None => false,
            Some(_) if self.releases_reported => true,
            Some(seen) => now.saturating_duration_since(seen) <= self.hold_window,
        }
    }
}

impl InputSource for KeyButton {
    fn is_pressed(&self) -> bool {
        self.is_pressed_at(Instant::now())
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Milliseconds since construction, wrapping like a 32-bit tick counter.
#[derive(Clone, Debug)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        StdClock {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        StdClock::new()
    }
}

impl Clock for StdClock {
    fn now_millis(&self) -> u32 {
        self.origin.elapsed().as_millis() as u32
    }

    fn delay_millis(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
