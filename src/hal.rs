/// Boundary with the board: display, button, clock and random source.
///
/// The game core never touches pins or buses directly. Whatever drives the
/// panel implements `DrawSurface` (and `PanelTransport` for raw controller
/// access), and the rest of the board is reached through the small traits
/// below.

use std::fmt;

// ── Colour ────────────────────────────────────────────────────────────────────

/// A 16-bit RGB565 colour as the panel expects it on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);

    /// Pack 8-bit channels into RGB565.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }

    /// Expand back to 8-bit channels (low bits replicated from the high ones).
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        let r = ((self.0 >> 11) & 0x1F) as u8;
        let g = ((self.0 >> 5) & 0x3F) as u8;
        let b = (self.0 & 0x1F) as u8;
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    pub const fn inverted(self) -> Color {
        Color(!self.0)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

/// Immediate-mode drawing on a fixed-size panel, origin top-left.
///
/// Coordinates are signed; implementations clip anything off-panel. Only the
/// raw primitives are required, the shapes have default implementations a
/// driver can replace with faster windowed transfers.
pub trait DrawSurface {
    fn width(&self) -> u16;
    fn height(&self) -> u16;

    fn pixel(&mut self, x: i32, y: i32, color: Color);

    /// Open a raster window; subsequent `push_pixel` calls fill it row by row.
    fn set_window(&mut self, x: i32, y: i32, w: u16, h: u16);
    fn push_pixel(&mut self, color: Color);

    fn set_text_color(&mut self, color: Color);
    fn set_cursor(&mut self, x: i32, y: i32);
    /// Draw text at the cursor in the current text colour, advancing the cursor.
    fn print(&mut self, text: &str);

    fn print_fmt(&mut self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(text) => self.print(text),
            None => self.print(&args.to_string()),
        }
    }

    fn line_v(&mut self, x: i32, y: i32, h: i32, color: Color) {
        for dy in 0..h.max(0) {
            self.pixel(x, y + dy, color);
        }
    }

    fn line_h(&mut self, x: i32, y: i32, w: i32, color: Color) {
        for dx in 0..w.max(0) {
            self.pixel(x + dx, y, color);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.set_window(x, y, w as u16, h as u16);
        for _ in 0..(w * h) {
            self.push_pixel(color);
        }
    }

    fn clear(&mut self, color: Color) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        self.fill_rect(0, 0, w, h, color);
    }
}

/// Raw command channel to the panel controller (command byte + parameters).
pub trait PanelTransport {
    fn write_command(&mut self, command: u8, params: &[u8]);
}

// ── Button, clock, randomness ─────────────────────────────────────────────────

/// The jump button, sampled as a level (no edge memory).
pub trait InputSource {
    fn is_pressed(&self) -> bool;
}

/// Monotonic millisecond counter plus a blocking delay.
pub trait Clock {
    fn now_millis(&self) -> u32;
    fn delay_millis(&mut self, ms: u32);
}

/// Seedable generator of bounded integers.
pub trait RandomSource {
    fn seed(&mut self, seed: u32);
    /// Uniform over `[min, max)`. `max` must be greater than `min`.
    fn rand_range(&mut self, min: i32, max: i32) -> i32;
}
