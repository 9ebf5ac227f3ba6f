/// In-memory RGB565 panel.
///
/// Behaves like the ST7735 as far as the game can tell: clipped pixel writes,
/// a raster window fed by `push_pixel`, transparent text, and a handful of
/// controller commands over `PanelTransport`. The terminal host presents it;
/// tests inspect it pixel by pixel.

use std::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::{DrawTarget, Drawable, OriginDimensions, Pixel, Point, Size};
use embedded_graphics::text::{Baseline, Text};

use crate::hal::{Color, DrawSurface, PanelTransport};

// ST7735 command bytes the panel understands.
pub const SWRESET: u8 = 0x01;
pub const INVOFF: u8 = 0x20;
pub const INVON: u8 = 0x21;
pub const DISPOFF: u8 = 0x28;
pub const DISPON: u8 = 0x29;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Window {
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    /// Pixels pushed since the window was opened, modulo its area.
    cursor: u32,
}

#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    pixels: Vec<Color>,
    window: Window,
    text_cursor: Point,
    text_color: Color,
    inverted: bool,
    display_on: bool,
    /// Bumped on every visible change so presenters can skip idle frames.
    revision: u64,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        FrameBuffer {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
            window: Window::default(),
            text_cursor: Point::new(0, 0),
            text_color: Color::WHITE,
            inverted: false,
            display_on: true,
            revision: 0,
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Stored GRAM value, `None` off-panel.
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// What the glass shows, after inversion and display-off.
    pub fn visible_pixel(&self, x: i32, y: i32) -> Color {
        match self.pixel_at(x, y) {
            _ if !self.display_on => Color::BLACK,
            Some(c) if self.inverted => c.inverted(),
            Some(c) => c,
            None => Color::BLACK,
        }
    }

    /// Row-major copy of the stored pixels.
    pub fn snapshot(&self) -> Vec<Color> {
        self.pixels.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn is_display_on(&self) -> bool {
        self.display_on
    }

    pub fn text_cursor(&self) -> (i32, i32) {
        (self.text_cursor.x, self.text_cursor.y)
    }

    fn store(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            if self.pixels[i] != color {
                self.pixels[i] = color;
                self.revision += 1;
            }
        }
    }
}

impl DrawSurface for FrameBuffer {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn pixel(&mut self, x: i32, y: i32, color: Color) {
        self.store(x, y, color);
    }

    fn set_window(&mut self, x: i32, y: i32, w: u16, h: u16) {
        self.window = Window {
            x,
            y,
            w: u32::from(w),
            h: u32::from(h),
            cursor: 0,
        };
    }

    fn push_pixel(&mut self, color: Color) {
        let win = self.window;
        let area = win.w * win.h;
        if area == 0 {
            return;
        }
        let x = win.x + (win.cursor % win.w) as i32;
        let y = win.y + (win.cursor / win.w) as i32;
        self.store(x, y, color);
        self.window.cursor = (win.cursor + 1) % area;
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.text_cursor = Point::new(x, y);
    }

    fn print(&mut self, text: &str) {
        let color = Rgb565::from(RawU16::new(self.text_color.0));
        let style = MonoTextStyle::new(&FONT_6X10, color);
        let origin = self.text_cursor;
        let text = Text::with_baseline(text, origin, style, Baseline::Top);
        let drawn = text.draw(&mut Canvas(self));
        if let Ok(next) = drawn {
            self.text_cursor = next;
        }
    }

    fn line_v(&mut self, x: i32, y: i32, h: i32, color: Color) {
        for py in y..y + h.max(0) {
            self.store(x, py, color);
        }
    }

    fn line_h(&mut self, x: i32, y: i32, w: i32, color: Color) {
        for px in x..x + w.max(0) {
            self.store(px, y, color);
        }
    }

    fn clear(&mut self, color: Color) {
        if self.pixels.iter().any(|&c| c != color) {
            self.pixels.fill(color);
            self.revision += 1;
        }
    }
}

impl PanelTransport for FrameBuffer {
    fn write_command(&mut self, command: u8, params: &[u8]) {
        match command {
            SWRESET => {
                self.pixels.fill(Color::BLACK);
                self.inverted = false;
                self.display_on = true;
            }
            INVOFF => self.inverted = false,
            INVON => self.inverted = true,
            DISPOFF => self.display_on = false,
            DISPON => self.display_on = true,
            other => {
                log::warn!("panel ignores command {:02x} {:02x?}", other, params);
                return;
            }
        }
        self.revision += 1;
    }
}

// ── embedded-graphics glue (text only) ────────────────────────────────────────

struct Canvas<'a>(&'a mut FrameBuffer);

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.0.width), u32::from(self.0.height))
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.0.store(point.x, point.y, Color(color.into_storage()));
        }
        Ok(())
    }
}
