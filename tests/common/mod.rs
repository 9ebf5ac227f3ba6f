#![allow(dead_code)]

use std::cell::Cell;

use flappy_tft::framebuffer::FrameBuffer;
use flappy_tft::hal::{Clock, Color, DrawSurface, InputSource, PanelTransport};

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Time only moves when a test says so (or on `delay_millis`).
#[derive(Debug, Default)]
pub struct ManualClock {
    pub now: u32,
    pub delays: Vec<u32>,
}

impl ManualClock {
    pub fn at(now: u32) -> Self {
        ManualClock { now, delays: Vec::new() }
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u32 {
        self.now
    }

    fn delay_millis(&mut self, ms: u32) {
        self.delays.push(ms);
        self.now = self.now.wrapping_add(ms);
    }
}

// ── Button ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Button(pub Cell<bool>);

impl Button {
    pub fn pressed() -> Self {
        Button(Cell::new(true))
    }

    pub fn released() -> Self {
        Button(Cell::new(false))
    }

    pub fn set(&self, pressed: bool) {
        self.0.set(pressed);
    }
}

impl InputSource for Button {
    fn is_pressed(&self) -> bool {
        self.0.get()
    }
}

// ── Recording surface ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    pub x: i32,
    pub y: i32,
    pub color: Color,
    pub text: String,
}

/// A framebuffer that also logs text draws and counts pixel traffic.
#[derive(Debug)]
pub struct Recorder {
    pub fb: FrameBuffer,
    pub texts: Vec<TextOp>,
    pub pixel_writes: usize,
    pub commands: Vec<(u8, Vec<u8>)>,
    cursor: (i32, i32),
    color: Color,
}

impl Recorder {
    pub fn new(width: u16, height: u16) -> Self {
        Recorder {
            fb: FrameBuffer::new(width, height),
            texts: Vec::new(),
            pixel_writes: 0,
            commands: Vec::new(),
            cursor: (0, 0),
            color: Color::WHITE,
        }
    }

    pub fn printed(&self) -> Vec<&str> {
        self.texts.iter().map(|t| t.text.as_str()).collect()
    }
}

impl DrawSurface for Recorder {
    fn width(&self) -> u16 {
        self.fb.width()
    }

    fn height(&self) -> u16 {
        self.fb.height()
    }

    fn pixel(&mut self, x: i32, y: i32, color: Color) {
        self.pixel_writes += 1;
        self.fb.pixel(x, y, color);
    }

    fn set_window(&mut self, x: i32, y: i32, w: u16, h: u16) {
        self.fb.set_window(x, y, w, h);
    }

    fn push_pixel(&mut self, color: Color) {
        self.pixel_writes += 1;
        self.fb.push_pixel(color);
    }

    fn set_text_color(&mut self, color: Color) {
        self.color = color;
        self.fb.set_text_color(color);
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
        self.fb.set_cursor(x, y);
    }

    fn print(&mut self, text: &str) {
        self.texts.push(TextOp {
            x: self.cursor.0,
            y: self.cursor.1,
            color: self.color,
            text: text.to_string(),
        });
        self.fb.print(text);
    }
}

impl PanelTransport for Recorder {
    fn write_command(&mut self, command: u8, params: &[u8]) {
        self.commands.push((command, params.to_vec()));
        self.fb.write_command(command, params);
    }
}
