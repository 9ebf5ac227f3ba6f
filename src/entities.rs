/// Game entity types: plain data, constructors and the grass scroll.

use crate::config::{Playfield, BIRDH2, BIRD_X, GRASS_TILE_W, SPEED};

// ── Game state ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    /// Power-on; draws the title screen once.
    Starting,
    /// Title or game-over screen is up, waiting for the button.
    Idle,
    Running,
    /// Collision happened; shows the score on the next tick.
    Ended,
}

// ── Bird ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    pub x: i16,
    pub y: i16,
    /// The y drawn on the previous frame, kept only to erase the old sprite.
    pub old_y: i16,
    /// Pixels per step, positive = downward.
    pub vel_y: f32,
}

impl Bird {
    pub fn spawn(field: &Playfield) -> Bird {
        let y = field.half_height() - BIRDH2;
        Bird {
            x: BIRD_X,
            y,
            old_y: y,
            vel_y: 0.0,
        }
    }
}

// ── Pipe ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    pub x: i16,
    /// The x drawn on the previous frame; equal to `x` means nothing to redraw.
    pub old_x: i16,
    /// Top edge of the gap.
    pub gap_y: i16,
}

// ── Grass ─────────────────────────────────────────────────────────────────────

/// The scrolling stripe at the top of the floor.
#[derive(Clone, Debug, PartialEq)]
pub struct Grass {
    /// Scroll phase in pixels. Only `x mod GRASS_TILE_W` is visible.
    pub x: i16,
    pub y: i16,
}

impl Grass {
    /// Move the stripe one step; the phase wraps on the tile, whatever the
    /// screen width.
    pub fn advance(&mut self) {
        self.x = (self.x + SPEED).rem_euclid(GRASS_TILE_W);
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Per-run bookkeeping: score plus the fixed-timestep clock.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameSession {
    pub score: u16,
    /// The bird is inside the current pipe and has not been scored for it yet.
    pub passed_pipe: bool,
    /// Timestamp of the last simulation step.
    pub last_time: u32,
    /// Deadline of the next due simulation step.
    pub next_tick: u32,
    /// Catch-up steps taken since the last render.
    pub loops: u32,
}

impl GameSession {
    pub fn start(now: u32) -> GameSession {
        GameSession {
            last_time: now,
            next_tick: now,
            ..GameSession::default()
        }
    }
}

// ── Master model ──────────────────────────────────────────────────────────────

/// Everything one run of the game owns.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityModel {
    pub field: Playfield,
    pub bird: Bird,
    pub pipe: Pipe,
    pub grass: Grass,
    pub session: GameSession,
}
