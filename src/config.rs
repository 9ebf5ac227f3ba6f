/// Game constants and the runtime-tunable configuration.
///
/// Sizes that belong to the sprites and the pipe are fixed; everything that
/// depends on the attached panel lives in `Playfield`.

use std::env;

use thiserror::Error;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Horizontal scroll, pixels per simulation step (pipe) or render pass (grass).
pub const SPEED: i16 = 1;
pub const GRAVITY: f32 = 9.8;
pub const JUMP_FORCE: f32 = 2.15;

// ── Timing ────────────────────────────────────────────────────────────────────

/// 1000 / 50 Hz.
pub const SKIP_TICKS: u32 = 20;
pub const MAX_FRAMESKIP: u32 = 5;
pub const GAME_OVER_PAUSE_MS: u32 = 1200;

// ── Bird ──────────────────────────────────────────────────────────────────────

pub const BIRDW: i16 = 8;
pub const BIRDH: i16 = 8;
pub const BIRDW2: i16 = BIRDW / 2;
pub const BIRDH2: i16 = BIRDH / 2;
pub const BIRD_X: i16 = 20;

// ── Pipe ──────────────────────────────────────────────────────────────────────

pub const PIPEW: i16 = 12;
pub const GAPHEIGHT: i16 = 36;
/// Minimum distance between the gap and either end of the game area.
pub const GAP_MARGIN: i16 = 10;

// ── Floor ─────────────────────────────────────────────────────────────────────

/// Floor height, measured from the bottom of the screen.
pub const FLOORH: i16 = 20;
/// Grass stripe height (inside the floor, starts just below the game area).
pub const GRASSH: i16 = 4;
/// Width of the repeating grass tile; the scroll phase lives on this lattice.
pub const GRASS_TILE_W: i16 = 8;

// ── Panel ─────────────────────────────────────────────────────────────────────

/// Physical panel resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Panel {
    pub width: u16,
    pub height: u16,
}

impl Panel {
    /// The 0.96" 80x160 ST7735 module.
    pub const MINI: Panel = Panel { width: 80, height: 160 };
    /// The 1.8" 128x160 ST7735 module.
    pub const WIDE: Panel = Panel { width: 128, height: 160 };
}

impl Default for Panel {
    fn default() -> Self {
        Panel::MINI
    }
}

/// Screen geometry in signed game coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playfield {
    /// TFTW
    pub width: i16,
    /// TFTH
    pub height: i16,
}

impl Playfield {
    pub fn half_width(&self) -> i16 {
        self.width / 2
    }

    pub fn half_height(&self) -> i16 {
        self.height / 2
    }

    /// GAMEH: everything above the floor.
    pub fn game_height(&self) -> i16 {
        self.height - FLOORH
    }

    /// Half-open range gap offsets are drawn from.
    pub fn gap_range(&self) -> (i32, i32) {
        (
            GAP_MARGIN as i32,
            (self.game_height() - (GAP_MARGIN + GAPHEIGHT)) as i32,
        )
    }
}

impl From<Panel> for Playfield {
    fn from(panel: Panel) -> Self {
        Playfield {
            width: panel.width as i16,
            height: panel.height as i16,
        }
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}: expected WIDTHxHEIGHT, got {value:?}")]
    BadPanel { key: &'static str, value: String },
    #[error("{key}: expected a positive integer, got {value:?}")]
    BadNumber { key: &'static str, value: String },
    #[error("panel {width}x{height} is outside the supported range")]
    UnsupportedPanel { width: u16, height: u16 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub panel: Panel,
    pub skip_ticks_ms: u32,
    pub max_frameskip: u32,
    pub game_over_pause_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            panel: Panel::default(),
            skip_ticks_ms: SKIP_TICKS,
            max_frameskip: MAX_FRAMESKIP,
            game_over_pause_ms: GAME_OVER_PAUSE_MS,
        }
    }
}

impl Config {
    /// Defaults overridden by `FLAPPY_PANEL`, `FLAPPY_SKIP_TICKS`,
    /// `FLAPPY_MAX_FRAMESKIP` and `FLAPPY_PAUSE_MS`.
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup("FLAPPY_PANEL") {
            config.panel = parse_panel("FLAPPY_PANEL", &value)?;
        }
        if let Some(value) = lookup("FLAPPY_SKIP_TICKS") {
            config.skip_ticks_ms = parse_positive("FLAPPY_SKIP_TICKS", &value)?;
        }
        if let Some(value) = lookup("FLAPPY_MAX_FRAMESKIP") {
            config.max_frameskip = parse_positive("FLAPPY_MAX_FRAMESKIP", &value)?;
        }
        if let Some(value) = lookup("FLAPPY_PAUSE_MS") {
            config.game_over_pause_ms = parse_positive("FLAPPY_PAUSE_MS", &value)?;
        }

        Ok(config)
    }

    pub fn playfield(&self) -> Playfield {
        Playfield::from(self.panel)
    }
}

fn parse_panel(key: &'static str, value: &str) -> Result<Panel, ConfigError> {
    let bad = || ConfigError::BadPanel {
        key,
        value: value.to_string(),
    };
    let (w, h) = value.trim().split_once(['x', 'X']).ok_or_else(bad)?;
    let width: u16 = w.trim().parse().map_err(|_| bad())?;
    let height: u16 = h.trim().parse().map_err(|_| bad())?;

    // The pipe gap must fit between the margins, and the pipe must fit on screen.
    let min_height = (FLOORH + 2 * GAP_MARGIN + GAPHEIGHT + 1) as u16;
    let min_width = (PIPEW + BIRD_X + 2 * BIRDW) as u16;
    if !(min_width..=1024).contains(&width) || !(min_height..=1024).contains(&height) {
        return Err(ConfigError::UnsupportedPanel { width, height });
    }
    Ok(Panel { width, height })
}

fn parse_positive(key: &'static str, value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::BadNumber {
            key,
            value: value.to_string(),
        }),
    }
}
