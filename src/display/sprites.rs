// Bitmaps and palette, RGB565.

pub use crate::config::GRASS_TILE_W;
use crate::config::{BIRDH, BIRDW, GRASSH};
use crate::hal::Color;

pub const BCKGRDCOL: Color = Color::rgb(138, 235, 244);
pub const BIRDCOL: Color = Color::rgb(255, 254, 174);
pub const PIPECOL: Color = Color::rgb(99, 255, 78);
pub const PIPEHIGHCOL: Color = Color::rgb(250, 255, 250);
pub const PIPESEAMCOL: Color = Color::rgb(0, 0, 0);
pub const FLOORCOL: Color = Color::rgb(246, 240, 163);
pub const TEXTCOL: Color = Color::WHITE;

const C0: Color = BCKGRDCOL;
const C1: Color = Color::rgb(195, 165, 75);
const C2: Color = BIRDCOL;
const C3: Color = Color::WHITE;
const C4: Color = Color::RED;
const C5: Color = Color::rgb(251, 216, 114);

/// Row-major, `BIRDW` x `BIRDH`.
#[rustfmt::skip]
pub const BIRD_DATA: [Color; (BIRDW * BIRDH) as usize] = [
    C0, C0, C1, C1, C1, C1, C1, C0,
    C0, C1, C2, C2, C2, C1, C3, C1,
    C0, C2, C2, C2, C2, C1, C3, C1,
    C1, C1, C1, C2, C2, C3, C1, C1,
    C1, C2, C2, C2, C2, C2, C4, C4,
    C1, C2, C2, C2, C1, C5, C4, C0,
    C0, C1, C2, C1, C5, C5, C5, C0,
    C0, C0, C1, C5, C5, C5, C0, C0,
];

const G0: Color = Color::rgb(0x00, 0x96, 0x88);
const G1: Color = Color::rgb(0x4c, 0xaf, 0x50);
const G2: Color = Color::rgb(0xcd, 0xdc, 0x39);

/// Row-major, `GRASS_TILE_W` x `GRASSH`; tiles seamlessly horizontally.
#[rustfmt::skip]
pub const GRASS_DATA: [Color; (GRASS_TILE_W * GRASSH) as usize] = [
    G0, G0, G1, G2, G0, G0, G0, G0,
    G0, G1, G2, G1, G0, G0, G0, G0,
    G1, G2, G1, G0, G0, G0, G0, G0,
    G2, G1, G0, G0, G0, G0, G0, G0,
];

pub fn bird_pixel(col: i16, row: i16) -> Color {
    BIRD_DATA[(col + row * BIRDW) as usize]
}

pub fn grass_pixel(phase: i16, col: i16, row: i16) -> Color {
    let tile_col = (phase + col).rem_euclid(GRASS_TILE_W);
    GRASS_DATA[(row * GRASS_TILE_W + tile_col) as usize]
}
