/// Rendering layer: all panel drawing lives here.
///
/// The panel sits on a slow serial bus, so the running game is never cleared
/// and redrawn. Each frame only touches what moved: two pipe columns, the
/// grass stripe, the bird's own 8x8 box and, when it changed, the score.

pub mod sprites;

use crate::config::{Playfield, BIRDH, BIRDW, FLOORH, GAPHEIGHT, GRASSH, PIPEW};
use crate::entities::EntityModel;
use crate::hal::{Color, DrawSurface};

use sprites::{
    bird_pixel, grass_pixel, BCKGRDCOL, FLOORCOL, PIPECOL, PIPEHIGHCOL, PIPESEAMCOL, TEXTCOL,
};

/// Pixels between the pipe's highlight line and its colour line.
const PIPE_STRIDE: i32 = 3;
/// Seam marks sit this far above and below the gap.
const SEAM_OFFSET: i32 = 6;
const SCORE_Y: i32 = 4;

// ── Running game ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Renderer {
    /// Score currently on screen, `None` until the first frame of a run.
    drawn_score: Option<u16>,
}

impl Renderer {
    pub fn new() -> Renderer {
        Renderer::default()
    }

    /// Forget what is on screen; call whenever the screen is cleared.
    pub fn reset(&mut self) {
        self.drawn_score = None;
    }

    pub fn drawn_score(&self) -> Option<u16> {
        self.drawn_score
    }

    /// Draw one frame of the world, then commit the drawn positions.
    pub fn render<S: DrawSurface>(&mut self, out: &mut S, model: &mut EntityModel) {
        draw_pipe(out, model);
        model.grass.advance();
        draw_grass(out, model);
        draw_bird(out, model);
    }

    /// Replace the score readout, erasing the old digits first.
    pub fn draw_score<S: DrawSurface>(&mut self, out: &mut S, field: &Playfield, score: u16) {
        if self.drawn_score == Some(score) {
            return;
        }
        let x = field.half_width() as i32;
        if let Some(old) = self.drawn_score {
            out.set_text_color(BCKGRDCOL);
            out.set_cursor(x, SCORE_Y);
            out.print_fmt(format_args!("{}", old));
        }
        out.set_text_color(TEXTCOL);
        out.set_cursor(x, SCORE_Y);
        out.print_fmt(format_args!("{}", score));
        self.drawn_score = Some(score);
    }
}

fn draw_pipe<S: DrawSurface>(out: &mut S, model: &mut EntityModel) {
    let pipe = &mut model.pipe;
    if pipe.x == pipe.old_x {
        return;
    }

    let field = &model.field;
    let x = pipe.x as i32;
    let gap_top = pipe.gap_y as i32;
    let gap_bottom = gap_top + GAPHEIGHT as i32;
    let game_h = field.game_height() as i32;

    if pipe.x >= 0 && pipe.x < field.width {
        // Colour and highlight are drawn a few pixels apart; each step the new
        // pair lands on top of the previous one, which reads as motion.
        for (col, color) in [(x + PIPE_STRIDE, PIPECOL), (x, PIPEHIGHCOL)] {
            out.line_v(col, 0, gap_top, color);
            out.line_v(col, gap_bottom + 1, game_h - (gap_bottom + 1), color);
        }
        out.pixel(x, gap_top, PIPESEAMCOL);
        out.pixel(x, gap_bottom, PIPESEAMCOL);
        for col in [x, x + PIPE_STRIDE] {
            out.pixel(col, gap_top - SEAM_OFFSET, PIPESEAMCOL);
            out.pixel(col, gap_bottom + SEAM_OFFSET, PIPESEAMCOL);
        }
    }

    // Erase the column the pipe just left.
    if pipe.x < field.width - PIPEW {
        out.line_v(x + PIPEW as i32, 0, game_h, BCKGRDCOL);
    }
    pipe.old_x = pipe.x;
}

fn draw_grass<S: DrawSurface>(out: &mut S, model: &EntityModel) {
    let grass = &model.grass;
    let width = model.field.width;
    out.set_window(0, grass.y as i32, width as u16, GRASSH as u16);
    for row in 0..GRASSH {
        for col in 0..width {
            out.push_pixel(grass_pixel(grass.x, col, row));
        }
    }
}

fn draw_bird<S: DrawSurface>(out: &mut S, model: &mut EntityModel) {
    let bird = &mut model.bird;
    // The panel addresses by column, so each column is erased at the old y and
    // redrawn at the new one before moving on.
    for col in (0..BIRDW).rev() {
        let px = (bird.x + col + BIRDW) as i32;
        for row in (0..BIRDH).rev() {
            out.pixel(px, (bird.old_y + row) as i32, BCKGRDCOL);
        }
        for row in (0..BIRDH).rev() {
            out.pixel(px, (bird.y + row) as i32, bird_pixel(col, row));
        }
    }
    bird.old_y = bird.y;
}

// ── Static screens ────────────────────────────────────────────────────────────

/// Background plus the floor. The game never draws over the floor again.
pub fn draw_playfield<S: DrawSurface>(out: &mut S, field: &Playfield) {
    let w = field.width as i32;
    let game_h = field.game_height() as i32;

    out.clear(BCKGRDCOL);
    out.line_h(0, game_h, w, Color::BLACK);
    out.line_h(0, game_h + GRASSH as i32 + 1, w, Color::BLACK);
    // mud
    out.fill_rect(
        0,
        game_h + GRASSH as i32 + 2,
        w,
        (FLOORH - GRASSH) as i32,
        FLOORCOL,
    );
}

pub fn draw_title<S: DrawSurface>(out: &mut S, field: &Playfield) {
    let cx = field.half_width() as i32;
    let cy = field.half_height() as i32;
    let w = field.width as i32;

    out.clear(Color::BLACK);
    out.line_h(10, cy - 20, w - 20, Color::WHITE);
    out.line_h(10, cy + 20, w - 20, Color::WHITE);
    out.set_text_color(Color::WHITE);
    // half width - chars * 8px glyphs / 2
    out.set_cursor(cx - 3 * 8, cy - 8);
    out.print("FLAPPY");
    out.set_cursor(cx - 3 * 8, cy + 8);
    out.print("-BIRD-");
    out.set_cursor(cx - 12 * 3 - 1, cy + 34);
    out.print("press button");
}

pub fn draw_game_over<S: DrawSurface>(out: &mut S, field: &Playfield, score: u16) {
    let cx = field.half_width() as i32;
    let cy = field.half_height() as i32;

    out.clear(Color::BLACK);
    out.set_text_color(Color::WHITE);
    out.set_cursor(cx - 4 * 8, cy - 4);
    out.print("GAME OVER");
    out.set_cursor(10, cy - 14);
    out.print_fmt(format_args!("score: {}", score));
    out.set_cursor(cx - 5 * 8, cy + 12);
    out.print("press button");
}
