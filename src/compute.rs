/// Game logic: run setup, physics steps, collision and scoring.
///
/// Functions mutate the `EntityModel` in place; the only side channel is the
/// injected `RandomSource` (for gap placement) and `InputSource`.

use crate::config::{
    Playfield, BIRDH, BIRDH2, BIRDW, BIRDW2, GAPHEIGHT, GRAVITY, JUMP_FORCE, PIPEW, SPEED,
};
use crate::entities::{Bird, EntityModel, GameSession, Grass, Pipe};
use crate::hal::{InputSource, RandomSource};

/// Result of a collision check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The bird hit the ground or a pipe; the run is over.
    Terminal,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh model for a new run. Seeds `rng` from `now` so every run gets a
/// different pipe sequence.
pub fn init_model(field: Playfield, rng: &mut impl RandomSource, now: u32) -> EntityModel {
    rng.seed(now);
    EntityModel {
        field,
        bird: Bird::spawn(&field),
        pipe: Pipe {
            x: field.width,
            old_x: field.width,
            gap_y: draw_gap(&field, rng),
        },
        grass: Grass {
            x: field.width,
            y: field.game_height() + 1,
        },
        session: GameSession::start(now),
    }
}

fn draw_gap(field: &Playfield, rng: &mut impl RandomSource) -> i16 {
    let (min, max) = field.gap_range();
    rng.rand_range(min, max) as i16
}

// ── Simulation step ──────────────────────────────────────────────────────────

/// Advance physics by one fixed step. `delta` is the wall-clock time since the
/// previous step, in seconds; it scales gravity only. The pipe always moves
/// `SPEED` pixels per step.
pub fn step(
    model: &mut EntityModel,
    input: &impl InputSource,
    rng: &mut impl RandomSource,
    delta: f32,
) {
    let bird = &mut model.bird;

    if input.is_pressed() {
        // Too close to the top: stop instead of jumping off-screen.
        if f32::from(bird.y) > f32::from(BIRDH2) * 0.5 {
            bird.vel_y = -JUMP_FORCE;
        } else {
            bird.vel_y = 0.0;
        }
    }

    bird.vel_y += delta * GRAVITY;
    bird.y = (f32::from(bird.y) + bird.vel_y) as i16;

    let pipe = &mut model.pipe;
    pipe.x -= SPEED;
    if pipe.x < -PIPEW {
        pipe.x = model.field.width;
        pipe.gap_y = draw_gap(&model.field, rng);
        log::debug!("pipe respawned, gap at {}", pipe.gap_y);
    }
}

// ── Collision & score ────────────────────────────────────────────────────────

/// `true` while the bird's columns overlap the pipe's.
pub fn overlaps_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    bird.x + BIRDW >= pipe.x - BIRDW2 && bird.x <= pipe.x + PIPEW - BIRDW
}

/// Ground and pipe checks, then scoring. The overlap test runs first so a
/// pipe is only scored after the bird has been through it without touching.
pub fn evaluate(model: &mut EntityModel) -> Outcome {
    let bird = &model.bird;
    let pipe = &model.pipe;

    if bird.y >= model.field.game_height() - BIRDH {
        return Outcome::Terminal;
    }

    if overlaps_pipe(bird, pipe) {
        if bird.y < pipe.gap_y || bird.y + BIRDH > pipe.gap_y + GAPHEIGHT {
            return Outcome::Terminal;
        }
        model.session.passed_pipe = true;
    } else if bird.x > pipe.x + PIPEW - BIRDW && model.session.passed_pipe {
        model.session.passed_pipe = false;
        model.session.score = model.session.score.saturating_add(1);
        log::debug!("pipe cleared, score {}", model.session.score);
    }

    Outcome::Continue
}
