/// Top-level game flow: title, wait, play, game over.
///
/// `GameStateMachine::tick` is polled from the host's outer loop and always
/// returns promptly; the only blocking call is the short pause when a run
/// ends.

use crate::compute::{self, Outcome};
use crate::config::{Config, Playfield};
use crate::display::{self, Renderer};
use crate::entities::{EntityModel, GameState};
use crate::hal::{Clock, DrawSurface, InputSource, RandomSource};
use crate::scheduler::{Scheduler, Slot};

/// The board peripherals the game runs on.
#[derive(Debug)]
pub struct Board<S, I, C, R> {
    pub display: S,
    pub button: I,
    pub clock: C,
    pub rng: R,
}

impl<S, I, C, R> Board<S, I, C, R> {
    pub fn new(display: S, button: I, clock: C, rng: R) -> Self {
        Board {
            display,
            button,
            clock,
            rng,
        }
    }
}

#[derive(Debug)]
pub struct GameStateMachine {
    state: GameState,
    field: Playfield,
    scheduler: Scheduler,
    renderer: Renderer,
    game_over_pause_ms: u32,
    /// Present from the first run onward; kept after a run ends so the final
    /// score stays readable.
    model: Option<EntityModel>,
}

impl GameStateMachine {
    pub fn new(config: &Config) -> Self {
        GameStateMachine {
            state: GameState::Starting,
            field: config.playfield(),
            scheduler: Scheduler::from_config(config),
            renderer: Renderer::new(),
            game_over_pause_ms: config.game_over_pause_ms,
            model: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn model(&self) -> Option<&EntityModel> {
        self.model.as_ref()
    }

    pub fn score(&self) -> u16 {
        self.model.as_ref().map_or(0, |m| m.session.score)
    }

    /// Run one poll of the current state and return the state after it.
    pub fn tick<S, I, C, R>(&mut self, board: &mut Board<S, I, C, R>) -> GameState
    where
        S: DrawSurface,
        I: InputSource,
        C: Clock,
        R: RandomSource,
    {
        let next = match self.state {
            GameState::Starting => {
                display::draw_title(&mut board.display, &self.field);
                GameState::Idle
            }
            GameState::Idle => {
                if board.button.is_pressed() {
                    self.start_run(board);
                    GameState::Running
                } else {
                    GameState::Idle
                }
            }
            GameState::Running => self.run(board),
            GameState::Ended => {
                board.clock.delay_millis(self.game_over_pause_ms);
                display::draw_game_over(&mut board.display, &self.field, self.score());
                GameState::Idle
            }
        };

        if next != self.state {
            log::info!("{:?} -> {:?}", self.state, next);
            if next == GameState::Ended {
                log::info!("game over, score {}", self.score());
            }
        }
        self.state = next;
        next
    }

    fn start_run<S, I, C, R>(&mut self, board: &mut Board<S, I, C, R>)
    where
        S: DrawSurface,
        C: Clock,
        R: RandomSource,
    {
        let now = board.clock.now_millis();
        display::draw_playfield(&mut board.display, &self.field);
        self.renderer.reset();
        let model = compute::init_model(self.field, &mut board.rng, now);
        log::info!("new run, first gap at {}", model.pipe.gap_y);
        self.model = Some(model);
    }

    fn run<S, I, C, R>(&mut self, board: &mut Board<S, I, C, R>) -> GameState
    where
        S: DrawSurface,
        I: InputSource,
        C: Clock,
        R: RandomSource,
    {
        let Some(model) = self.model.as_mut() else {
            return GameState::Idle;
        };

        let now = board.clock.now_millis();
        match self.scheduler.tick(&mut model.session, now) {
            Slot::Simulate { delta } => {
                compute::step(model, &board.button, &mut board.rng, delta);
                GameState::Running
            }
            Slot::Render => {
                self.renderer.render(&mut board.display, model);
                match compute::evaluate(model) {
                    Outcome::Terminal => GameState::Ended,
                    Outcome::Continue => {
                        let score = model.session.score;
                        self.renderer.draw_score(&mut board.display, &self.field, score);
                        GameState::Running
                    }
                }
            }
        }
    }
}
