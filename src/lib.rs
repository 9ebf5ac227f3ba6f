//! Flappy Bird for a small SPI TFT panel.
//!
//! The core (`scheduler`, `compute`, `display`, `game`) only talks to the
//! hardware through the traits in `hal`, so it runs unchanged against the
//! in-memory `framebuffer` used by the terminal host and the tests.

pub mod compute;
pub mod config;
pub mod console;
pub mod display;
pub mod entities;
pub mod framebuffer;
pub mod game;
pub mod hal;
pub mod rng;
pub mod scheduler;
pub mod terminal;

pub use config::{Config, Panel, Playfield};
pub use game::{Board, GameStateMachine};
