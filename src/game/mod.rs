//! The game: setup, move resolution, turn-end resolution and scoring.
//!
//! ## Key Types
//!
//! - `Game`: owns the state for one game and drives the phase machine
//! - `GameBuilder`: assembles catalog, rules and seed
//! - `MoveOutcome`: what a committed move led to
//! - `GameView`: serialisable per-player snapshot
//! - `ScoreSheet`: points by source

mod builder;
mod duel;
mod resolve;
pub mod scoring;
mod view;

pub use builder::GameBuilder;
pub use duel::{Game, MoveOutcome};
pub use scoring::{civilian_result, score, ScoreSheet};
pub use view::{GameView, PlayerView, SlotView};
