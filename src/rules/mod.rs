//! Rules engine trait and game results.
//!
//! Drivers talk to a game through `RulesEngine`; they never need to know
//! about boards, pools or the phase machine internals.

pub mod engine;

pub use engine::{GameResult, RulesEngine, Victory};
