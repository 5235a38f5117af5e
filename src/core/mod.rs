//! Core engine types: players, RNG, configuration, errors, moves and state.
//!
//! Everything above this layer (board, cost engine, phase machine, game)
//! reads and writes these types; nothing here knows about turn order.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Move, MoveRecord, SlotAction, WonderChoice};
pub use config::{LootThreshold, MilitaryReward, PoolDraw, RulesConfig};
pub use error::{CatalogError, ConfigError, EncodingError, MoveError, SetupError};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use state::{BuiltWonder, DraftState, GameState, HeldToken, PlayerState, SharedState};
