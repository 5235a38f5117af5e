//! # duel-engine
//!
//! Rules engine for a two-player card-drafting game played over three ages.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven Catalog**: Cards, wonders, progress tokens and board
//!    layouts are records parsed once into an immutable `Catalog`, shared
//!    between games via `Arc`.
//!
//! 2. **Explicit Phases**: `Start → Draft → Game ⇄ TurnEnd → GameEnd` is an
//!    enum with a pure transition function. The game carries out the effects
//!    each transition asks for.
//!
//! 3. **Rejected Moves Change Nothing**: Every move is checked against the
//!    legal set before any state is touched.
//!
//! ## Architecture
//!
//! - **Cost Arbitration**: The price of a card or wonder depends on both
//!   cities. Joint resources are allocated greedily to the most expensive
//!   missing unit, which is a rule of the game rather than an optimisation.
//!
//! - **Board Propagation**: Slots uncover monotonically; a covered card is
//!   never selectable and never leaves the engine in a view.
//!
//! - **Deterministic Setup**: All randomness flows from one seeded
//!   `GameRng`, so the same seed always deals the same game.
//!
//! ## Modules
//!
//! - `core`: Players, moves, state, RNG, configuration, errors
//! - `cards`: Catalog, encodings, resources, effects
//! - `board`: Per-age layouts and slot visibility
//! - `cost`: Cost arbitration
//! - `phase`: Phase enum and transition function
//! - `movegen`: Legal move enumeration
//! - `rules`: `RulesEngine` trait and results
//! - `game`: `Game`, resolution, scoring, views

pub mod board;
pub mod cards;
pub mod core;
pub mod cost;
pub mod game;
pub mod movegen;
pub mod phase;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    CatalogError, ConfigError, GameRng, GameRngState, GameState, Move, MoveError, PlayerId,
    PlayerMap, PlayerState, RulesConfig, SetupError, SlotAction, WonderChoice,
};

pub use crate::cards::{Card, CardId, Catalog, Category, Token, TokenId, Wonder, WonderId};

pub use crate::board::{Board, Slot};
pub use crate::cost::{cost, cost_breakdown, CostBreakdown, Pricing};
pub use crate::game::{Game, GameBuilder, GameView, MoveOutcome, ScoreSheet};
pub use crate::phase::Phase;
pub use crate::rules::{GameResult, RulesEngine, Victory};
