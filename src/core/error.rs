//! Error types.
//!
//! Three families, matching the three places things can go wrong:
//!
//! - `CatalogError`: the card data itself is malformed.
//! - `ConfigError`: the rules configuration cannot be satisfied by the
//!   catalog (layout sizes, pool sizes). Aborts game construction.
//! - `MoveError`: a submitted move is rejected. The game state is untouched.

use crate::cards::AgePool;
use crate::core::Move;
use crate::phase::Phase;

/// A single encoded field could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("unknown symbol '{symbol}' in {field} \"{encoding}\"")]
    UnknownSymbol {
        field: &'static str,
        symbol: char,
        encoding: String,
    },

    #[error("unrecognised {field} term \"{term}\"")]
    UnknownTerm { field: &'static str, term: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("record \"{name}\": {source}")]
    Encoding {
        name: String,
        #[source]
        source: EncodingError,
    },

    #[error("card \"{card}\" names unknown prerequisite \"{prerequisite}\"")]
    UnknownPrerequisite { card: String, prerequisite: String },

    #[error("duplicate {kind} name \"{name}\"")]
    DuplicateName { kind: &'static str, name: String },

    #[error("age {age} slot {position}: {reason}")]
    InvalidSlot {
        age: u8,
        position: usize,
        reason: String,
    },

    #[error("{count} {kind} records exceed the limit of {max}")]
    TooManyRecords {
        kind: &'static str,
        count: usize,
        max: usize,
    },

    #[error("malformed catalog data: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn encoding(name: &str, source: EncodingError) -> Self {
        Self::Encoding {
            name: name.to_string(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("age {0} is not configured")]
    UnknownAge(u8),

    #[error("age {age}: drew {drawn} cards for {slots} layout slots")]
    LayoutMismatch { age: u8, drawn: usize, slots: usize },

    #[error("age {age}: pool {pool:?} holds {available} cards, {required} required")]
    PoolTooSmall {
        age: u8,
        pool: AgePool,
        available: usize,
        required: usize,
    },

    #[error("draft needs {required} wonders, catalog has {available}")]
    NotEnoughWonders { required: usize, available: usize },

    #[error("setup needs {required} progress tokens, catalog has {available}")]
    NotEnoughTokens { required: usize, available: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no moves are accepted during the {phase} phase")]
    WrongPhase { phase: Phase },

    #[error("the game is over")]
    GameOver,

    #[error("the draft still has {remaining} wonders to pick")]
    DraftIncomplete { remaining: usize },

    #[error("position {position} is outside the {slots}-slot board")]
    PositionOutOfRange { position: usize, slots: usize },

    #[error("slot {position} is empty")]
    EmptySlot { position: usize },

    #[error("slot {position} is covered")]
    SlotNotSelectable { position: usize },

    #[error("costs {required} coins, only {available} held")]
    InsufficientCoins { required: u32, available: u32 },

    #[error("{0:?} is not a legal move")]
    NotLegal(Move),
}

/// Anything that can stop a game from being set up.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Move(#[from] MoveError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_names_record() {
        let err = CatalogError::encoding(
            "Quarry",
            EncodingError::UnknownSymbol {
                field: "cost",
                symbol: 'X',
                encoding: "SX".into(),
            },
        );

        let msg = err.to_string();
        assert!(msg.contains("Quarry"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_move_error_display() {
        let err = MoveError::InsufficientCoins {
            required: 9,
            available: 4,
        };
        assert_eq!(err.to_string(), "costs 9 coins, only 4 held");
    }
}
