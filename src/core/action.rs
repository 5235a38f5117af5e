//! Move representation.
//!
//! A `Move` is a complete, self-describing player decision. Construct moves
//! carry the coin cost the move generator computed for them, so a client can
//! show prices without re-running the cost engine, and the engine can check
//! a submitted move by plain equality against its legal set.
//!
//! Positions always refer to slots of the current age's board.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, TokenId, WonderId};

use super::player::PlayerId;

/// The extra decision attached to a wonder with a special effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WonderChoice {
    /// No special effect, or nothing to choose from.
    #[default]
    None,
    /// Remove this card from the opponent's city to the discard pile.
    Destroy(CardId),
    /// Take this token from the box.
    Token(TokenId),
    /// Construct this discarded card for free.
    Revive(CardId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Take a wonder from the current draft sub-round.
    DraftWonder { wonder: WonderId },

    /// Construct the card in `position`.
    ///
    /// `token` is the progress token taken when the card completes a
    /// science pair and tokens remain on the board.
    ConstructCard {
        position: usize,
        cost: u32,
        token: Option<TokenId>,
    },

    /// Discard the card in `position` for coins.
    DiscardCard { position: usize },

    /// Build `wonder`, tucking the card in `position` beneath it.
    ConstructWonder {
        wonder: WonderId,
        position: usize,
        cost: u32,
        choice: WonderChoice,
    },
}

impl Move {
    /// The board position this move takes a card from, if any.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match *self {
            Move::DraftWonder { .. } => None,
            Move::ConstructCard { position, .. }
            | Move::DiscardCard { position }
            | Move::ConstructWonder { position, .. } => Some(position),
        }
    }

    /// Coins the move costs up front.
    #[must_use]
    pub fn cost(&self) -> u32 {
        match *self {
            Move::ConstructCard { cost, .. } | Move::ConstructWonder { cost, .. } => cost,
            Move::DraftWonder { .. } | Move::DiscardCard { .. } => 0,
        }
    }
}

/// Position-based input: what to do with the card in a selected slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotAction {
    Construct { token: Option<TokenId> },
    Discard,
}

/// A committed move in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: PlayerId,
    pub mv: Move,
    /// Turn counter when the move was made (stays at 1 during the draft).
    pub turn: u32,
    pub age: u8,
}

impl MoveRecord {
    #[must_use]
    pub fn new(player: PlayerId, mv: Move, turn: u32, age: u8) -> Self {
        Self { player, mv, turn, age }
    }
}
