//! The `RulesEngine` trait and game results.
//!
//! `Game` is the one implementation; the trait is the surface drivers
//! (tests, benchmarks, a UI loop, an AI) program against:
//! - What moves are legal right now
//! - Submitting a move
//! - Whether and how the game ended

use serde::{Deserialize, Serialize};

use crate::core::{Move, MoveError, PlayerId};
use crate::game::MoveOutcome;
use crate::phase::Phase;

/// How a game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Victory {
    /// The military track reached the supremacy distance.
    Military,
    /// A player collected enough distinct science symbols.
    Science,
    /// Higher score after the last age.
    Civilian,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Winner { player: PlayerId, victory: Victory },
    /// Equal score and equal civilian (blue) points.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner { player: p, .. } if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner { player, .. } => Some(*player),
            GameResult::Draw => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner { player, victory } => write!(f, "{player} wins ({victory:?})"),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves` may cache; it takes `&mut self` for that reason
/// - `make_move` must leave the state untouched when it returns `Err`
/// - `result` returns `None` while the game continues
pub trait RulesEngine {
    fn phase(&self) -> &Phase;

    /// The player expected to move next.
    fn active_player(&self) -> PlayerId;

    /// Every move the active player may submit now.
    fn legal_moves(&mut self) -> &[Move];

    /// Validate and commit a move.
    fn make_move(&mut self, mv: &Move) -> Result<MoveOutcome, MoveError>;

    // === Convenience Methods ===

    /// The final result, once the game is over.
    fn result(&self) -> Option<GameResult> {
        match self.phase() {
            Phase::GameEnd(result) => Some(*result),
            _ => None,
        }
    }

    /// Drive the game to its end, letting `choose` pick an index into the
    /// legal moves each time.
    ///
    /// `choose` receiving an empty slice means the engine is stuck; the
    /// resulting out-of-range pick is reported as `MoveError::GameOver`.
    fn play_out(
        &mut self,
        mut choose: impl FnMut(PlayerId, &[Move]) -> usize,
    ) -> Result<GameResult, MoveError>
    where
        Self: Sized,
    {
        loop {
            if let Some(result) = self.result() {
                return Ok(result);
            }
            let player = self.active_player();
            let moves = self.legal_moves();
            let mv = *moves.get(choose(player, moves)).ok_or(MoveError::GameOver)?;
            self.make_move(&mv)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner {
            player: PlayerId::new(1),
            victory: Victory::Science,
        };
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
        assert_eq!(result.winner(), Some(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));
        assert_eq!(draw.winner(), None);
    }

    #[test]
    fn test_game_result_display() {
        let result = GameResult::Winner {
            player: PlayerId::new(0),
            victory: Victory::Military,
        };
        assert_eq!(result.to_string(), "Player 0 wins (Military)");
    }
}
