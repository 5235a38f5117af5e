//! The phase enum and its pure transition function.

use serde::{Deserialize, Serialize};

use crate::core::MoveError;
use crate::rules::GameResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Set up, waiting for the draft to begin.
    #[default]
    Start,
    /// Players pick wonders.
    Draft,
    /// Players take cards from the board.
    Game,
    /// A move has been committed and its consequences are being resolved.
    TurnEnd,
    GameEnd(GameResult),
}

impl Phase {
    /// Phases in which players submit moves.
    #[must_use]
    pub fn accepts_moves(&self) -> bool {
        matches!(self, Phase::Draft | Phase::Game)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Start => write!(f, "start"),
            Phase::Draft => write!(f, "draft"),
            Phase::Game => write!(f, "game"),
            Phase::TurnEnd => write!(f, "turn end"),
            Phase::GameEnd(_) => write!(f, "game end"),
        }
    }
}

/// How turn-end resolution came out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Continue,
    GameOver(GameResult),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseEvent {
    BeginDraft,
    /// A wonder was drafted.
    DraftPicked,
    /// Every wonder has been drafted.
    BeginGame,
    /// A game-phase move was committed.
    MoveResolved,
    TurnResolved(TurnOutcome),
}

/// Work the owner of the machine must do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseEffect {
    /// Invalidate and lazily recompute the legal move set.
    ComputeLegalMoves,
    /// Run turn-end resolution and feed back `TurnResolved`.
    ResolveTurnEnd,
}

/// Apply `event` to `phase`.
///
/// Pure: no game state is consulted. Every pair not listed below is
/// rejected, with `MoveError::GameOver` once the game has ended and
/// `MoveError::WrongPhase` otherwise.
///
/// | From | Event | To | Effects |
/// | --- | --- | --- | --- |
/// | Start | BeginDraft | Draft | ComputeLegalMoves |
/// | Draft | DraftPicked | Draft | ComputeLegalMoves |
/// | Draft | BeginGame | Game | ComputeLegalMoves |
/// | Game | MoveResolved | TurnEnd | ResolveTurnEnd |
/// | TurnEnd | TurnResolved(Continue) | Game | ComputeLegalMoves |
/// | TurnEnd | TurnResolved(GameOver(r)) | GameEnd(r) | |
pub fn transition(phase: &Phase, event: &PhaseEvent) -> Result<(Phase, Vec<PhaseEffect>), MoveError> {
    use PhaseEffect::*;

    match (phase, event) {
        (Phase::Start, PhaseEvent::BeginDraft) => Ok((Phase::Draft, vec![ComputeLegalMoves])),
        (Phase::Draft, PhaseEvent::DraftPicked) => Ok((Phase::Draft, vec![ComputeLegalMoves])),
        (Phase::Draft, PhaseEvent::BeginGame) => Ok((Phase::Game, vec![ComputeLegalMoves])),
        (Phase::Game, PhaseEvent::MoveResolved) => Ok((Phase::TurnEnd, vec![ResolveTurnEnd])),
        (Phase::TurnEnd, PhaseEvent::TurnResolved(TurnOutcome::Continue)) => {
            Ok((Phase::Game, vec![ComputeLegalMoves]))
        }
        (Phase::TurnEnd, PhaseEvent::TurnResolved(TurnOutcome::GameOver(result))) => {
            Ok((Phase::GameEnd(*result), Vec::new()))
        }
        (Phase::GameEnd(_), _) => Err(MoveError::GameOver),
        (phase, _) => Err(MoveError::WrongPhase { phase: *phase }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::rules::Victory;

    #[test]
    fn test_happy_path() {
        let (draft, effects) = transition(&Phase::Start, &PhaseEvent::BeginDraft).unwrap();
        assert_eq!(draft, Phase::Draft);
        assert_eq!(effects, vec![PhaseEffect::ComputeLegalMoves]);

        let (game, _) = transition(&draft, &PhaseEvent::BeginGame).unwrap();
        assert_eq!(game, Phase::Game);

        let (turn_end, effects) = transition(&game, &PhaseEvent::MoveResolved).unwrap();
        assert_eq!(turn_end, Phase::TurnEnd);
        assert_eq!(effects, vec![PhaseEffect::ResolveTurnEnd]);

        let (back, _) = transition(&turn_end, &PhaseEvent::TurnResolved(TurnOutcome::Continue)).unwrap();
        assert_eq!(back, Phase::Game);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let result = GameResult::Winner {
            player: PlayerId::new(1),
            victory: Victory::Military,
        };
        let (end, effects) = transition(
            &Phase::TurnEnd,
            &PhaseEvent::TurnResolved(TurnOutcome::GameOver(result)),
        )
        .unwrap();

        assert_eq!(end, Phase::GameEnd(result));
        assert!(effects.is_empty());
        assert_eq!(
            transition(&end, &PhaseEvent::MoveResolved),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn test_wrong_phase_rejected() {
        assert_eq!(
            transition(&Phase::Start, &PhaseEvent::MoveResolved),
            Err(MoveError::WrongPhase { phase: Phase::Start })
        );
        assert_eq!(
            transition(&Phase::Game, &PhaseEvent::DraftPicked),
            Err(MoveError::WrongPhase { phase: Phase::Game })
        );
        assert!(transition(&Phase::Draft, &PhaseEvent::BeginDraft).is_err());
    }

    #[test]
    fn test_accepts_moves() {
        assert!(Phase::Draft.accepts_moves());
        assert!(Phase::Game.accepts_moves());
        assert!(!Phase::Start.accepts_moves());
        assert!(!Phase::TurnEnd.accepts_moves());
    }
}
