//! The `Game` type: owns the state and drives the phase machine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::cards::{Catalog, CardId};
use crate::core::{
    ConfigError, DraftState, GameRng, GameRngState, GameState, Move, MoveError, MoveRecord,
    PlayerId, PlayerMap, PlayerState, RulesConfig, SharedState, SlotAction,
};
use crate::cost::{cost_breakdown, Pricing};
use crate::movegen::enumerate_legal_moves;
use crate::phase::{transition, Phase, PhaseEffect, PhaseEvent, TurnOutcome};
use crate::rules::{GameResult, RulesEngine, Victory};

use super::resolve::Resolver;
use super::scoring::{civilian_result, score, ScoreSheet};

/// What a committed move led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Who made the move.
    pub player: PlayerId,
    pub mv: Move,
    /// Phase after turn-end resolution.
    pub phase: Phase,
    /// Who moves next.
    pub next_player: PlayerId,
    /// The move granted another turn.
    pub play_again: bool,
}

/// A two-player game in progress.
///
/// ## Lifecycle
///
/// 1. `Game::new` draws the wonders for the draft, lays out the progress
///    tokens and deals the boards of every age.
/// 2. `begin_draft_phase`, then one `make_move` per drafted wonder.
/// 3. `begin_game_phase`, then `make_move` until `result` is `Some`.
///
/// Every rejected call returns an error and leaves the game unchanged.
#[derive(Clone, Debug)]
pub struct Game {
    catalog: Arc<Catalog>,
    config: RulesConfig,
    rng: GameRng,
    phase: Phase,
    state: GameState,
    /// Cached legal moves, cleared on every phase entry.
    legal: Option<Vec<Move>>,
}

impl Game {
    /// Set up a game. Configuration the catalog cannot satisfy is reported
    /// here and no game is created.
    pub fn new(catalog: Arc<Catalog>, config: RulesConfig, seed: u64) -> Result<Self, ConfigError> {
        let draft_size = config.draft_size();
        if catalog.wonder_count() < draft_size {
            return Err(ConfigError::NotEnoughWonders {
                required: draft_size,
                available: catalog.wonder_count(),
            });
        }
        if catalog.token_count() < config.available_tokens {
            return Err(ConfigError::NotEnoughTokens {
                required: config.available_tokens,
                available: catalog.token_count(),
            });
        }

        let mut rng = GameRng::new(seed);
        let first_player = config
            .first_player
            .unwrap_or_else(|| PlayerId::new(rng.gen_range_usize(0..2) as u8));

        let wonders: Vec<_> = catalog.wonders().map(|w| w.id).collect();
        let drafted = rng
            .sample_indices(wonders.len(), draft_size)
            .into_iter()
            .map(|i| wonders[i])
            .collect();

        let mut tokens: Vec<_> = catalog.tokens().map(|t| t.id).collect();
        rng.shuffle(&mut tokens);
        let boxed = tokens.split_off(config.available_tokens);

        let boards = (1..=config.age_count())
            .map(|age| Board::initialize(&catalog, &config, age, &mut rng))
            .collect::<Result<Vec<_>, _>>()?;

        let mut shared = SharedState::new(
            first_player,
            DraftState::new(drafted, config.draft_round_size, first_player),
        );
        shared.available_tokens = tokens;
        shared.unavailable_tokens = boxed;

        let players = PlayerMap::new(|id| PlayerState::new(id, config.starting_coins));
        info!(seed, %first_player, "game set up");

        Ok(Self {
            catalog,
            config,
            rng,
            phase: Phase::Start,
            state: GameState {
                players,
                shared,
                boards,
            },
            legal: None,
        })
    }

    // === Phase Entry ===

    pub fn begin_draft_phase(&mut self) -> Result<(), MoveError> {
        self.fire(PhaseEvent::BeginDraft)?;
        if let Some(drafter) = self.state.shared.draft.drafter() {
            self.state.shared.active = drafter;
        }
        info!(first = %self.state.shared.active, "draft begins");
        Ok(())
    }

    /// Start taking cards. Only allowed once every wonder has been drafted.
    pub fn begin_game_phase(&mut self) -> Result<(), MoveError> {
        if self.phase == Phase::Draft && !self.state.shared.draft.is_complete() {
            return Err(MoveError::DraftIncomplete {
                remaining: self.state.shared.draft.remaining(),
            });
        }
        self.fire(PhaseEvent::BeginGame)?;
        self.state.shared.active = self.state.shared.first_player;
        info!(first = %self.state.shared.active, "age 1 begins");
        Ok(())
    }

    // === Moves ===

    /// Every move the active player may submit now.
    pub fn legal_moves(&mut self) -> &[Move] {
        let (state, phase, catalog, config) = (&self.state, &self.phase, &self.catalog, &self.config);
        self.legal
            .get_or_insert_with(|| enumerate_legal_moves(state, phase, catalog, config))
    }

    /// Validate and commit `mv`.
    pub fn make_move(&mut self, mv: &Move) -> Result<MoveOutcome, MoveError> {
        match self.phase {
            Phase::GameEnd(_) => return Err(MoveError::GameOver),
            phase if !phase.accepts_moves() => return Err(MoveError::WrongPhase { phase }),
            _ => {}
        }
        if !self.legal_moves().contains(mv) {
            return Err(self.diagnose(mv));
        }
        self.legal = None;

        let player = self.state.shared.active;
        let shared = &self.state.shared;
        let record = MoveRecord::new(player, *mv, shared.turn, shared.age);

        let play_again = Resolver {
            state: &mut self.state,
            catalog: &self.catalog,
            config: &self.config,
        }
        .apply(player, mv);
        self.state.shared.history.push_back(record);
        debug!(%player, ?mv, "move committed");

        if self.phase == Phase::Draft {
            self.fire(PhaseEvent::DraftPicked)?;
            if let Some(drafter) = self.state.shared.draft.drafter() {
                self.state.shared.active = drafter;
            }
        } else {
            self.state.shared.play_again = play_again;
            self.fire(PhaseEvent::MoveResolved)?;
        }

        Ok(MoveOutcome {
            player,
            mv: *mv,
            phase: self.phase,
            next_player: self.state.shared.active,
            play_again,
        })
    }

    /// Position-based input: act on the card at `position`.
    ///
    /// The price is computed here, and a construction completing a science
    /// pair must name its token.
    pub fn select_card(&mut self, position: usize, action: SlotAction) -> Result<MoveOutcome, MoveError> {
        let mv = match action {
            SlotAction::Discard => Move::DiscardCard { position },
            SlotAction::Construct { token } => Move::ConstructCard {
                position,
                cost: self.price_at(position).unwrap_or(0),
                token,
            },
        };
        self.make_move(&mv)
    }

    /// Price of the card at `position` for the active player.
    fn price_at(&self, position: usize) -> Option<u32> {
        let card = self.state.board().slot(position)?.occupant()?;
        let player = self.state.shared.active;
        let price = cost_breakdown(
            &self.state.players[player],
            &self.state.players[player.opponent()],
            self.catalog.card(card),
            Pricing::from(&self.config),
        );
        Some(price.total())
    }

    /// Explain why `mv` is not in the legal set.
    ///
    /// Coin shortfalls are judged against the real price of the move, never
    /// the price it was submitted with.
    fn diagnose(&self, mv: &Move) -> MoveError {
        let Some(position) = mv.position() else {
            return match self.phase {
                Phase::Draft => MoveError::NotLegal(*mv),
                phase => MoveError::WrongPhase { phase },
            };
        };
        if self.phase == Phase::Draft {
            return MoveError::WrongPhase { phase: self.phase };
        }

        let board = self.state.board();
        let Some(slot) = board.slot(position) else {
            return MoveError::PositionOutOfRange {
                position,
                slots: board.len(),
            };
        };
        if slot.is_empty() {
            return MoveError::EmptySlot { position };
        }
        if !slot.is_selectable() {
            return MoveError::SlotNotSelectable { position };
        }

        let available = self.state.players[self.state.shared.active].coins;
        match self.real_price(mv) {
            Some(required) if required > available => {
                MoveError::InsufficientCoins { required, available }
            }
            _ => MoveError::NotLegal(*mv),
        }
    }

    /// What `mv` actually costs the active player; `None` for moves that
    /// cost nothing.
    fn real_price(&self, mv: &Move) -> Option<u32> {
        match *mv {
            Move::ConstructCard { position, .. } => self.price_at(position),
            Move::ConstructWonder { wonder, .. } => {
                let player = self.state.shared.active;
                if !self.state.players[player].wonders_in_hand.contains(&wonder) {
                    return None;
                }
                let price = cost_breakdown(
                    &self.state.players[player],
                    &self.state.players[player.opponent()],
                    self.catalog.wonder(wonder),
                    Pricing::from(&self.config),
                );
                Some(price.total())
            }
            Move::DraftWonder { .. } | Move::DiscardCard { .. } => None,
        }
    }

    // === Phase Machine ===

    fn fire(&mut self, event: PhaseEvent) -> Result<(), MoveError> {
        let (next, effects) = transition(&self.phase, &event)?;
        if next != self.phase {
            debug!(from = %self.phase, to = %next, "phase change");
        }
        self.phase = next;

        for effect in effects {
            match effect {
                PhaseEffect::ComputeLegalMoves => self.legal = None,
                PhaseEffect::ResolveTurnEnd => {
                    let outcome = self.resolve_turn_end();
                    self.fire(PhaseEvent::TurnResolved(outcome))?;
                }
            }
        }
        Ok(())
    }

    fn resolve_turn_end(&mut self) -> TurnOutcome {
        self.state.board_mut().update_all_slots();

        if let Some(result) = self.supremacy() {
            return self.finish(result);
        }

        let play_again = std::mem::take(&mut self.state.shared.play_again);
        if self.state.board().is_age_exhausted() {
            if self.state.shared.age >= self.config.age_count() {
                let result = civilian_result(&self.state, &self.catalog, &self.config);
                return self.finish(result);
            }
            let shared = &mut self.state.shared;
            shared.age += 1;
            shared.active = match shared.military.signum() {
                -1 => PlayerId::new(1),
                1 => PlayerId::new(0),
                _ => shared.active,
            };
            info!(age = shared.age, first = %shared.active, "age begins");
        } else if !play_again {
            let shared = &mut self.state.shared;
            shared.active = shared.active.opponent();
        }

        self.state.shared.turn += 1;
        TurnOutcome::Continue
    }

    /// Military supremacy, then scientific supremacy of either player.
    fn supremacy(&self) -> Option<GameResult> {
        let track = self.state.shared.military;
        if track.unsigned_abs() >= self.config.military_supremacy {
            let player = PlayerId::new(u8::from(track > 0));
            return Some(GameResult::Winner {
                player,
                victory: Victory::Military,
            });
        }

        self.state
            .players
            .iter()
            .find(|(_, city)| city.science.distinct() >= self.config.science_supremacy)
            .map(|(player, _)| GameResult::Winner {
                player,
                victory: Victory::Science,
            })
    }

    fn finish(&mut self, result: GameResult) -> TurnOutcome {
        self.state.shared.game_ended = true;
        info!(%result, turn = self.state.shared.turn, "game over");
        TurnOutcome::GameOver(result)
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.state.shared.active
    }

    /// Negative favours player 0.
    #[must_use]
    pub fn military_track(&self) -> i32 {
        self.state.shared.military
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.state.players[player]
    }

    #[must_use]
    pub fn age(&self) -> u8 {
        self.state.shared.age
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.shared.turn
    }

    #[must_use]
    pub fn discard_pile(&self) -> impl Iterator<Item = CardId> + '_ {
        self.state.shared.discard.iter().copied()
    }

    #[must_use]
    pub fn history(&self) -> &im::Vector<MoveRecord> {
        &self.state.shared.history
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> ScoreSheet {
        score(&self.state, &self.catalog, &self.config, player)
    }

    /// The full state, face-down cards and boxed tokens included.
    ///
    /// This is the omniscient view for tests, replays and tooling. Anything
    /// shown to a player should go through `Game::view`, which masks hidden
    /// slots.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the catalog, for starting further games.
    #[must_use]
    pub fn catalog_handle(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// The RNG position after setup.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        self.legal = None;
        &mut self.state
    }
}

impl RulesEngine for Game {
    fn phase(&self) -> &Phase {
        Game::phase(self)
    }

    fn active_player(&self) -> PlayerId {
        Game::active_player(self)
    }

    fn legal_moves(&mut self) -> &[Move] {
        Game::legal_moves(self)
    }

    fn make_move(&mut self, mv: &Move) -> Result<MoveOutcome, MoveError> {
        Game::make_move(self, mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PoolDraw;
    use crate::cards::AgePool;
    use crate::game::GameBuilder;

    #[test]
    fn test_setup_lays_out_tokens_and_boards() {
        let game = GameBuilder::new().seed(9).build().unwrap();
        let shared = &game.state().shared;

        assert_eq!(shared.available_tokens.len(), 5);
        assert_eq!(shared.unavailable_tokens.len(), 5);
        assert_eq!(shared.draft.remaining(), 8);
        assert_eq!(game.state().boards.len(), 3);
        assert!(game.state().boards.iter().all(|b| b.remaining() == 20));
        assert_eq!(*game.phase(), Phase::Start);
    }

    #[test]
    fn test_bad_draw_counts_abort_setup() {
        let config = RulesConfig::default().with_age_draws(2, vec![PoolDraw::new(AgePool::Second, 19)]);
        let err = GameBuilder::new().config(config).build().unwrap_err();
        assert!(matches!(
            err,
            crate::core::SetupError::Config(ConfigError::LayoutMismatch { age: 2, .. })
        ));
    }

    #[test]
    fn test_game_phase_requires_full_draft() {
        let mut game = GameBuilder::new().seed(2).build().unwrap();
        game.begin_draft_phase().unwrap();
        assert_eq!(
            game.begin_game_phase(),
            Err(MoveError::DraftIncomplete { remaining: 8 })
        );
    }

    #[test]
    fn test_draft_deals_four_each() {
        let game = GameBuilder::new().seed(2).build_drafted().unwrap();
        for player in PlayerId::both() {
            assert_eq!(game.player(player).wonders_in_hand.len(), 4);
        }
        assert_eq!(*game.phase(), Phase::Game);
        assert_eq!(game.active_player(), game.state().shared.first_player);
    }

    #[test]
    fn test_moves_rejected_outside_move_phases() {
        let mut game = GameBuilder::new().seed(2).build().unwrap();
        let err = game.make_move(&Move::DiscardCard { position: 0 }).unwrap_err();
        assert_eq!(err, MoveError::WrongPhase { phase: Phase::Start });
    }

    #[test]
    fn test_diagnose_covered_and_missing_slots() {
        let mut game = GameBuilder::new().seed(2).build_drafted().unwrap();

        assert_eq!(
            game.make_move(&Move::DiscardCard { position: 19 }),
            Err(MoveError::SlotNotSelectable { position: 19 })
        );
        assert_eq!(
            game.make_move(&Move::DiscardCard { position: 40 }),
            Err(MoveError::PositionOutOfRange { position: 40, slots: 20 })
        );
    }

    #[test]
    fn test_shortfall_reports_real_price() {
        let mut game = GameBuilder::new().seed(31).build_drafted().unwrap();
        let active = game.active_player();
        let (position, price) = game
            .state()
            .board()
            .selectable_positions()
            .filter_map(|p| game.price_at(p).map(|price| (p, price)))
            .find(|&(_, price)| price > 0)
            .unwrap();
        game.state_mut().players[active].coins = price - 1;

        let mv = Move::ConstructCard {
            position,
            cost: 0,
            token: None,
        };
        assert_eq!(
            game.make_move(&mv),
            Err(MoveError::InsufficientCoins {
                required: price,
                available: price - 1,
            })
        );
    }

    #[test]
    fn test_wrong_submitted_cost_is_not_a_shortfall() {
        let mut game = GameBuilder::new().seed(31).build_drafted().unwrap();
        let coins = game.player(game.active_player()).coins;
        let Some(Move::ConstructCard { position, cost, token }) = game
            .legal_moves()
            .iter()
            .copied()
            .find(|m| matches!(m, Move::ConstructCard { .. }))
        else {
            panic!("no affordable card on the opening board");
        };

        let stale = Move::ConstructCard {
            position,
            cost: coins + 1 + cost,
            token,
        };
        assert_eq!(game.make_move(&stale), Err(MoveError::NotLegal(stale)));
    }

    #[test]
    fn test_card_moves_during_draft_are_wrong_phase() {
        let mut game = GameBuilder::new().seed(31).build().unwrap();
        game.begin_draft_phase().unwrap();

        assert_eq!(
            game.make_move(&Move::DiscardCard { position: 0 }),
            Err(MoveError::WrongPhase { phase: Phase::Draft })
        );
        let wonder = game.state().shared.draft.current_pool()[0];
        game.make_move(&Move::DraftWonder { wonder }).unwrap();
        assert_eq!(
            game.make_move(&Move::DraftWonder { wonder }),
            Err(MoveError::NotLegal(Move::DraftWonder { wonder }))
        );
    }

    #[test]
    fn test_discard_switches_player_and_counts_turn() {
        let mut game = GameBuilder::new().seed(2).build_drafted().unwrap();
        let first = game.active_player();

        let outcome = game.select_card(0, SlotAction::Discard).unwrap();
        assert_eq!(outcome.player, first);
        assert_eq!(outcome.next_player, first.opponent());
        assert_eq!(game.turn(), 2);
        assert_eq!(game.player(first).coins, 9);
        assert_eq!(game.discard_pile().count(), 1);
    }

    #[test]
    fn test_six_science_symbols_end_game() {
        use crate::cards::ScienceSymbol;

        let mut game = GameBuilder::new().seed(2).build_drafted().unwrap();
        let other = game.active_player().opponent();
        let science = &mut game.state_mut().players[other].science;
        for symbol in &ScienceSymbol::ALL[1..] {
            science.add(*symbol);
        }
        game.select_card(0, SlotAction::Discard).unwrap();

        assert_eq!(
            game.result(),
            Some(GameResult::Winner {
                player: other,
                victory: Victory::Science,
            })
        );
    }

    #[test]
    fn test_military_supremacy_ends_game() {
        let mut game = GameBuilder::new().seed(2).build_drafted().unwrap();
        game.state_mut().shared.military = 9;
        game.select_card(0, SlotAction::Discard).unwrap();

        assert_eq!(
            game.result(),
            Some(GameResult::Winner {
                player: PlayerId::new(1),
                victory: Victory::Military,
            })
        );
        assert!(game.legal_moves().is_empty());
        assert_eq!(
            game.select_card(1, SlotAction::Discard),
            Err(MoveError::GameOver)
        );
    }
}
