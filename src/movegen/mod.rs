//! Legal move generation.
//!
//! ## Draft phase
//!
//! One `DraftWonder` per wonder in the current sub-round pool.
//!
//! ## Game phase
//!
//! For every selectable slot, in position order:
//! - `ConstructCard` when the active player can afford it, once per
//!   available progress token if the card completes a science pair
//! - `DiscardCard`, always
//!
//! Then, while the wonder limit has not been reached, one `ConstructWonder`
//! per affordable wonder in hand, per selectable slot (the card to tuck),
//! per choice its special effect offers.
//!
//! Only selectable slots are ever named, so hidden cards never appear in a
//! move.

use smallvec::SmallVec;

use crate::board::Slot;
use crate::cards::{Card, Catalog, TokenId, Wonder, WonderSpecial};
use crate::core::{GameState, Move, PlayerId, RulesConfig, WonderChoice};
use crate::cost::{cost_breakdown, Pricing};
use crate::phase::Phase;

/// Every move the active player may make in `phase`.
///
/// Empty outside the draft and game phases.
#[must_use]
pub fn enumerate_legal_moves(
    state: &GameState,
    phase: &Phase,
    catalog: &Catalog,
    config: &RulesConfig,
) -> Vec<Move> {
    match phase {
        Phase::Draft => draft_moves(state),
        Phase::Game => game_moves(state, catalog, config),
        Phase::Start | Phase::TurnEnd | Phase::GameEnd(_) => Vec::new(),
    }
}

fn draft_moves(state: &GameState) -> Vec<Move> {
    state
        .shared
        .draft
        .current_pool()
        .iter()
        .map(|&wonder| Move::DraftWonder { wonder })
        .collect()
}

fn game_moves(state: &GameState, catalog: &Catalog, config: &RulesConfig) -> Vec<Move> {
    let player = state.shared.active;
    let me = &state.players[player];
    let them = &state.players[player.opponent()];
    let pricing = Pricing::from(config);
    let board = state.board();

    let positions: SmallVec<[usize; 8]> = board.selectable_positions().collect();
    let mut moves = Vec::with_capacity(positions.len() * 2);

    for &position in &positions {
        let Some(card) = board.slot(position).and_then(Slot::occupant) else {
            continue;
        };
        let card = catalog.card(card);
        let price = cost_breakdown(me, them, card, pricing).total();

        if price <= me.coins {
            for token in token_options(state, player, card) {
                moves.push(Move::ConstructCard {
                    position,
                    cost: price,
                    token,
                });
            }
        }
        moves.push(Move::DiscardCard { position });
    }

    if state.wonders_built() < config.wonder_limit {
        for &wonder in &me.wonders_in_hand {
            let wonder = catalog.wonder(wonder);
            let price = cost_breakdown(me, them, wonder, pricing).total();
            if price > me.coins {
                continue;
            }

            let choices = wonder_choices(state, player, wonder, catalog, config);
            for &position in &positions {
                for &choice in &choices {
                    moves.push(Move::ConstructWonder {
                        wonder: wonder.id,
                        position,
                        cost: price,
                        choice,
                    });
                }
            }
        }
    }

    moves
}

/// Token picks for constructing `card`: one per available token when the
/// card's symbol would be the player's second, else just `None`.
fn token_options(
    state: &GameState,
    player: PlayerId,
    card: &Card,
) -> SmallVec<[Option<TokenId>; 5]> {
    let completes_pair = card
        .passive
        .science
        .is_some_and(|symbol| state.players[player].science.get(symbol) == 1);

    if completes_pair && !state.shared.available_tokens.is_empty() {
        state.shared.available_tokens.iter().copied().map(Some).collect()
    } else {
        smallvec::smallvec![None]
    }
}

/// Choices a wonder's special effect offers; `[None]` when there is
/// nothing to choose.
fn wonder_choices(
    state: &GameState,
    player: PlayerId,
    wonder: &Wonder,
    catalog: &Catalog,
    config: &RulesConfig,
) -> Vec<WonderChoice> {
    let choices: Vec<WonderChoice> = match wonder.special {
        None => Vec::new(),
        Some(special @ (WonderSpecial::DestroyBrown | WonderSpecial::DestroyGrey)) => {
            let Some(category) = special.destroys() else {
                return vec![WonderChoice::None];
            };
            state.players[player.opponent()]
                .cards_of(category, |c| catalog.card(c).category)
                .map(WonderChoice::Destroy)
                .collect()
        }
        Some(WonderSpecial::TokenFromBox) => state
            .shared
            .unavailable_tokens
            .iter()
            .take(config.box_offer)
            .map(|&t| WonderChoice::Token(t))
            .collect(),
        Some(WonderSpecial::ReviveDiscard) => state
            .shared
            .discard
            .iter()
            .map(|&c| WonderChoice::Revive(c))
            .collect(),
    };

    if choices.is_empty() {
        vec![WonderChoice::None]
    } else {
        choices
    }
}
