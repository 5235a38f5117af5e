//! Game state: per-player cities and shared table state.
//!
//! ## PlayerState
//!
//! One player's city:
//! - Coins, constructed cards (in construction order), wonders in hand and
//!   built, progress tokens
//! - Three resource pools, kept separately because the cost engine treats
//!   them differently (base, wonder, market) plus joint grants
//! - Science symbol counts and shields
//!
//! Pools are maintained incrementally as cards come and go, so pricing never
//! has to walk the tableau.
//!
//! ## SharedState
//!
//! Everything not owned by one player: age, active player, the military
//! track, the discard pile, progress token pools, the draft, the turn
//! counter and the move history.
//!
//! ## GameState
//!
//! Both of the above plus the boards of all ages.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::cards::{
    Card, CardId, Category, Constructable, GrantPool, JointCounts, Kind, Passive, ResourceCounts,
    ScienceCounts, ScienceSymbol, Token, TokenEffect, TokenId, Wonder, WonderId,
};

use super::action::MoveRecord;
use super::player::{PlayerId, PlayerMap};

/// A wonder in a city, with the card tucked beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltWonder {
    pub wonder: WonderId,
    pub tucked: CardId,
}

/// A progress token held by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldToken {
    pub id: TokenId,
    pub effect: TokenEffect,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub coins: u32,

    /// Constructed cards, in construction order.
    pub cards: Vec<CardId>,
    pub wonders_in_hand: Vec<WonderId>,
    pub wonders_built: Vec<BuiltWonder>,
    pub tokens: Vec<HeldToken>,

    /// Production from brown and grey cards.
    pub base: ResourceCounts,
    /// Production from wonders.
    pub wonder: ResourceCounts,
    /// Fixed-price trading rights from yellow cards.
    pub market: ResourceCounts,
    pub wonder_joint: JointCounts,
    pub market_joint: JointCounts,

    pub science: ScienceCounts,
    /// Total shields constructed.
    pub shields: u32,

    category_counts: [u32; 7],
}

impl PlayerState {
    #[must_use]
    pub fn new(id: PlayerId, coins: u32) -> Self {
        Self {
            id,
            coins,
            cards: Vec::new(),
            wonders_in_hand: Vec::new(),
            wonders_built: Vec::new(),
            tokens: Vec::new(),
            base: ResourceCounts::new(),
            wonder: ResourceCounts::new(),
            market: ResourceCounts::new(),
            wonder_joint: JointCounts::default(),
            market_joint: JointCounts::default(),
            science: ScienceCounts::default(),
            shields: 0,
            category_counts: [0; 7],
        }
    }

    #[must_use]
    pub fn has_card(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    #[must_use]
    pub fn has_token(&self, effect: TokenEffect) -> bool {
        self.tokens.iter().any(|t| t.effect == effect)
    }

    /// Number of constructed cards of a category.
    #[must_use]
    pub fn category_count(&self, category: Category) -> u32 {
        self.category_counts[category.index()]
    }

    /// Number of built wonders.
    #[must_use]
    pub fn wonder_count(&self) -> u32 {
        self.wonders_built.len() as u32
    }

    /// Add a constructed card to the city and apply its passive grant.
    ///
    /// Returns the new count of the card's science symbol, if it has one.
    pub fn add_card(&mut self, card: &Card) -> Option<u32> {
        self.cards.push(card.id);
        self.category_counts[card.category.index()] += 1;
        self.apply_passive(card, true)
    }

    /// Remove a constructed card, revoking its passive grant.
    ///
    /// Returns `false` if the card was not in this city.
    pub fn remove_card(&mut self, card: &Card) -> bool {
        let Some(index) = self.cards.iter().position(|&c| c == card.id) else {
            return false;
        };
        self.cards.remove(index);
        self.category_counts[card.category.index()] -= 1;
        self.apply_passive(card, false);
        true
    }

    /// Move a wonder from hand to city, tucking `tucked` beneath it.
    pub fn build_wonder(&mut self, wonder: &Wonder, tucked: CardId) {
        self.wonders_in_hand.retain(|&w| w != wonder.id);
        self.wonders_built.push(BuiltWonder {
            wonder: wonder.id,
            tucked,
        });
        self.apply_passive(wonder, true);
    }

    /// Take a progress token. Law adds its symbol; Agriculture and Urbanism
    /// pay out immediately.
    ///
    /// Returns the new count of the law symbol when it was added.
    pub fn gain_token(&mut self, token: &Token) -> Option<u32> {
        self.tokens.push(HeldToken {
            id: token.id,
            effect: token.effect,
        });
        self.coins += token.effect.immediate_coins();
        (token.effect == TokenEffect::Law).then(|| self.science.add(ScienceSymbol::Law))
    }

    /// Cards of `category` in this city, given a way to look categories up.
    pub fn cards_of<'a>(
        &'a self,
        category: Category,
        category_of: impl Fn(CardId) -> Category + 'a,
    ) -> impl Iterator<Item = CardId> + 'a {
        self.cards
            .iter()
            .copied()
            .filter(move |&c| category_of(c) == category)
    }

    fn apply_passive(&mut self, item: &impl Constructable, grant: bool) -> Option<u32> {
        let Passive {
            resources,
            joint,
            science,
        } = item.passive();

        let (pool, joints) = match item.kind() {
            Kind::Wonder => (Some(&mut self.wonder), Some(&mut self.wonder_joint)),
            Kind::Card(category) => match category.pool() {
                GrantPool::Base => (Some(&mut self.base), None),
                GrantPool::Market => (Some(&mut self.market), Some(&mut self.market_joint)),
                GrantPool::None => (None, None),
            },
        };

        if let Some(pool) = pool {
            if grant {
                *pool += resources;
            } else {
                *pool -= resources;
            }
        }
        if let (Some(joints), Some(joint)) = (joints, joint) {
            if grant {
                joints.add(*joint, 1);
            } else {
                joints.remove(*joint, 1);
            }
        }

        let symbol = (*science)?;
        if grant {
            Some(self.science.add(symbol))
        } else {
            self.science.remove(symbol);
            None
        }
    }
}

/// Snake draft bookkeeping.
///
/// The drawn wonders are split into sub-rounds. Sub-round `r` is led by the
/// first player when `r` is even and by the other player otherwise. The
/// leader picks when the sub-round pool is full or down to its last wonder;
/// the opponent picks the rest (A B B A, then B A A B).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftState {
    rounds: Vec<Vec<WonderId>>,
    round: usize,
    round_size: usize,
    first_player: PlayerId,
}

impl DraftState {
    #[must_use]
    pub fn new(pool: Vec<WonderId>, round_size: usize, first_player: PlayerId) -> Self {
        assert!(round_size > 0, "draft rounds must hold at least one wonder");
        let rounds = pool.chunks(round_size).map(<[WonderId]>::to_vec).collect();
        Self {
            rounds,
            round: 0,
            round_size,
            first_player,
        }
    }

    /// Wonders on offer right now.
    #[must_use]
    pub fn current_pool(&self) -> &[WonderId] {
        self.rounds.get(self.round).map_or(&[], Vec::as_slice)
    }

    /// Who picks next, or `None` once the draft is complete.
    #[must_use]
    pub fn drafter(&self) -> Option<PlayerId> {
        let remaining = self.current_pool().len();
        if remaining == 0 {
            return None;
        }
        let leader = if self.round % 2 == 0 {
            self.first_player
        } else {
            self.first_player.opponent()
        };
        Some(if remaining == self.round_size || remaining == 1 {
            leader
        } else {
            leader.opponent()
        })
    }

    /// Remove a wonder from the current pool, moving on to the next
    /// sub-round when this one empties. Returns `false` if the wonder is
    /// not on offer.
    pub fn take(&mut self, wonder: WonderId) -> bool {
        let Some(pool) = self.rounds.get_mut(self.round) else {
            return false;
        };
        let Some(index) = pool.iter().position(|&w| w == wonder) else {
            return false;
        };
        pool.remove(index);
        if pool.is_empty() {
            self.round += 1;
        }
        true
    }

    /// Wonders still to be drafted across all sub-rounds.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rounds.iter().skip(self.round).map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedState {
    /// Current age, 1-based.
    pub age: u8,
    pub active: PlayerId,
    pub first_player: PlayerId,

    /// Starts at 1 and counts completed game-phase turns.
    pub turn: u32,

    /// Military track position. Negative favours player 0.
    pub military: i32,
    /// Looting distances already claimed, per beneficiary.
    pub looted: PlayerMap<SmallVec<[u32; 2]>>,

    pub game_ended: bool,
    /// The last resolved move granted another turn.
    pub play_again: bool,

    pub discard: Vector<CardId>,
    /// Tokens on the board.
    pub available_tokens: Vec<TokenId>,
    /// Tokens left in the box.
    pub unavailable_tokens: Vec<TokenId>,
    /// Unbuilt wonders removed once the wonder limit is reached.
    pub retired_wonders: Vec<WonderId>,

    pub draft: DraftState,
    pub history: Vector<MoveRecord>,
}

impl SharedState {
    #[must_use]
    pub fn new(first_player: PlayerId, draft: DraftState) -> Self {
        Self {
            age: 1,
            active: first_player,
            first_player,
            turn: 1,
            military: 0,
            looted: PlayerMap::with_default(),
            game_ended: false,
            play_again: false,
            discard: Vector::new(),
            available_tokens: Vec::new(),
            unavailable_tokens: Vec::new(),
            retired_wonders: Vec::new(),
            draft,
            history: Vector::new(),
        }
    }

    /// Signed track distance in `player`'s favour.
    #[must_use]
    pub fn military_lead(&self, player: PlayerId) -> i32 {
        if player.index() == 0 {
            -self.military
        } else {
            self.military
        }
    }
}

/// Complete mutable game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: PlayerMap<PlayerState>,
    pub shared: SharedState,
    /// One board per age, all dealt at setup; index 0 is age 1.
    pub boards: Vec<Board>,
}

impl GameState {
    /// The current age's board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.boards[self.shared.age as usize - 1]
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.boards[self.shared.age as usize - 1]
    }

    /// Wonders built across both cities.
    #[must_use]
    pub fn wonders_built(&self) -> usize {
        self.players.iter().map(|(_, p)| p.wonders_built.len()).sum()
    }
}
