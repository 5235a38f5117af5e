//! Rules configuration.
//!
//! Every numeric constant the rules depend on lives in `RulesConfig`:
//! the economy (starting coins, trade prices, rebates), the layout draws for
//! each age, the wonder draft sizes, and the military and science victory
//! thresholds. `RulesConfig::default()` is the standard game; the `with_*`
//! builders exist for variants and for tests that need a smaller table.

use serde::{Deserialize, Serialize};

use crate::cards::AgePool;

use super::error::ConfigError;
use super::PlayerId;

/// How many cards to draw from one catalog pool when setting up an age.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDraw {
    pub pool: AgePool,
    pub count: usize,
}

impl PoolDraw {
    #[must_use]
    pub const fn new(pool: AgePool, count: usize) -> Self {
        Self { pool, count }
    }
}

/// A military looting threshold: once the track reaches `distance` in a
/// player's favour, the opponent loses `coins` (at most once per threshold).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootThreshold {
    pub distance: u32,
    pub coins: u32,
}

/// Victory points for holding the military track at least `distance` away
/// from the centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilitaryReward {
    pub distance: u32,
    pub points: u32,
}

/// Complete rules configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Coins each player starts with.
    pub starting_coins: u32,

    /// Coins for discarding a card, before the per-yellow-card bonus.
    pub discard_base: u32,

    /// Unit price of a resource the purchaser has a market grant for.
    pub market_price: u32,

    /// Base unit price of a resource bought from the bank; the opponent's
    /// production of that resource is added on top.
    pub base_trade_price: u32,

    /// Resource units waived by Masonry (blue cards) or Architecture (wonders).
    pub token_resource_discount: u32,

    /// Coins received by an Urbanism holder for every chained construction.
    pub chain_rebate: u32,

    /// Maximum number of wonders built across both players.
    pub wonder_limit: usize,

    /// Wonders in each draft sub-round.
    pub draft_round_size: usize,

    /// Number of draft sub-rounds.
    pub draft_rounds: usize,

    /// Progress tokens laid out on the board at setup.
    pub available_tokens: usize,

    /// How many tokens from the box a "take a token" wonder offers.
    pub box_offer: usize,

    /// Per-age draws; index 0 is age 1.
    pub age_draws: Vec<Vec<PoolDraw>>,

    /// Track distance that wins the game outright.
    pub military_supremacy: u32,

    pub military_loot: Vec<LootThreshold>,

    /// Ascending by distance.
    pub military_rewards: Vec<MilitaryReward>,

    /// Distinct science symbols that win the game outright.
    pub science_supremacy: usize,

    /// Fixed first player; drawn from the RNG when `None`.
    pub first_player: Option<PlayerId>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_coins: 7,
            discard_base: 2,
            market_price: 1,
            base_trade_price: 2,
            token_resource_discount: 2,
            chain_rebate: 4,
            wonder_limit: 7,
            draft_round_size: 4,
            draft_rounds: 2,
            available_tokens: 5,
            box_offer: 3,
            age_draws: vec![
                vec![PoolDraw::new(AgePool::First, 20)],
                vec![PoolDraw::new(AgePool::Second, 20)],
                vec![PoolDraw::new(AgePool::Third, 17), PoolDraw::new(AgePool::Guild, 3)],
            ],
            military_supremacy: 9,
            military_loot: vec![
                LootThreshold { distance: 3, coins: 2 },
                LootThreshold { distance: 6, coins: 5 },
            ],
            military_rewards: vec![
                MilitaryReward { distance: 1, points: 2 },
                MilitaryReward { distance: 3, points: 5 },
                MilitaryReward { distance: 6, points: 10 },
            ],
            science_supremacy: 6,
            first_player: None,
        }
    }
}

impl RulesConfig {
    /// Number of ages in the game.
    #[must_use]
    pub fn age_count(&self) -> u8 {
        self.age_draws.len() as u8
    }

    /// Draws for `age` (1-based).
    pub fn draws_for(&self, age: u8) -> Result<&[PoolDraw], ConfigError> {
        age.checked_sub(1)
            .and_then(|i| self.age_draws.get(i as usize))
            .map(Vec::as_slice)
            .ok_or(ConfigError::UnknownAge(age))
    }

    /// Total wonders drawn for the draft.
    #[must_use]
    pub fn draft_size(&self) -> usize {
        self.draft_round_size * self.draft_rounds
    }

    /// Victory points for a track distance in a player's favour.
    #[must_use]
    pub fn military_points(&self, distance: u32) -> u32 {
        self.military_rewards
            .iter()
            .filter(|r| distance >= r.distance)
            .map(|r| r.points)
            .last()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn with_starting_coins(mut self, coins: u32) -> Self {
        self.starting_coins = coins;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = Some(player);
        self
    }

    /// Replace the draws for `age` (1-based).
    ///
    /// Panics if `age` is not one of the configured ages.
    #[must_use]
    pub fn with_age_draws(mut self, age: u8, draws: Vec<PoolDraw>) -> Self {
        assert!(
            age >= 1 && (age as usize) <= self.age_draws.len(),
            "age {age} is not configured"
        );
        self.age_draws[age as usize - 1] = draws;
        self
    }

    #[must_use]
    pub fn with_chain_rebate(mut self, coins: u32) -> Self {
        self.chain_rebate = coins;
        self
    }

    #[must_use]
    pub fn with_military_supremacy(mut self, distance: u32) -> Self {
        self.military_supremacy = distance;
        self
    }
}
