//! Cost arbitration: how many coins a player pays to construct something.
//!
//! ## Algorithm
//!
//! 1. A card whose prerequisite the purchaser owns is free.
//! 2. An empty cost is free.
//! 3. The coin component is always paid.
//! 4. A coins-only cost stops there.
//! 5. Per resource, the deficit is the requirement minus base and wonder
//!    production. No deficit anywhere stops there.
//! 6. Per resource, the unit price is the market price if the purchaser has
//!    a market grant for it, else the base trade price plus the opponent's
//!    base production of that resource.
//! 7. Joint grants (wonder and market combined) are spent one unit at a time,
//!    `P/G` before `W/C/S`, each on the covered kind with the highest unit
//!    price among those still in deficit. Ties go to the first kind in
//!    `C W S P G` order. Allocation stops when the covered deficits are gone.
//! 8. Masonry (blue cards) and Architecture (wonders) waive a fixed number of
//!    further units, chosen by the same highest-price rule over all kinds.
//! 9. Remaining deficits are bought at unit price.
//!
//! The greedy allocation in step 7 is part of the rules: it is not a global
//! optimum and must not be replaced by one.

use serde::{Deserialize, Serialize};

use crate::cards::{Category, Constructable, JointResource, Kind, Resource, ResourceCounts, TokenEffect};
use crate::core::{PlayerState, RulesConfig};

/// The price constants the cost engine needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub market_price: u32,
    pub base_trade_price: u32,
    pub token_discount: u32,
}

impl Default for Pricing {
    fn default() -> Self {
        Self::from(&RulesConfig::default())
    }
}

impl From<&RulesConfig> for Pricing {
    fn from(config: &RulesConfig) -> Self {
        Self {
            market_price: config.market_price,
            base_trade_price: config.base_trade_price,
            token_discount: config.token_resource_discount,
        }
    }
}

/// Split of a price into the fixed coin component and the trade component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Coins printed on the cost.
    pub coins: u32,
    /// Coins paid to the bank for missing resources.
    pub trade: u32,
}

impl CostBreakdown {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.coins + self.trade
    }
}

/// Coins `purchaser` pays for `item`, facing `opponent`, at standard prices.
///
/// ```
/// use duel_engine::cards::Catalog;
/// use duel_engine::core::{PlayerId, PlayerState};
///
/// let catalog = Catalog::standard().unwrap();
/// let me = PlayerState::new(PlayerId::new(0), 7);
/// let them = PlayerState::new(PlayerId::new(1), 7);
///
/// let library = catalog.card(catalog.card_by_name("Library").unwrap());
/// assert_eq!(duel_engine::cost::cost(&me, &them, library), 6);
/// ```
#[must_use]
pub fn cost<C: Constructable + ?Sized>(
    purchaser: &PlayerState,
    opponent: &PlayerState,
    item: &C,
) -> u32 {
    cost_breakdown(purchaser, opponent, item, Pricing::default()).total()
}

/// Full cost computation with explicit prices.
#[must_use]
pub fn cost_breakdown<C: Constructable + ?Sized>(
    purchaser: &PlayerState,
    opponent: &PlayerState,
    item: &C,
    pricing: Pricing,
) -> CostBreakdown {
    if item.prerequisite().is_some_and(|p| purchaser.has_card(p)) {
        return CostBreakdown::default();
    }

    let required = item.cost();
    if required.is_free() {
        return CostBreakdown::default();
    }

    let coins = required.coins;
    if required.is_coins_only() {
        return CostBreakdown { coins, trade: 0 };
    }

    let mut deficit = required.resources;
    deficit.saturating_sub_assign(&purchaser.base);
    deficit.saturating_sub_assign(&purchaser.wonder);
    if deficit.is_empty() {
        return CostBreakdown { coins, trade: 0 };
    }

    let prices = unit_prices(purchaser, opponent, pricing);

    for joint in JointResource::ALL {
        let units = purchaser.wonder_joint.get(joint) + purchaser.market_joint.get(joint);
        for _ in 0..units {
            let Some(pick) = most_expensive(&deficit, &prices, joint.covers()) else {
                break;
            };
            deficit[pick] -= 1;
        }
    }

    if discount_applies(purchaser, item) {
        for _ in 0..pricing.token_discount {
            let Some(pick) = most_expensive(&deficit, &prices, &Resource::ALL) else {
                break;
            };
            deficit[pick] -= 1;
        }
    }

    let trade: u32 = deficit.iter().map(|(r, n)| n * prices[r]).sum();

    tracing::trace!(item = item.name(), coins, trade, "cost computed");
    CostBreakdown { coins, trade }
}

/// Per-resource unit prices for `purchaser`.
///
/// A market grant fixes the price regardless of what the opponent produces.
#[must_use]
pub fn unit_prices(purchaser: &PlayerState, opponent: &PlayerState, pricing: Pricing) -> ResourceCounts {
    let mut prices = ResourceCounts::new();
    for r in Resource::ALL {
        prices[r] = if purchaser.market[r] >= 1 {
            pricing.market_price
        } else {
            pricing.base_trade_price + opponent.base[r]
        };
    }
    prices
}

/// The kind among `candidates` with the highest price that still has a
/// deficit; first in order wins ties.
fn most_expensive(
    deficit: &ResourceCounts,
    prices: &ResourceCounts,
    candidates: &[Resource],
) -> Option<Resource> {
    let mut best: Option<Resource> = None;
    for &r in candidates {
        if deficit[r] == 0 {
            continue;
        }
        if best.map_or(true, |b| prices[r] > prices[b]) {
            best = Some(r);
        }
    }
    best
}

fn discount_applies<C: Constructable + ?Sized>(purchaser: &PlayerState, item: &C) -> bool {
    match item.kind() {
        Kind::Card(Category::Blue) => purchaser.has_token(TokenEffect::Masonry),
        Kind::Card(_) => false,
        Kind::Wonder => purchaser.has_token(TokenEffect::Architecture),
    }
}
