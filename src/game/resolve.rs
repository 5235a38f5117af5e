//! Applying committed moves to the game state.
//!
//! Everything here runs after the move has been checked against the legal
//! set, so the state is known to permit it: the slot is selectable, the
//! player can pay, and any named card or token exists where the move says.

use tracing::{debug, trace};

use crate::cards::{Card, CardId, Catalog, Category, Constructable, Effect, TokenEffect, TokenId, WonderId};
use crate::core::{GameState, Move, PlayerId, RulesConfig, WonderChoice};
use crate::cost::{cost_breakdown, Pricing};

use super::scoring::count;

/// Where a progress token is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenSource {
    Board,
    Box,
}

/// Mutable view over the state for the duration of one move.
pub(crate) struct Resolver<'a> {
    pub state: &'a mut GameState,
    pub catalog: &'a Catalog,
    pub config: &'a RulesConfig,
}

impl Resolver<'_> {
    /// Apply `mv` for `player`. Returns whether the player plays again.
    pub fn apply(&mut self, player: PlayerId, mv: &Move) -> bool {
        match *mv {
            Move::DraftWonder { wonder } => {
                self.draft(player, wonder);
                false
            }
            Move::ConstructCard { position, token, .. } => {
                self.construct_card(player, position, token);
                false
            }
            Move::DiscardCard { position } => {
                self.discard(player, position);
                false
            }
            Move::ConstructWonder {
                wonder,
                position,
                choice,
                ..
            } => self.construct_wonder(player, wonder, position, choice),
        }
    }

    fn draft(&mut self, player: PlayerId, wonder: WonderId) {
        if self.state.shared.draft.take(wonder) {
            self.state.players[player].wonders_in_hand.push(wonder);
            debug!(%player, wonder = %self.catalog.wonder(wonder).name, "wonder drafted");
        }
    }

    fn take_from_board(&mut self, position: usize) -> CardId {
        match self.state.board_mut().take(position) {
            Some(card) => card,
            None => unreachable!("legal move names empty slot {position}"),
        }
    }

    /// Deduct the price of `item`, handing the trade part to an opponent
    /// holding Economy.
    fn pay(&mut self, player: PlayerId, item: &impl Constructable) {
        let pricing = Pricing::from(self.config);
        let (me, them) = self.state.players.pair_mut(player);
        let price = cost_breakdown(me, them, item, pricing);

        me.coins -= price.total();
        if them.has_token(TokenEffect::Economy) {
            them.coins += price.trade;
        }
        trace!(%player, item = item.name(), coins = price.coins, trade = price.trade, "paid");
    }

    fn construct_card(&mut self, player: PlayerId, position: usize, token: Option<TokenId>) {
        let catalog = self.catalog;
        let card = catalog.card(self.take_from_board(position));
        let chained = card
            .prerequisite
            .is_some_and(|p| self.state.players[player].has_card(p));

        self.pay(player, card);
        self.build_card(player, card, token);

        let me = &mut self.state.players[player];
        if chained && me.has_token(TokenEffect::Urbanism) {
            me.coins += self.config.chain_rebate;
        }
        debug!(%player, card = %card.name, chained, "card constructed");
    }

    /// Add `card` to the city and run its effects. A completed science pair
    /// takes `token`, or the first token on the board when none was named.
    fn build_card(&mut self, player: PlayerId, card: &Card, token: Option<TokenId>) {
        let symbol_count = self.state.players[player].add_card(card);
        self.apply_effects(player, &card.effects, card.category == Category::Red);

        if symbol_count == Some(2) {
            let pick = token.or_else(|| self.state.shared.available_tokens.first().copied());
            if let Some(token) = pick {
                self.take_token(player, token, TokenSource::Board);
            }
        }
    }

    fn discard(&mut self, player: PlayerId, position: usize) {
        let card = self.take_from_board(position);
        let me = &mut self.state.players[player];
        let income = self.config.discard_base + me.category_count(Category::Yellow);
        me.coins += income;
        self.state.shared.discard.push_back(card);
        debug!(%player, card = %self.catalog.card(card).name, "card discarded");
    }

    fn construct_wonder(
        &mut self,
        player: PlayerId,
        wonder: WonderId,
        position: usize,
        choice: WonderChoice,
    ) -> bool {
        let catalog = self.catalog;
        let tucked = self.take_from_board(position);
        let wonder = catalog.wonder(wonder);

        self.pay(player, wonder);
        self.state.players[player].build_wonder(wonder, tucked);
        self.apply_effects(player, &wonder.effects, false);

        match choice {
            WonderChoice::None => {}
            WonderChoice::Destroy(card) => {
                let opponent = player.opponent();
                if self.state.players[opponent].remove_card(catalog.card(card)) {
                    self.state.shared.discard.push_back(card);
                }
            }
            WonderChoice::Token(token) => self.take_token(player, token, TokenSource::Box),
            WonderChoice::Revive(card) => {
                let discard = &mut self.state.shared.discard;
                if let Some(index) = discard.index_of(&card) {
                    discard.remove(index);
                    self.build_card(player, catalog.card(card), None);
                }
            }
        }

        if self.state.wonders_built() >= self.config.wonder_limit {
            for (_, city) in self.state.players.iter_mut() {
                self.state.shared.retired_wonders.append(&mut city.wonders_in_hand);
            }
        }

        debug!(%player, wonder = %wonder.name, ?choice, "wonder constructed");
        wonder.play_again || self.state.players[player].has_token(TokenEffect::Theology)
    }

    fn take_token(&mut self, player: PlayerId, token: TokenId, source: TokenSource) {
        let pool = match source {
            TokenSource::Board => &mut self.state.shared.available_tokens,
            TokenSource::Box => &mut self.state.shared.unavailable_tokens,
        };
        let Some(index) = pool.iter().position(|&t| t == token) else {
            return;
        };
        pool.remove(index);

        let catalog = self.catalog;
        let token = catalog.token(token);
        self.state.players[player].gain_token(token);
        debug!(%player, token = %token.name, ?source, "progress token taken");
    }

    fn apply_effects(&mut self, player: PlayerId, effects: &[Effect], military_card: bool) {
        for effect in effects {
            match effect {
                Effect::GainCoins(n) => self.state.players[player].coins += n,
                Effect::OpponentLosesCoins(n) => {
                    let them = &mut self.state.players[player.opponent()];
                    them.coins = them.coins.saturating_sub(*n);
                }
                Effect::Shields(n) => {
                    let strategy =
                        military_card && self.state.players[player].has_token(TokenEffect::Strategy);
                    self.advance_military(player, n + u32::from(strategy));
                }
                Effect::CoinsPer { each, tally, scope } => {
                    let (me, them) = self.state.players.pair_mut(player);
                    me.coins += each * count(tally, *scope, me, them);
                }
            }
        }
    }

    /// Push the track towards the opponent's capital, looting them the first
    /// time each threshold is reached.
    fn advance_military(&mut self, player: PlayerId, shields: u32) {
        self.state.players[player].shields += shields;

        let shared = &mut self.state.shared;
        let step = shields as i32;
        let limit = self.config.military_supremacy as i32;
        let delta = if player.index() == 0 { -step } else { step };
        shared.military = (shared.military + delta).clamp(-limit, limit);

        let lead = shared.military_lead(player);
        for threshold in &self.config.military_loot {
            let claimed = &mut shared.looted[player];
            if lead < threshold.distance as i32 || claimed.contains(&threshold.distance) {
                continue;
            }
            claimed.push(threshold.distance);

            let them = &mut self.state.players[player.opponent()];
            them.coins = them.coins.saturating_sub(threshold.coins);
            debug!(%player, distance = threshold.distance, coins = threshold.coins, "looted");
        }
        trace!(track = shared.military, "military track moved");
    }
}
