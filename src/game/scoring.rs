//! Counting and end-of-game scoring.

use serde::{Deserialize, Serialize};

use crate::cards::{Catalog, Category, Scope, Tally, VictoryPoints};
use crate::core::{GameState, PlayerId, PlayerState, RulesConfig};
use crate::rules::{GameResult, Victory};

/// Evaluate a tally for `me`, or for whichever city is larger under
/// `Scope::Richest`.
#[must_use]
pub fn count(tally: &Tally, scope: Scope, me: &PlayerState, them: &PlayerState) -> u32 {
    let own = count_city(tally, me);
    match scope {
        Scope::Own => own,
        Scope::Richest => own.max(count_city(tally, them)),
    }
}

fn count_city(tally: &Tally, city: &PlayerState) -> u32 {
    match tally {
        Tally::Cards(categories) => categories.iter().map(|&c| city.category_count(c)).sum(),
        Tally::Wonders => city.wonder_count(),
        Tally::Tokens => city.tokens.len() as u32,
        Tally::Coins(group) => city.coins / group,
    }
}

fn points(formula: &VictoryPoints, me: &PlayerState, them: &PlayerState) -> u32 {
    match formula {
        VictoryPoints::Fixed(n) => *n,
        VictoryPoints::Per { each, tally, scope } => each * count(tally, *scope, me, them),
    }
}

/// A player's points, by source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    /// Blue cards.
    pub civilian: u32,
    /// Green cards.
    pub science: u32,
    /// Yellow cards.
    pub commercial: u32,
    pub guilds: u32,
    pub wonders: u32,
    pub tokens: u32,
    pub military: u32,
    /// One point per three coins.
    pub coins: u32,
}

impl ScoreSheet {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.civilian
            + self.science
            + self.commercial
            + self.guilds
            + self.wonders
            + self.tokens
            + self.military
            + self.coins
    }
}

/// Score `player`'s city as it stands.
#[must_use]
pub fn score(state: &GameState, catalog: &Catalog, config: &RulesConfig, player: PlayerId) -> ScoreSheet {
    let me = &state.players[player];
    let them = &state.players[player.opponent()];
    let mut sheet = ScoreSheet::default();

    for &id in &me.cards {
        let card = catalog.card(id);
        let vp = points(&card.victory_points, me, them);
        match card.category {
            Category::Blue => sheet.civilian += vp,
            Category::Green => sheet.science += vp,
            Category::Yellow => sheet.commercial += vp,
            Category::Purple => sheet.guilds += vp,
            Category::Brown | Category::Grey | Category::Red => {}
        }
    }

    sheet.wonders = me
        .wonders_built
        .iter()
        .map(|built| points(&catalog.wonder(built.wonder).victory_points, me, them))
        .sum();

    let held = me.tokens.len() as u32;
    sheet.tokens = me.tokens.iter().map(|t| t.effect.victory_points(held)).sum();

    let lead = state.shared.military_lead(player);
    sheet.military = if lead > 0 {
        config.military_points(lead.unsigned_abs())
    } else {
        0
    };

    sheet.coins = me.coins / 3;
    sheet
}

/// Civilian victory: higher total wins, then higher blue-card points, else
/// a draw.
#[must_use]
pub fn civilian_result(state: &GameState, catalog: &Catalog, config: &RulesConfig) -> GameResult {
    let a = PlayerId::new(0);
    let b = PlayerId::new(1);
    let sheet_a = score(state, catalog, config, a);
    let sheet_b = score(state, catalog, config, b);

    let key = |s: &ScoreSheet| (s.total(), s.civilian);
    let winner = match key(&sheet_a).cmp(&key(&sheet_b)) {
        std::cmp::Ordering::Greater => a,
        std::cmp::Ordering::Less => b,
        std::cmp::Ordering::Equal => return GameResult::Draw,
    };

    GameResult::Winner {
        player: winner,
        victory: Victory::Civilian,
    }
}
