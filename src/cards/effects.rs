//! On-construction effects, victory point formulas, wonder specials and
//! progress token effects.
//!
//! ## Effect grammar
//!
//! `on_play` fields are comma-separated terms:
//!
//! | Term | Meaning |
//! | --- | --- |
//! | `$4` | gain 4 coins |
//! | `-$3` | opponent loses 3 coins |
//! | `M2` | 2 shields on the military track |
//! | `$2 per Brown` | 2 coins per brown card in your city |
//! | `$1 per Yellow most` | 1 coin per yellow card in the city that has more |
//!
//! Victory points use the same counting vocabulary: `3`, `1 per Blue most`,
//! `1 per Brown+Grey most`, `2 per Wonder most`, `1 per 3$ most`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::EncodingError;

use super::definition::Category;

/// What a scaled effect counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tally {
    /// Cards of any of these categories.
    Cards(SmallVec<[Category; 2]>),
    /// Built wonders.
    Wonders,
    /// Progress tokens held.
    Tokens,
    /// Whole groups of this many coins.
    Coins(u32),
}

impl Tally {
    fn parse(term: &str, field: &'static str) -> Result<Self, EncodingError> {
        match term {
            "Wonder" => return Ok(Tally::Wonders),
            "Token" => return Ok(Tally::Tokens),
            _ => {}
        }

        if let Some(group) = term.strip_suffix('$') {
            return group
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .map(Tally::Coins)
                .ok_or_else(|| unknown(field, term));
        }

        term.split('+')
            .map(|name| Category::from_name(name).ok_or_else(|| unknown(field, term)))
            .collect::<Result<SmallVec<_>, _>>()
            .map(Tally::Cards)
    }
}

/// Whose city a tally is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Own,
    /// Whichever city has the larger count.
    Richest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    GainCoins(u32),
    OpponentLosesCoins(u32),
    Shields(u32),
    CoinsPer { each: u32, tally: Tally, scope: Scope },
}

impl Effect {
    /// Parse a comma-separated effect list. Empty input yields no effects.
    pub fn parse_list(raw: &str) -> Result<Vec<Effect>, EncodingError> {
        raw.split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(Effect::parse)
            .collect()
    }

    fn parse(term: &str) -> Result<Effect, EncodingError> {
        const FIELD: &str = "effect";

        if let Some(rest) = term.strip_prefix("-$") {
            return number(rest, FIELD, term).map(Effect::OpponentLosesCoins);
        }
        if let Some(rest) = term.strip_prefix('M') {
            return number(rest, FIELD, term).map(Effect::Shields);
        }
        let Some(rest) = term.strip_prefix('$') else {
            return Err(unknown(FIELD, term));
        };

        let words: SmallVec<[&str; 4]> = rest.split_whitespace().collect();
        match words.as_slice() {
            [n] => number(n, FIELD, term).map(Effect::GainCoins),
            [n, "per", what, rest @ ..] => Ok(Effect::CoinsPer {
                each: number(n, FIELD, term)?,
                tally: Tally::parse(what, FIELD)?,
                scope: scope(rest, FIELD, term)?,
            }),
            _ => Err(unknown(FIELD, term)),
        }
    }
}

/// Victory point formula of a card or wonder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryPoints {
    Fixed(u32),
    Per { each: u32, tally: Tally, scope: Scope },
}

impl Default for VictoryPoints {
    fn default() -> Self {
        VictoryPoints::Fixed(0)
    }
}

impl VictoryPoints {
    pub fn parse(raw: &str) -> Result<Self, EncodingError> {
        const FIELD: &str = "victory points";

        let words: SmallVec<[&str; 4]> = raw.split_whitespace().collect();
        match words.as_slice() {
            [] => Ok(VictoryPoints::Fixed(0)),
            [n] => number(n, FIELD, raw).map(VictoryPoints::Fixed),
            [n, "per", what, rest @ ..] => Ok(VictoryPoints::Per {
                each: number(n, FIELD, raw)?,
                tally: Tally::parse(what, FIELD)?,
                scope: scope(rest, FIELD, raw)?,
            }),
            _ => Err(unknown(FIELD, raw)),
        }
    }
}

/// A wonder's one-off special effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WonderSpecial {
    DestroyBrown,
    DestroyGrey,
    TokenFromBox,
    ReviveDiscard,
}

impl WonderSpecial {
    pub fn parse(raw: &str) -> Result<Option<Self>, EncodingError> {
        Ok(Some(match raw {
            "" => return Ok(None),
            "DestroyBrown" => WonderSpecial::DestroyBrown,
            "DestroyGrey" => WonderSpecial::DestroyGrey,
            "TokenFromBox" => WonderSpecial::TokenFromBox,
            "ReviveDiscard" => WonderSpecial::ReviveDiscard,
            other => return Err(unknown("special", other)),
        }))
    }

    /// The category a destroy special targets.
    #[must_use]
    pub const fn destroys(self) -> Option<Category> {
        match self {
            WonderSpecial::DestroyBrown => Some(Category::Brown),
            WonderSpecial::DestroyGrey => Some(Category::Grey),
            WonderSpecial::TokenFromBox | WonderSpecial::ReviveDiscard => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenEffect {
    /// 6 coins now, 4 victory points.
    Agriculture,
    /// Wonders cost two fewer resources.
    Architecture,
    /// Coins the opponent spends on trading go to you.
    Economy,
    /// Counts as a science symbol.
    Law,
    /// Blue cards cost two fewer resources.
    Masonry,
    /// 3 victory points per token held, this one included.
    Mathematics,
    /// 7 victory points.
    Philosophy,
    /// Red cards give one extra shield.
    Strategy,
    /// Every wonder grants another turn.
    Theology,
    /// 6 coins now, 4 coins per chained construction.
    Urbanism,
}

impl TokenEffect {
    pub fn parse(raw: &str) -> Result<Self, EncodingError> {
        Ok(match raw {
            "Agriculture" => TokenEffect::Agriculture,
            "Architecture" => TokenEffect::Architecture,
            "Economy" => TokenEffect::Economy,
            "Law" => TokenEffect::Law,
            "Masonry" => TokenEffect::Masonry,
            "Mathematics" => TokenEffect::Mathematics,
            "Philosophy" => TokenEffect::Philosophy,
            "Strategy" => TokenEffect::Strategy,
            "Theology" => TokenEffect::Theology,
            "Urbanism" => TokenEffect::Urbanism,
            other => return Err(unknown("token effect", other)),
        })
    }

    /// Coins granted the moment the token is taken.
    #[must_use]
    pub const fn immediate_coins(self) -> u32 {
        match self {
            TokenEffect::Agriculture | TokenEffect::Urbanism => 6,
            _ => 0,
        }
    }

    /// End-of-game points, given how many tokens the holder has.
    #[must_use]
    pub const fn victory_points(self, tokens_held: u32) -> u32 {
        match self {
            TokenEffect::Agriculture => 4,
            TokenEffect::Philosophy => 7,
            TokenEffect::Mathematics => 3 * tokens_held,
            _ => 0,
        }
    }
}

fn unknown(field: &'static str, term: &str) -> EncodingError {
    EncodingError::UnknownTerm {
        field,
        term: term.to_string(),
    }
}

fn number(digits: &str, field: &'static str, term: &str) -> Result<u32, EncodingError> {
    digits.parse().map_err(|_| unknown(field, term))
}

fn scope(rest: &[&str], field: &'static str, term: &str) -> Result<Scope, EncodingError> {
    match rest {
        [] => Ok(Scope::Own),
        ["most"] => Ok(Scope::Richest),
        _ => Err(unknown(field, term)),
    }
}
