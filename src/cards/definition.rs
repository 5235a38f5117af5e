//! Card, wonder and token definitions.
//!
//! Definitions are immutable once the catalog is built. Players refer to
//! them through the small copyable IDs below, which index into the catalog.

use serde::{Deserialize, Serialize};

use super::effects::{Effect, TokenEffect, VictoryPoints, WonderSpecial};
use super::resources::{Cost, Passive};

/// Index of a card in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Index of a wonder in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WonderId(pub u8);

impl WonderId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for WonderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wonder({})", self.0)
    }
}

/// Index of a progress token in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u8);

impl TokenId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

/// Card colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Raw materials.
    Brown,
    /// Manufactured goods.
    Grey,
    /// Military.
    Red,
    /// Science.
    Green,
    /// Commerce.
    Yellow,
    /// Civilian.
    Blue,
    /// Guilds.
    Purple,
}

/// Which resource pool a category's passive grant feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantPool {
    /// Own production; counted against costs and raises the opponent's
    /// trade price.
    Base,
    /// Fixed-price trading rights.
    Market,
    /// No resource grant.
    None,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Brown,
        Category::Grey,
        Category::Red,
        Category::Green,
        Category::Yellow,
        Category::Blue,
        Category::Purple,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Brown" => Category::Brown,
            "Grey" => Category::Grey,
            "Red" => Category::Red,
            "Green" => Category::Green,
            "Yellow" => Category::Yellow,
            "Blue" => Category::Blue,
            "Purple" => Category::Purple,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn pool(self) -> GrantPool {
        match self {
            Category::Brown | Category::Grey => GrantPool::Base,
            Category::Yellow => GrantPool::Market,
            Category::Red | Category::Green | Category::Blue | Category::Purple => GrantPool::None,
        }
    }
}

/// Catalog pool a card is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgePool {
    First,
    Second,
    Third,
    Guild,
}

impl AgePool {
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Some(match label {
            "1" => AgePool::First,
            "2" => AgePool::Second,
            "3" => AgePool::Third,
            "Guild" => AgePool::Guild,
            _ => return None,
        })
    }
}

/// What kind of thing is being constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Card(Category),
    Wonder,
}

/// Anything a player can pay for: cards and wonders.
///
/// The cost engine and the move resolver only see this trait.
pub trait Constructable {
    fn name(&self) -> &str;
    fn kind(&self) -> Kind;
    fn cost(&self) -> &Cost;
    fn passive(&self) -> &Passive;
    fn effects(&self) -> &[Effect];
    fn victory_points(&self) -> &VictoryPoints;

    /// A card whose owner may construct this one for free.
    fn prerequisite(&self) -> Option<CardId> {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub age: AgePool,
    pub category: Category,
    pub cost: Cost,
    pub passive: Passive,
    pub effects: Vec<Effect>,
    pub victory_points: VictoryPoints,
    pub prerequisite: Option<CardId>,
}

impl Constructable for Card {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> Kind {
        Kind::Card(self.category)
    }

    fn cost(&self) -> &Cost {
        &self.cost
    }

    fn passive(&self) -> &Passive {
        &self.passive
    }

    fn effects(&self) -> &[Effect] {
        &self.effects
    }

    fn victory_points(&self) -> &VictoryPoints {
        &self.victory_points
    }

    fn prerequisite(&self) -> Option<CardId> {
        self.prerequisite
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wonder {
    pub id: WonderId,
    pub name: String,
    pub cost: Cost,
    pub passive: Passive,
    pub effects: Vec<Effect>,
    pub victory_points: VictoryPoints,
    pub special: Option<WonderSpecial>,
    pub play_again: bool,
}

impl Constructable for Wonder {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> Kind {
        Kind::Wonder
    }

    fn cost(&self) -> &Cost {
        &self.cost
    }

    fn passive(&self) -> &Passive {
        &self.passive
    }

    fn effects(&self) -> &[Effect] {
        &self.effects
    }

    fn victory_points(&self) -> &VictoryPoints {
        &self.victory_points
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub name: String,
    pub effect: TokenEffect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_pools() {
        assert_eq!(Category::Brown.pool(), GrantPool::Base);
        assert_eq!(Category::Grey.pool(), GrantPool::Base);
        assert_eq!(Category::Yellow.pool(), GrantPool::Market);
        assert_eq!(Category::Green.pool(), GrantPool::None);
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            let name = format!("{:?}", category);
            assert_eq!(Category::from_name(&name), Some(category));
        }
        assert_eq!(Category::from_name("Gold"), None);
    }

    #[test]
    fn test_age_pool_labels() {
        assert_eq!(AgePool::from_label("2"), Some(AgePool::Second));
        assert_eq!(AgePool::from_label("Guild"), Some(AgePool::Guild));
        assert_eq!(AgePool::from_label("4"), None);
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(CardId::new(3).to_string(), "Card(3)");
        assert_eq!(WonderId::new(1).to_string(), "Wonder(1)");
        assert_eq!(TokenId::new(9).index(), 9);
    }
}
