//! Resources, costs and passive grants.
//!
//! ## Encodings
//!
//! Catalog records encode costs and passives as short strings:
//!
//! - cost: one character per unit, `C W S P G` for resources and `$` for a
//!   coin. `"SSG"` is two stone and a glass; `"$$$C"` is three coins and a
//!   clay; the empty string is free.
//! - passive: resource letters (`"WW"`), a joint resource (`"P/G"`,
//!   `"W/C/S"`), or a science digit `1`..`7`.
//!
//! ## Iteration order
//!
//! Every deterministic tie-break in the rules walks resources in
//! `Resource::ALL` order: clay, wood, stone, paper, glass.

use std::ops::{AddAssign, Index, IndexMut, SubAssign};

use serde::{Deserialize, Serialize};

use crate::core::EncodingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    Clay,
    Wood,
    Stone,
    Paper,
    Glass,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Clay,
        Resource::Wood,
        Resource::Stone,
        Resource::Paper,
        Resource::Glass,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Resource::Clay => 'C',
            Resource::Wood => 'W',
            Resource::Stone => 'S',
            Resource::Paper => 'P',
            Resource::Glass => 'G',
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.symbol() == symbol)
    }
}

/// One counter per resource kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceCounts([u32; 5]);

impl ResourceCounts {
    #[must_use]
    pub const fn new() -> Self {
        Self([0; 5])
    }

    /// Build from `(resource, amount)` pairs.
    ///
    /// ```
    /// use duel_engine::cards::{Resource, ResourceCounts};
    ///
    /// let counts = ResourceCounts::from_pairs(&[(Resource::Stone, 2), (Resource::Glass, 1)]);
    /// assert_eq!(counts[Resource::Stone], 2);
    /// assert_eq!(counts.total(), 3);
    /// ```
    #[must_use]
    pub fn from_pairs(pairs: &[(Resource, u32)]) -> Self {
        let mut counts = Self::new();
        for &(resource, amount) in pairs {
            counts[resource] += amount;
        }
        counts
    }

    #[must_use]
    pub fn get(&self, resource: Resource) -> u32 {
        self.0[resource.index()]
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Iterate `(resource, count)` in `Resource::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL.into_iter().map(|r| (r, self.get(r)))
    }

    /// Subtract without going below zero.
    pub fn saturating_sub_assign(&mut self, other: &ResourceCounts) {
        for r in Resource::ALL {
            self[r] = self[r].saturating_sub(other[r]);
        }
    }
}

impl Index<Resource> for ResourceCounts {
    type Output = u32;

    fn index(&self, resource: Resource) -> &u32 {
        &self.0[resource.index()]
    }
}

impl IndexMut<Resource> for ResourceCounts {
    fn index_mut(&mut self, resource: Resource) -> &mut u32 {
        &mut self.0[resource.index()]
    }
}

impl AddAssign<&ResourceCounts> for ResourceCounts {
    fn add_assign(&mut self, other: &ResourceCounts) {
        for r in Resource::ALL {
            self[r] += other[r];
        }
    }
}

impl SubAssign<&ResourceCounts> for ResourceCounts {
    fn sub_assign(&mut self, other: &ResourceCounts) {
        self.saturating_sub_assign(other);
    }
}

/// A grant that produces one unit of any of several kinds per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointResource {
    PaperOrGlass,
    WoodClayStone,
}

impl JointResource {
    /// Allocation order: manufactured goods first.
    pub const ALL: [JointResource; 2] = [JointResource::PaperOrGlass, JointResource::WoodClayStone];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Kinds this grant can stand in for, in `Resource::ALL` order.
    #[must_use]
    pub const fn covers(self) -> &'static [Resource] {
        match self {
            JointResource::PaperOrGlass => &[Resource::Paper, Resource::Glass],
            JointResource::WoodClayStone => &[Resource::Clay, Resource::Wood, Resource::Stone],
        }
    }

    #[must_use]
    pub const fn encoding(self) -> &'static str {
        match self {
            JointResource::PaperOrGlass => "P/G",
            JointResource::WoodClayStone => "W/C/S",
        }
    }

    #[must_use]
    pub fn from_encoding(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|j| j.encoding() == raw)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointCounts([u32; 2]);

impl JointCounts {
    #[must_use]
    pub fn get(&self, joint: JointResource) -> u32 {
        self.0[joint.index()]
    }

    pub fn add(&mut self, joint: JointResource, amount: u32) {
        self.0[joint.index()] += amount;
    }

    pub fn remove(&mut self, joint: JointResource, amount: u32) {
        self.0[joint.index()] = self.0[joint.index()].saturating_sub(amount);
    }
}

/// The seven science symbols. `Law` only ever comes from a progress token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScienceSymbol {
    SetSquare,
    Wheel,
    Quill,
    Mortar,
    Sundial,
    Astrolabe,
    Law,
}

impl ScienceSymbol {
    pub const ALL: [ScienceSymbol; 7] = [
        ScienceSymbol::SetSquare,
        ScienceSymbol::Wheel,
        ScienceSymbol::Quill,
        ScienceSymbol::Mortar,
        ScienceSymbol::Sundial,
        ScienceSymbol::Astrolabe,
        ScienceSymbol::Law,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_digit(digit: char) -> Option<Self> {
        let n = digit.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }
}

/// Symbol counts for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScienceCounts([u32; 7]);

impl ScienceCounts {
    #[must_use]
    pub fn get(&self, symbol: ScienceSymbol) -> u32 {
        self.0[symbol.index()]
    }

    /// Add one symbol and return the new count.
    pub fn add(&mut self, symbol: ScienceSymbol) -> u32 {
        self.0[symbol.index()] += 1;
        self.0[symbol.index()]
    }

    pub fn remove(&mut self, symbol: ScienceSymbol) {
        self.0[symbol.index()] = self.0[symbol.index()].saturating_sub(1);
    }

    /// Number of different symbols held.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|&&n| n > 0).count()
    }
}

/// A parsed construction cost.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub resources: ResourceCounts,
    pub coins: u32,
    raw: String,
}

impl Cost {
    /// Parse a cost encoding such as `"$$GP"`.
    pub fn parse(raw: &str) -> Result<Self, EncodingError> {
        let mut resources = ResourceCounts::new();
        let mut coins = 0;

        for symbol in raw.chars() {
            if symbol == '$' {
                coins += 1;
            } else if let Some(resource) = Resource::from_symbol(symbol) {
                resources[resource] += 1;
            } else {
                return Err(EncodingError::UnknownSymbol {
                    field: "cost",
                    symbol,
                    encoding: raw.to_string(),
                });
            }
        }

        Ok(Self {
            resources,
            coins,
            raw: raw.to_string(),
        })
    }

    /// The encoding this cost was parsed from.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.raw.is_empty()
    }

    #[must_use]
    pub fn is_coins_only(&self) -> bool {
        self.coins > 0 && self.resources.is_empty()
    }

    /// Resource units plus coin units.
    #[must_use]
    pub fn units(&self) -> u32 {
        self.resources.total() + self.coins
    }
}

/// What a constructed card or wonder grants every turn from then on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passive {
    pub resources: ResourceCounts,
    pub joint: Option<JointResource>,
    pub science: Option<ScienceSymbol>,
}

impl Passive {
    pub fn parse(raw: &str) -> Result<Self, EncodingError> {
        let mut passive = Self::default();
        if raw.is_empty() {
            return Ok(passive);
        }

        if raw.contains('/') {
            passive.joint = Some(JointResource::from_encoding(raw).ok_or_else(|| {
                EncodingError::UnknownTerm {
                    field: "passive",
                    term: raw.to_string(),
                }
            })?);
            return Ok(passive);
        }

        for symbol in raw.chars() {
            if let Some(resource) = Resource::from_symbol(symbol) {
                passive.resources[resource] += 1;
            } else if let (None, Some(science)) = (passive.science, ScienceSymbol::from_digit(symbol)) {
                passive.science = Some(science);
            } else {
                return Err(EncodingError::UnknownSymbol {
                    field: "passive",
                    symbol,
                    encoding: raw.to_string(),
                });
            }
        }

        Ok(passive)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.joint.is_none() && self.science.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_cost() {
        let cost = Cost::parse("$$GP").unwrap();

        assert_eq!(cost.coins, 2);
        assert_eq!(cost.resources[Resource::Glass], 1);
        assert_eq!(cost.resources[Resource::Paper], 1);
        assert_eq!(cost.units(), 4);
        assert!(!cost.is_free());
        assert!(!cost.is_coins_only());
    }

    #[test]
    fn test_parse_free_and_coin_costs() {
        assert!(Cost::parse("").unwrap().is_free());

        let coins = Cost::parse("$$$$").unwrap();
        assert!(coins.is_coins_only());
        assert_eq!(coins.coins, 4);
    }

    #[test]
    fn test_parse_cost_rejects_unknown_symbol() {
        let err = Cost::parse("SX").unwrap_err();
        assert_eq!(
            err,
            EncodingError::UnknownSymbol {
                field: "cost",
                symbol: 'X',
                encoding: "SX".into(),
            }
        );
    }

    #[test]
    fn test_parse_passives() {
        let wood = Passive::parse("WW").unwrap();
        assert_eq!(wood.resources[Resource::Wood], 2);

        let joint = Passive::parse("W/C/S").unwrap();
        assert_eq!(joint.joint, Some(JointResource::WoodClayStone));

        let science = Passive::parse("4").unwrap();
        assert_eq!(science.science, Some(ScienceSymbol::Mortar));

        assert!(Passive::parse("").unwrap().is_empty());
        assert!(Passive::parse("P/W").is_err());
        assert!(Passive::parse("9").is_err());
    }

    #[test]
    fn test_joint_covers_in_resource_order() {
        assert_eq!(
            JointResource::WoodClayStone.covers(),
            &[Resource::Clay, Resource::Wood, Resource::Stone]
        );
        assert_eq!(
            JointResource::PaperOrGlass.covers(),
            &[Resource::Paper, Resource::Glass]
        );
    }

    #[test]
    fn test_science_counts() {
        let mut counts = ScienceCounts::default();
        assert_eq!(counts.add(ScienceSymbol::Wheel), 1);
        assert_eq!(counts.add(ScienceSymbol::Wheel), 2);
        counts.add(ScienceSymbol::Law);
        assert_eq!(counts.distinct(), 2);
    }

    #[test]
    fn test_saturating_sub() {
        let mut base = ResourceCounts::from_pairs(&[(Resource::Clay, 1)]);
        base -= &ResourceCounts::from_pairs(&[(Resource::Clay, 2), (Resource::Wood, 1)]);
        assert!(base.is_empty());
    }
}
