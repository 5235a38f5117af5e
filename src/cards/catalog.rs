//! The immutable catalog of cards, wonders, tokens and slot layouts.
//!
//! A `Catalog` is built once from flat records, validated, and then shared
//! by any number of games (`Arc<Catalog>`). Nothing in it changes during
//! play; games refer to its entries by `CardId`, `WonderId` and `TokenId`.
//!
//! ## Loading
//!
//! - `Catalog::from_records` takes already-deserialized records.
//! - `Catalog::from_json` parses four JSON arrays.
//! - `Catalog::standard` loads the data set compiled into the crate.
//!
//! ```
//! use duel_engine::cards::{AgePool, Catalog};
//!
//! let catalog = Catalog::standard().unwrap();
//! assert_eq!(catalog.pool(AgePool::Guild).len(), 7);
//! assert!(catalog.card_by_name("Scriptorium").is_some());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{Layout, SlotRecord};
use crate::core::{CatalogError, ConfigError, EncodingError};

use super::definition::{AgePool, Card, CardId, Category, Token, TokenId, Wonder, WonderId};
use super::effects::{Effect, TokenEffect, VictoryPoints, WonderSpecial};
use super::resources::{Cost, Passive};

const STANDARD_CARDS: &str = include_str!("../../data/cards.json");
const STANDARD_WONDERS: &str = include_str!("../../data/wonders.json");
const STANDARD_TOKENS: &str = include_str!("../../data/tokens.json");
const STANDARD_LAYOUT: &str = include_str!("../../data/layout.json");

/// Flat card record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    #[serde(default)]
    pub set: String,
    pub age: String,
    pub category: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub passive: String,
    #[serde(default)]
    pub on_play: String,
    #[serde(default)]
    pub victory_points: String,
    #[serde(default)]
    pub prerequisite: String,
}

/// Flat wonder record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WonderRecord {
    pub name: String,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub passive: String,
    #[serde(default)]
    pub on_play: String,
    #[serde(default)]
    pub victory_points: String,
    #[serde(default)]
    pub special: String,
    #[serde(default)]
    pub play_again: bool,
}

/// Flat progress token record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub name: String,
    #[serde(default)]
    pub set: String,
    pub effect: String,
}

#[derive(Clone, Debug)]
pub struct Catalog {
    cards: Vec<Card>,
    wonders: Vec<Wonder>,
    tokens: Vec<Token>,
    layouts: Vec<Layout>,
    card_names: FxHashMap<String, CardId>,
    wonder_names: FxHashMap<String, WonderId>,
    token_names: FxHashMap<String, TokenId>,
}

impl Catalog {
    /// Build a catalog from flat records.
    pub fn from_records(
        cards: &[CardRecord],
        wonders: &[WonderRecord],
        tokens: &[TokenRecord],
        slots: &[SlotRecord],
    ) -> Result<Self, CatalogError> {
        check_len("card", cards.len(), usize::from(u16::MAX) + 1)?;
        check_len("wonder", wonders.len(), usize::from(u8::MAX) + 1)?;
        check_len("token", tokens.len(), usize::from(u8::MAX) + 1)?;

        let card_names = index_names("card", cards.iter().map(|c| c.name.as_str()), |i| {
            CardId::new(i as u16)
        })?;
        let wonder_names = index_names("wonder", wonders.iter().map(|w| w.name.as_str()), |i| {
            WonderId::new(i as u8)
        })?;
        let token_names = index_names("token", tokens.iter().map(|t| t.name.as_str()), |i| {
            TokenId::new(i as u8)
        })?;

        let cards = cards
            .iter()
            .enumerate()
            .map(|(i, record)| parse_card(CardId::new(i as u16), record, &card_names))
            .collect::<Result<Vec<_>, _>>()?;

        let wonders = wonders
            .iter()
            .enumerate()
            .map(|(i, record)| parse_wonder(WonderId::new(i as u8), record))
            .collect::<Result<Vec<_>, _>>()?;

        let tokens = tokens
            .iter()
            .enumerate()
            .map(|(i, record)| {
                Ok(Token {
                    id: TokenId::new(i as u8),
                    name: record.name.clone(),
                    effect: TokenEffect::parse(&record.effect)
                        .map_err(|e| CatalogError::encoding(&record.name, e))?,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let ages = slots.iter().map(|s| s.age).max().unwrap_or(0);
        let layouts = (1..=ages)
            .map(|age| {
                let records: Vec<&SlotRecord> = slots.iter().filter(|s| s.age == age).collect();
                Layout::from_records(age, &records)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            cards = cards.len(),
            wonders = wonders.len(),
            tokens = tokens.len(),
            ages = layouts.len(),
            "catalog built"
        );

        Ok(Self {
            cards,
            wonders,
            tokens,
            layouts,
            card_names,
            wonder_names,
            token_names,
        })
    }

    /// Build a catalog from JSON arrays of records.
    pub fn from_json(
        cards: &str,
        wonders: &str,
        tokens: &str,
        slots: &str,
    ) -> Result<Self, CatalogError> {
        let cards: Vec<CardRecord> = serde_json::from_str(cards)?;
        let wonders: Vec<WonderRecord> = serde_json::from_str(wonders)?;
        let tokens: Vec<TokenRecord> = serde_json::from_str(tokens)?;
        let slots: Vec<SlotRecord> = serde_json::from_str(slots)?;
        Self::from_records(&cards, &wonders, &tokens, &slots)
    }

    /// The standard data set: 73 cards, 12 wonders, 10 tokens, three
    /// 20-slot layouts.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_json(
            STANDARD_CARDS,
            STANDARD_WONDERS,
            STANDARD_TOKENS,
            STANDARD_LAYOUT,
        )
    }

    /// Get a card by ID.
    ///
    /// Panics on an ID from another catalog.
    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.index()]
    }

    #[must_use]
    pub fn wonder(&self, id: WonderId) -> &Wonder {
        &self.wonders[id.index()]
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn wonders(&self) -> impl Iterator<Item = &Wonder> {
        self.wonders.iter()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    #[must_use]
    pub fn card_by_name(&self, name: &str) -> Option<CardId> {
        self.card_names.get(name).copied()
    }

    #[must_use]
    pub fn wonder_by_name(&self, name: &str) -> Option<WonderId> {
        self.wonder_names.get(name).copied()
    }

    #[must_use]
    pub fn token_by_name(&self, name: &str) -> Option<TokenId> {
        self.token_names.get(name).copied()
    }

    /// Every card of a pool, in catalog order.
    #[must_use]
    pub fn pool(&self, pool: AgePool) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| c.age == pool)
            .map(|c| c.id)
            .collect()
    }

    /// The slot layout of `age` (1-based).
    pub fn layout(&self, age: u8) -> Result<&Layout, ConfigError> {
        age.checked_sub(1)
            .and_then(|i| self.layouts.get(i as usize))
            .ok_or(ConfigError::UnknownAge(age))
    }

    #[must_use]
    pub fn wonder_count(&self) -> usize {
        self.wonders.len()
    }

    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// IDs are indices; a record past the ID range is rejected.
fn check_len(kind: &'static str, count: usize, max: usize) -> Result<(), CatalogError> {
    if count > max {
        return Err(CatalogError::TooManyRecords { kind, count, max });
    }
    Ok(())
}

fn index_names<'a, Id: Copy>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
    make_id: impl Fn(usize) -> Id,
) -> Result<FxHashMap<String, Id>, CatalogError> {
    let mut index = FxHashMap::default();
    for (i, name) in names.enumerate() {
        if index.insert(name.to_string(), make_id(i)).is_some() {
            return Err(CatalogError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(index)
}

fn parse_card(
    id: CardId,
    record: &CardRecord,
    names: &FxHashMap<String, CardId>,
) -> Result<Card, CatalogError> {
    let fail = |e: EncodingError| CatalogError::encoding(&record.name, e);

    let age = AgePool::from_label(&record.age).ok_or_else(|| {
        fail(EncodingError::UnknownTerm {
            field: "age",
            term: record.age.clone(),
        })
    })?;
    let category = Category::from_name(&record.category).ok_or_else(|| {
        fail(EncodingError::UnknownTerm {
            field: "category",
            term: record.category.clone(),
        })
    })?;

    let prerequisite = match record.prerequisite.as_str() {
        "" => None,
        name => Some(names.get(name).copied().ok_or_else(|| {
            CatalogError::UnknownPrerequisite {
                card: record.name.clone(),
                prerequisite: name.to_string(),
            }
        })?),
    };

    Ok(Card {
        id,
        name: record.name.clone(),
        age,
        category,
        cost: Cost::parse(&record.cost).map_err(fail)?,
        passive: Passive::parse(&record.passive).map_err(fail)?,
        effects: Effect::parse_list(&record.on_play).map_err(fail)?,
        victory_points: VictoryPoints::parse(&record.victory_points).map_err(fail)?,
        prerequisite,
    })
}

fn parse_wonder(id: WonderId, record: &WonderRecord) -> Result<Wonder, CatalogError> {
    let fail = |e: EncodingError| CatalogError::encoding(&record.name, e);

    Ok(Wonder {
        id,
        name: record.name.clone(),
        cost: Cost::parse(&record.cost).map_err(fail)?,
        passive: Passive::parse(&record.passive).map_err(fail)?,
        effects: Effect::parse_list(&record.on_play).map_err(fail)?,
        victory_points: VictoryPoints::parse(&record.victory_points).map_err(fail)?,
        special: WonderSpecial::parse(&record.special).map_err(fail)?,
        play_again: record.play_again,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Resource, ScienceSymbol};

    fn card_record(name: &str, cost: &str, prerequisite: &str) -> CardRecord {
        CardRecord {
            name: name.to_string(),
            set: "Base".to_string(),
            age: "1".to_string(),
            category: "Blue".to_string(),
            cost: cost.to_string(),
            passive: String::new(),
            on_play: String::new(),
            victory_points: "3".to_string(),
            prerequisite: prerequisite.to_string(),
        }
    }

    #[test]
    fn test_standard_catalog_sizes() {
        let catalog = Catalog::standard().unwrap();

        assert_eq!(catalog.cards().count(), 73);
        assert_eq!(catalog.wonder_count(), 12);
        assert_eq!(catalog.token_count(), 10);
        assert_eq!(catalog.pool(AgePool::First).len(), 23);
        assert_eq!(catalog.pool(AgePool::Second).len(), 23);
        assert_eq!(catalog.pool(AgePool::Third).len(), 20);
        assert_eq!(catalog.pool(AgePool::Guild).len(), 7);
        for age in 1..=3 {
            assert_eq!(catalog.layout(age).unwrap().len(), 20);
        }
    }

    #[test]
    fn test_cost_units_match_encoding_length() {
        let catalog = Catalog::standard().unwrap();
        for card in catalog.cards() {
            assert_eq!(
                card.cost.units() as usize,
                card.cost.raw().chars().count(),
                "{}",
                card.name
            );
        }
    }

    #[test]
    fn test_prerequisites_resolve_to_ids() {
        let catalog = Catalog::standard().unwrap();
        let statue = catalog.card(catalog.card_by_name("Statue").unwrap());
        let theater = catalog.card_by_name("Theater").unwrap();

        assert_eq!(statue.prerequisite, Some(theater));
    }

    #[test]
    fn test_standard_parsed_fields() {
        let catalog = Catalog::standard().unwrap();

        let caravansery = catalog.card(catalog.card_by_name("Caravansery").unwrap());
        assert_eq!(caravansery.category, Category::Yellow);
        assert_eq!(caravansery.cost.coins, 2);
        assert_eq!(caravansery.cost.resources[Resource::Glass], 1);

        let library = catalog.card(catalog.card_by_name("Library").unwrap());
        assert_eq!(library.passive.science, Some(ScienceSymbol::Quill));

        let zeus = catalog.wonder(catalog.wonder_by_name("The Statue of Zeus").unwrap());
        assert_eq!(zeus.special, Some(WonderSpecial::DestroyBrown));

        let law = catalog.token(catalog.token_by_name("Law").unwrap());
        assert_eq!(law.effect, TokenEffect::Law);
    }

    #[test]
    fn test_unknown_prerequisite() {
        let cards = vec![card_record("Statue", "CC", "Theater")];
        let err = Catalog::from_records(&cards, &[], &[], &[]).unwrap_err();

        assert!(matches!(err, CatalogError::UnknownPrerequisite { .. }));
    }

    #[test]
    fn test_duplicate_names() {
        let cards = vec![card_record("Altar", "", ""), card_record("Altar", "", "")];
        let err = Catalog::from_records(&cards, &[], &[], &[]).unwrap_err();

        assert!(matches!(err, CatalogError::DuplicateName { kind: "card", .. }));
    }

    #[test]
    fn test_bad_cost_names_the_record() {
        let cards = vec![card_record("Oddity", "SQ", "")];
        let err = Catalog::from_records(&cards, &[], &[], &[]).unwrap_err();

        assert!(err.to_string().contains("Oddity"));
    }

    #[test]
    fn test_too_many_tokens() {
        let tokens: Vec<_> = (0..300)
            .map(|i| TokenRecord {
                name: format!("Token {i}"),
                set: String::new(),
                effect: "Law".to_string(),
            })
            .collect();
        let err = Catalog::from_records(&[], &[], &tokens, &[]).unwrap_err();

        assert!(matches!(
            err,
            CatalogError::TooManyRecords { kind: "token", count: 300, max: 256 }
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = Catalog::from_json("[", "[]", "[]", "[]").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_unknown_layout_age() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.layout(4).unwrap_err(), ConfigError::UnknownAge(4));
    }
}
