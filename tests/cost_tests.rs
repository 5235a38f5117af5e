//! Cost arbitration tests against fixed city layouts.
//!
//! Each table row is `(card, base cost, increase per unit of opponent
//! production)` for a purchaser facing an opponent who produces one or
//! three of every resource from brown and grey cards.

use duel_engine::cards::{Catalog, JointResource, Resource, ResourceCounts};
use duel_engine::core::{PlayerId, PlayerState};
use duel_engine::cost::{cost, cost_breakdown, CostBreakdown, Pricing};

fn catalog() -> Catalog {
    Catalog::standard().expect("standard catalog loads")
}

fn uniform(n: u32) -> ResourceCounts {
    let mut counts = ResourceCounts::new();
    for r in Resource::ALL {
        counts[r] = n;
    }
    counts
}

/// A city producing `base` of every resource from cards and `wonder` from
/// wonders.
fn city(id: u8, base: u32, wonder: u32) -> PlayerState {
    let mut player = PlayerState::new(PlayerId::new(id), 7);
    player.base = uniform(base);
    player.wonder = uniform(wonder);
    player
}

fn card_cost(catalog: &Catalog, name: &str, me: &PlayerState, them: &PlayerState) -> u32 {
    let id = catalog
        .card_by_name(name)
        .unwrap_or_else(|| panic!("no card named {name}"));
    cost(me, them, catalog.card(id))
}

const EMPTY_CITY: &[(&str, u32, u32)] = &[
    ("Horse Breeders", 4, 2),
    ("Barracks", 4, 0),
    ("Library", 6, 3),
    ("Dispensary", 6, 3),
    ("Statue", 4, 2),
    ("Temple", 4, 2),
    ("Aqueduct", 6, 3),
    ("Fortifications", 8, 4),
    ("Siege Workshop", 8, 4),
    ("Circus", 8, 4),
    ("University", 6, 3),
    ("Observatory", 6, 3),
    ("Gardens", 8, 4),
    ("Pantheon", 8, 4),
    ("Senate", 8, 4),
    ("Lighthouse", 6, 3),
    ("Arena", 6, 3),
    ("Logging Camp", 1, 0),
    ("Stone Reserve", 3, 0),
    ("Lumber Yard", 0, 0),
    ("Caravansery", 6, 2),
];

const ONE_OF_EACH: &[(&str, u32, u32)] = &[
    ("Horse Breeders", 0, 0),
    ("Barracks", 4, 0),
    ("Library", 0, 0),
    ("Dispensary", 2, 1),
    ("Statue", 2, 1),
    ("Temple", 0, 0),
    ("Aqueduct", 4, 2),
    ("Fortifications", 2, 1),
    ("Siege Workshop", 4, 2),
    ("Circus", 4, 2),
    ("University", 0, 0),
    ("Observatory", 2, 1),
    ("Gardens", 4, 2),
    ("Pantheon", 2, 1),
    ("Senate", 2, 1),
    ("Lighthouse", 2, 1),
    ("Arena", 0, 0),
    ("Logging Camp", 1, 0),
    ("Stone Reserve", 3, 0),
    ("Lumber Yard", 0, 0),
    ("Caravansery", 2, 0),
];

fn check_table(table: &[(&str, u32, u32)], me: &PlayerState) {
    let catalog = catalog();
    for opponent_base in [0, 1, 3] {
        let them = city(1, opponent_base, 0);
        for &(name, base, increase) in table {
            assert_eq!(
                card_cost(&catalog, name, me, &them),
                base + opponent_base * increase,
                "{name} against {opponent_base} of each"
            );
        }
    }
}

// =============================================================================
// Trade prices
// =============================================================================

#[test]
fn test_empty_city_prices() {
    check_table(EMPTY_CITY, &city(0, 0, 0));
}

#[test]
fn test_one_of_each_from_cards() {
    check_table(ONE_OF_EACH, &city(0, 1, 0));
}

#[test]
fn test_one_of_each_from_wonders() {
    check_table(ONE_OF_EACH, &city(0, 0, 1));
}

#[test]
fn test_three_of_each_pays_coins_only() {
    let catalog = catalog();
    for me in [city(0, 3, 0), city(0, 0, 3)] {
        let them = city(1, 3, 0);
        for &(name, _, _) in EMPTY_CITY {
            let printed = catalog
                .card(catalog.card_by_name(name).unwrap())
                .cost
                .coins;
            assert_eq!(card_cost(&catalog, name, &me, &them), printed, "{name}");
        }
    }
}

#[test]
fn test_opponent_wonders_do_not_raise_prices() {
    let catalog = catalog();
    let me = city(0, 0, 0);
    let them = city(1, 0, 3);
    for &(name, base, _) in EMPTY_CITY {
        assert_eq!(card_cost(&catalog, name, &me, &them), base, "{name}");
    }
}

// =============================================================================
// Chaining
// =============================================================================

#[test]
fn test_chained_cards_are_free() {
    let catalog = catalog();
    let mut me = city(0, 0, 0);
    let prerequisites: Vec<_> = catalog.cards().filter_map(|c| c.prerequisite).collect();
    for id in prerequisites {
        me.add_card(catalog.card(id));
    }

    for them in [city(1, 0, 0), city(1, 3, 0), city(1, 0, 3)] {
        for card in catalog.cards().filter(|c| c.prerequisite.is_some()) {
            assert_eq!(cost(&me, &them, card), 0, "{}", card.name);
        }
        assert_eq!(card_cost(&catalog, "Caravansery", &me, &them), 6 + 2 * them.base[Resource::Glass]);
        assert_eq!(card_cost(&catalog, "Stone Reserve", &me, &them), 3);
    }
}

// =============================================================================
// Joint grants and breakdowns
// =============================================================================

#[test]
fn test_joint_units_are_spent_greedily() {
    let catalog = catalog();
    let mut me = city(0, 0, 0);
    let mut them = city(1, 0, 0);
    them.base[Resource::Clay] = 2;
    me.wonder_joint.add(JointResource::WoodClayStone, 1);

    // Gardens: C C W W. Clay costs 4, wood 2: the unit covers one clay.
    assert_eq!(card_cost(&catalog, "Gardens", &me, &them), 4 + 2 * 2);

    me.market_joint.add(JointResource::WoodClayStone, 1);
    assert_eq!(card_cost(&catalog, "Gardens", &me, &them), 2 * 2);
}

#[test]
fn test_breakdown_separates_printed_coins() {
    let catalog = catalog();
    let me = city(0, 0, 0);
    let them = city(1, 1, 0);
    let caravansery = catalog.card(catalog.card_by_name("Caravansery").unwrap());

    assert_eq!(
        cost_breakdown(&me, &them, caravansery, Pricing::default()),
        CostBreakdown { coins: 2, trade: 6 }
    );
}

#[test]
fn test_pricing_constants_are_configurable() {
    let catalog = catalog();
    let me = city(0, 0, 0);
    let them = city(1, 0, 0);
    let statue = catalog.card(catalog.card_by_name("Statue").unwrap());

    let pricing = Pricing {
        base_trade_price: 3,
        ..Pricing::default()
    };
    assert_eq!(cost_breakdown(&me, &them, statue, pricing).total(), 6);
}
