//! Property tests for the cost engine and board propagation.

use proptest::prelude::*;

use duel_engine::cards::{Catalog, JointResource, Resource, ResourceCounts};
use duel_engine::core::{PlayerId, PlayerState};
use duel_engine::cost::{cost_breakdown, Pricing};
use duel_engine::game::GameBuilder;
use duel_engine::rules::RulesEngine;

fn counts() -> impl Strategy<Value = ResourceCounts> {
    prop::array::uniform5(0u32..4).prop_map(|values| {
        let mut counts = ResourceCounts::new();
        for (r, n) in Resource::ALL.into_iter().zip(values) {
            counts[r] = n;
        }
        counts
    })
}

fn city(id: u8, base: ResourceCounts, wonder: ResourceCounts, joints: (u32, u32)) -> PlayerState {
    let mut player = PlayerState::new(PlayerId::new(id), 7);
    player.base = base;
    player.wonder = wonder;
    player.wonder_joint.add(JointResource::PaperOrGlass, joints.0);
    player.wonder_joint.add(JointResource::WoodClayStone, joints.1);
    player
}

proptest! {
    #[test]
    fn prop_cost_is_pure(
        card in 0usize..73,
        base in counts(),
        wonder in counts(),
        opponent in counts(),
        joints in (0u32..3, 0u32..3),
    ) {
        let catalog = Catalog::standard().unwrap();
        let card = catalog.cards().nth(card).unwrap();
        let me = city(0, base, wonder, joints);
        let them = city(1, opponent, ResourceCounts::new(), (0, 0));
        let (me_before, them_before) = (me.clone(), them.clone());

        let first = cost_breakdown(&me, &them, card, Pricing::default());
        let second = cost_breakdown(&me, &them, card, Pricing::default());

        prop_assert_eq!(first, second);
        prop_assert_eq!(first.coins, card.cost.coins.min(first.total()));
        prop_assert_eq!(me, me_before);
        prop_assert_eq!(them, them_before);
    }

    #[test]
    fn prop_opponent_production_never_lowers_cost(
        card in 0usize..73,
        base in counts(),
        opponent in counts(),
        extra in 0usize..5,
    ) {
        let catalog = Catalog::standard().unwrap();
        let card = catalog.cards().nth(card).unwrap();
        let me = city(0, base, ResourceCounts::new(), (1, 1));
        let mut them = city(1, opponent, ResourceCounts::new(), (0, 0));

        let before = cost_breakdown(&me, &them, card, Pricing::default()).total();
        them.base[Resource::ALL[extra]] += 1;
        let after = cost_breakdown(&me, &them, card, Pricing::default()).total();

        prop_assert!(after >= before);
    }

    #[test]
    fn prop_own_production_never_raises_cost(
        card in 0usize..73,
        base in counts(),
        opponent in counts(),
        extra in 0usize..5,
    ) {
        let catalog = Catalog::standard().unwrap();
        let card = catalog.cards().nth(card).unwrap();
        let mut me = city(0, base, ResourceCounts::new(), (0, 0));
        let them = city(1, opponent, ResourceCounts::new(), (0, 0));

        let before = cost_breakdown(&me, &them, card, Pricing::default()).total();
        me.base[Resource::ALL[extra]] += 1;
        let after = cost_breakdown(&me, &them, card, Pricing::default()).total();

        prop_assert!(after <= before);
    }

    #[test]
    fn prop_board_flags_never_revert(seed in 0u64..500, picks in prop::collection::vec(0usize..64, 1..40)) {
        let mut game = GameBuilder::new().seed(seed).build_drafted().unwrap();

        for pick in picks {
            if game.result().is_some() {
                break;
            }
            let age = game.age();
            let flags: Vec<_> = game
                .state()
                .board()
                .slots()
                .map(|s| (s.is_visible(), s.is_selectable() || s.is_empty()))
                .collect();

            let moves = game.legal_moves().to_vec();
            game.make_move(&moves[pick % moves.len()]).unwrap();

            if game.age() != age {
                continue;
            }
            for (slot, (visible, open)) in game.state().board().slots().zip(flags) {
                prop_assert!(!visible || slot.is_visible());
                prop_assert!(!open || slot.is_selectable() || slot.is_empty());
                prop_assert!(slot.covered_by().is_empty() || !slot.is_selectable());
            }
        }
    }
}
