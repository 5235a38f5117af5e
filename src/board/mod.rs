//! Board and slot layer.
//!
//! Each age deals its cards into a fixed layout of overlapping rows. A card
//! can be taken only once every card covering it has been taken; covered
//! cards may be dealt face-down and turn face-up when uncovered.
//!
//! ## Key Types
//!
//! - `SlotRecord`, `Layout`: the static arrangement from the catalog
//! - `Slot`: one position with its occupant and visibility flags
//! - `Board`: all slots of one age
//!
//! ## Monotonicity
//!
//! Visibility and selectability never revert, covering sets only shrink and
//! occupants are only ever removed. `Board::update_all_slots` is the single
//! place flags change.

pub mod layout;
pub mod slot;

pub use layout::{Layout, SlotRecord, SlotTemplate};
pub use slot::Slot;

use serde::{Deserialize, Serialize};

use crate::cards::{Catalog, CardId};
use crate::core::{ConfigError, GameRng, RulesConfig};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    age: u8,
    slots: Vec<Slot>,
}

impl Board {
    /// Deal the cards of `age` into its layout.
    ///
    /// Draws the configured number of cards from each catalog pool without
    /// replacement, shuffles the combined draw and deals it in position
    /// order. Fails when a pool is too small or the draw does not fill the
    /// layout exactly.
    pub fn initialize(
        catalog: &Catalog,
        config: &RulesConfig,
        age: u8,
        rng: &mut GameRng,
    ) -> Result<Self, ConfigError> {
        let layout = catalog.layout(age)?;

        let mut drawn: Vec<CardId> = Vec::with_capacity(layout.len());
        for draw in config.draws_for(age)? {
            let pool = catalog.pool(draw.pool);
            if pool.len() < draw.count {
                return Err(ConfigError::PoolTooSmall {
                    age,
                    pool: draw.pool,
                    available: pool.len(),
                    required: draw.count,
                });
            }
            drawn.extend(rng.sample_indices(pool.len(), draw.count).into_iter().map(|i| pool[i]));
        }

        if drawn.len() != layout.len() {
            return Err(ConfigError::LayoutMismatch {
                age,
                drawn: drawn.len(),
                slots: layout.len(),
            });
        }

        rng.shuffle(&mut drawn);

        let slots = layout
            .slots()
            .zip(drawn)
            .map(|(template, card)| Slot::deal(age, template, card))
            .collect();

        let mut board = Self { age, slots };
        board.update_all_slots();

        tracing::debug!(age, slots = board.slots.len(), "board dealt");
        Ok(board)
    }

    #[must_use]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slot(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Slots grouped by row, bottom (accessible) row first.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<&Slot>> {
        let row_count = self.slots.iter().map(|s| s.row() as usize + 1).max().unwrap_or(0);
        let mut rows = vec![Vec::new(); row_count];
        for slot in &self.slots {
            rows[slot.row() as usize].push(slot);
        }
        rows
    }

    /// Positions currently available to take.
    pub fn selectable_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .filter(|s| s.is_selectable())
            .map(Slot::position)
    }

    /// Number of slots still holding a card.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Remove and return the card at `position`.
    ///
    /// Does not touch any flags; call `update_all_slots` afterwards.
    pub fn take(&mut self, position: usize) -> Option<CardId> {
        self.slots.get_mut(position).and_then(Slot::take)
    }

    /// Recompute coverage: drop empty coverers from every slot and mark
    /// newly uncovered slots visible and selectable.
    ///
    /// Returns the positions revealed by this call.
    pub fn update_all_slots(&mut self) -> Vec<usize> {
        let empty: Vec<bool> = self.slots.iter().map(Slot::is_empty).collect();
        let is_empty = |p: usize| empty.get(p).copied().unwrap_or(true);

        let revealed: Vec<usize> = self
            .slots
            .iter_mut()
            .filter_map(|slot| slot.uncover(is_empty).then(|| slot.position()))
            .collect();

        for &position in &revealed {
            tracing::debug!(age = self.age, position, "slot uncovered");
        }
        revealed
    }

    /// True once every slot of the age has been emptied.
    #[must_use]
    pub fn is_age_exhausted(&self) -> bool {
        self.slots.iter().all(Slot::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::AgePool;
    use crate::core::PoolDraw;

    fn board(age: u8, seed: u64) -> Board {
        let catalog = Catalog::standard().unwrap();
        Board::initialize(&catalog, &RulesConfig::default(), age, &mut GameRng::new(seed)).unwrap()
    }

    #[test]
    fn test_initial_board_age_one() {
        let board = board(1, 11);

        assert_eq!(board.len(), 20);
        assert_eq!(board.remaining(), 20);
        assert_eq!(board.selectable_positions().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);

        let rows = board.rows();
        assert_eq!(rows.iter().map(Vec::len).collect::<Vec<_>>(), vec![6, 5, 4, 3, 2]);
        assert!(rows[1].iter().all(|s| !s.is_visible()));
        assert!(rows[2].iter().all(|s| s.is_visible() && !s.is_selectable()));
    }

    #[test]
    fn test_initial_board_age_three_accessible_row() {
        let board = board(3, 5);
        assert_eq!(board.selectable_positions().count(), 2);
    }

    #[test]
    fn test_taking_both_coverers_reveals_slot() {
        let mut board = board(1, 11);

        let covered = board.slot(6).unwrap();
        assert_eq!(covered.covered_by(), &[0, 1]);
        assert!(!covered.is_visible());

        board.take(0);
        assert!(board.update_all_slots().is_empty());
        assert_eq!(board.slot(6).unwrap().covered_by(), &[1]);

        board.take(1);
        assert_eq!(board.update_all_slots(), vec![6]);
        let slot = board.slot(6).unwrap();
        assert!(slot.is_visible() && slot.is_selectable());
    }

    #[test]
    fn test_empty_slot_not_selectable() {
        let mut board = board(2, 2);
        let first = board.selectable_positions().next().unwrap();

        assert!(board.take(first).is_some());
        assert!(board.take(first).is_none());
        assert!(!board.slot(first).unwrap().is_selectable());
    }

    #[test]
    fn test_same_seed_same_deal() {
        assert_eq!(board(2, 99), board(2, 99));
        assert_ne!(board(2, 99), board(2, 100));
    }

    #[test]
    fn test_age_three_mixes_guilds() {
        let catalog = Catalog::standard().unwrap();
        let board = Board::initialize(&catalog, &RulesConfig::default(), 3, &mut GameRng::new(1)).unwrap();

        let guilds = board
            .slots()
            .filter_map(Slot::occupant)
            .filter(|&c| catalog.card(c).age == AgePool::Guild)
            .count();
        assert_eq!(guilds, 3);
    }

    #[test]
    fn test_draw_count_mismatch() {
        let catalog = Catalog::standard().unwrap();
        let config = RulesConfig::default().with_age_draws(1, vec![PoolDraw::new(AgePool::First, 19)]);

        let err = Board::initialize(&catalog, &config, 1, &mut GameRng::new(0)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::LayoutMismatch {
                age: 1,
                drawn: 19,
                slots: 20
            }
        );
    }

    #[test]
    fn test_pool_too_small() {
        let catalog = Catalog::standard().unwrap();
        let config = RulesConfig::default().with_age_draws(
            3,
            vec![PoolDraw::new(AgePool::Third, 12), PoolDraw::new(AgePool::Guild, 8)],
        );

        let err = Board::initialize(&catalog, &config, 3, &mut GameRng::new(0)).unwrap_err();
        assert!(matches!(err, ConfigError::PoolTooSmall { pool: AgePool::Guild, .. }));
    }

    #[test]
    fn test_exhaustion() {
        let mut board = board(1, 3);
        loop {
            let Some(position) = board.selectable_positions().next() else {
                break;
            };
            board.take(position);
            board.update_all_slots();
        }
        assert!(board.is_age_exhausted());
        assert_eq!(board.remaining(), 0);
    }
}
