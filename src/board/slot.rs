//! A single board position.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;

use super::layout::SlotTemplate;

/// One position of an age's card structure.
///
/// `visible` and `selectable` only ever go from `false` to `true`, and
/// `covered_by` only ever shrinks. A slot is selectable exactly when nothing
/// covers it and it still holds a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    position: usize,
    age: u8,
    row: u8,
    occupant: Option<CardId>,
    visible: bool,
    selectable: bool,
    covered_by: SmallVec<[usize; 2]>,
}

impl Slot {
    pub(crate) fn deal(age: u8, template: &SlotTemplate, card: CardId) -> Self {
        Self {
            position: template.position,
            age,
            row: template.row,
            occupant: Some(card),
            visible: template.visible,
            selectable: false,
            covered_by: template.covered_by.clone(),
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[must_use]
    pub fn row(&self) -> u8 {
        self.row
    }

    #[must_use]
    pub fn occupant(&self) -> Option<CardId> {
        self.occupant
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.selectable && self.occupant.is_some()
    }

    /// Positions still covering this slot.
    #[must_use]
    pub fn covered_by(&self) -> &[usize] {
        &self.covered_by
    }

    /// The card, if the slot is face-up and holds one.
    #[must_use]
    pub fn visible_card(&self) -> Option<CardId> {
        self.occupant.filter(|_| self.visible)
    }

    pub(crate) fn take(&mut self) -> Option<CardId> {
        self.occupant.take()
    }

    /// Drop coverers that no longer hold a card. Returns `true` if the slot
    /// has just become uncovered (and is therefore now visible and
    /// selectable).
    pub(crate) fn uncover(&mut self, is_empty: impl Fn(usize) -> bool) -> bool {
        self.covered_by.retain(|p| !is_empty(*p));
        if self.covered_by.is_empty() && !self.selectable {
            self.visible = true;
            self.selectable = true;
            return true;
        }
        false
    }
}
