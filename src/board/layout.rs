//! Per-age slot layouts.
//!
//! A layout is the fixed arrangement of one age: which positions exist, the
//! row each sits in, whether it is dealt face-up, and which positions cover
//! it. Layouts come from flat `SlotRecord`s where the covering set is a
//! space-separated list of positions (`"0 1"`, or `""` when nothing covers
//! the slot).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::CatalogError;

/// Flat slot record as stored in the catalog data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub age: u8,
    pub position: usize,
    pub row: u8,
    pub visible: bool,
    #[serde(default)]
    pub covered_by: String,
}

/// One slot of a layout, before any card is dealt into it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTemplate {
    pub position: usize,
    pub row: u8,
    pub visible: bool,
    pub covered_by: SmallVec<[usize; 2]>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    age: u8,
    slots: Vec<SlotTemplate>,
}

impl Layout {
    /// Build the layout of `age` from its records.
    ///
    /// Records may come in any order but must cover positions `0..n` exactly
    /// once, and every covering reference must name another slot of the
    /// same age.
    pub fn from_records(age: u8, records: &[&SlotRecord]) -> Result<Self, CatalogError> {
        let mut sorted: Vec<&SlotRecord> = records.to_vec();
        sorted.sort_by_key(|r| r.position);

        let count = sorted.len();
        let mut slots = Vec::with_capacity(count);

        for (expected, record) in sorted.iter().enumerate() {
            let invalid = |reason: String| CatalogError::InvalidSlot {
                age,
                position: record.position,
                reason,
            };

            if record.position != expected {
                return Err(invalid(format!("expected position {expected}")));
            }

            let covered_by = record
                .covered_by
                .split_whitespace()
                .map(|p| {
                    p.parse::<usize>()
                        .map_err(|_| invalid(format!("bad covering reference \"{p}\"")))
                })
                .collect::<Result<SmallVec<[usize; 2]>, _>>()?;

            if let Some(&bad) = covered_by.iter().find(|&&p| p >= count || p == record.position) {
                return Err(invalid(format!("covering reference {bad} is not another slot")));
            }

            slots.push(SlotTemplate {
                position: record.position,
                row: record.row,
                visible: record.visible,
                covered_by,
            });
        }

        Ok(Self { age, slots })
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

    pub fn slots(&self) -> impl Iterator<Item = &SlotTemplate> {
        self.slots.iter()
    }
}
