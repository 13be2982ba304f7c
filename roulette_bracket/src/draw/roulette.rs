//! Roulette strip layout for presenting a drawn winner.
//!
//! The winner is decided by the weighted draw first; the strip only
//! decides where the spin stops. Entries are shuffled and the stop is
//! picked at random among the winner's entries near the end of the strip,
//! so the winner does not always land in the same, predictable spot.

use crate::bracket::models::{Participant, ParticipantId, Slots};
use rand::{
    Rng,
    seq::{IndexedRandom, SliceRandom},
};
use serde::{Deserialize, Serialize};

/// Shortest strip worth spinning
pub const MIN_STRIP_LEN: usize = 100;

/// Number of trailing entries the spin may stop on
pub const LANDING_WINDOW: usize = 30;

/// Upper bound on entries in one pass of the strip. Larger slot counts are
/// scaled down proportionally, keeping at least one entry per side.
pub const MAX_BASE_ENTRIES: usize = 1_000;

/// A laid-out spin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouletteStrip {
    entries: Vec<ParticipantId>,
    landing_index: usize,
}

impl RouletteStrip {
    /// Lay out a strip for `first` vs `second` that stops on `winner`.
    ///
    /// # Arguments
    ///
    /// * `first` - First participant of the match
    /// * `second` - Second participant of the match
    /// * `winner` - Already-drawn winner (one of the two)
    /// * `rng` - Source for the entry shuffle and the stop position
    pub fn spin<R: Rng + ?Sized>(
        first: &Participant,
        second: &Participant,
        winner: ParticipantId,
        rng: &mut R,
    ) -> Self {
        let (first_count, second_count) = entry_counts(first.slots, second.slots);

        let mut base: Vec<ParticipantId> = std::iter::repeat_n(first.id, first_count)
            .chain(std::iter::repeat_n(second.id, second_count))
            .collect();
        base.shuffle(rng);

        let mut entries = base.clone();
        while entries.len() < MIN_STRIP_LEN {
            entries.extend_from_slice(&base);
        }

        let landing_index = landing_index(&entries, winner, rng);
        Self {
            entries,
            landing_index,
        }
    }

    pub fn entries(&self) -> &[ParticipantId] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn landing_index(&self) -> usize {
        self.landing_index
    }

    /// Entry under the marker when the spin stops
    pub fn landed_on(&self) -> Option<ParticipantId> {
        self.entries.get(self.landing_index).copied()
    }
}

fn entry_counts(first: Slots, second: Slots) -> (usize, usize) {
    let total = u128::from(first) + u128::from(second);
    if total == 0 {
        log::warn!("Both sides hold 0 slots, giving each one entry");
        return (1, 1);
    }

    let cap = MAX_BASE_ENTRIES as u128;
    if total <= cap {
        return (first as usize, second as usize);
    }

    let scale = |slots: Slots| ((u128::from(slots) * cap / total) as usize).max(1);
    (scale(first), scale(second))
}

fn landing_index<R: Rng + ?Sized>(entries: &[ParticipantId], winner: ParticipantId, rng: &mut R) -> usize {
    let window_start = entries.len().saturating_sub(LANDING_WINDOW);
    let candidates: Vec<usize> = (window_start..entries.len())
        .filter(|&idx| entries[idx] == winner)
        .collect();

    if let Some(&idx) = candidates.choose(rng) {
        return idx;
    }

    entries
        .iter()
        .position(|&id| id == winner)
        .unwrap_or_else(|| {
            log::warn!("{} is not on the strip, stopping mid-strip", winner);
            entries.len() / 2
        })
}
