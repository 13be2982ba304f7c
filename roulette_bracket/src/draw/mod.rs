//! Weighted winner selection.
//!
//! A match is decided by a single draw in which each side holds as many
//! tickets as it has slots:
//! - [`WinnerPicker`] is the seam the resolver draws through
//! - [`WeightedDraw`] is the slot-weighted lottery, over any `rand` RNG
//! - [`RouletteStrip`] lays out the spin shown to players for a drawn winner
//!
//! ## Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use roulette_bracket::{Participant, ParticipantId, WeightedDraw, WinnerPicker};
//!
//! let favourite = Participant { id: ParticipantId(0), name: "Favourite".into(), slots: 9 };
//! let outsider = Participant { id: ParticipantId(1), name: "Outsider".into(), slots: 1 };
//!
//! let mut draw = WeightedDraw::with_rng(StdRng::seed_from_u64(42));
//! let winner = draw.pick(&favourite, &outsider);
//! assert!(winner == favourite.id || winner == outsider.id);
//! ```

pub mod roulette;

pub use roulette::RouletteStrip;

use crate::bracket::models::{Participant, ParticipantId};
use rand::{Rng, rngs::ThreadRng};

/// Strategy deciding the winner of a two-participant match.
pub trait WinnerPicker {
    /// Return the id of either `first` or `second`.
    fn pick(&mut self, first: &Participant, second: &Participant) -> ParticipantId;
}

impl<F> WinnerPicker for F
where
    F: FnMut(&Participant, &Participant) -> ParticipantId,
{
    fn pick(&mut self, first: &Participant, second: &Participant) -> ParticipantId {
        self(first, second)
    }
}

/// Slot-weighted lottery.
#[derive(Debug, Clone)]
pub struct WeightedDraw<R = ThreadRng> {
    rng: R,
}

impl WeightedDraw<ThreadRng> {
    /// Lottery backed by the thread-local RNG
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for WeightedDraw<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WeightedDraw<R> {
    /// Lottery backed by a caller-supplied (e.g. seeded) RNG
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> WinnerPicker for WeightedDraw<R> {
    fn pick(&mut self, first: &Participant, second: &Participant) -> ParticipantId {
        weighted_pick(first, second, &mut self.rng)
    }
}

/// Draw the winner of `first` vs `second` with the thread-local RNG.
pub fn pick(first: &Participant, second: &Participant) -> ParticipantId {
    weighted_pick(first, second, &mut rand::rng())
}

/// One uniform draw in `[0, first.slots + second.slots)`; `first` wins
/// when the draw lands below its own slot count.
pub fn weighted_pick<R: Rng + ?Sized>(
    first: &Participant,
    second: &Participant,
    rng: &mut R,
) -> ParticipantId {
    let total = u128::from(first.slots) + u128::from(second.slots);
    if total == 0 {
        log::warn!(
            "Both {} and {} hold zero slots, falling back to a coin flip",
            first.name,
            second.name
        );
        return if rng.random_bool(0.5) {
            first.id
        } else {
            second.id
        };
    }

    let ticket = rng.random_range(0..total);
    if ticket < u128::from(first.slots) {
        first.id
    } else {
        second.id
    }
}
