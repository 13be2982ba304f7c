//! # Roulette Bracket
//!
//! Single-elimination tournaments decided by slot-weighted draws.
//!
//! Every participant holds a number of slots, their tickets in a two-way
//! lottery. The winner of a match absorbs the loser's slots, so favourites
//! grow stronger as they advance, but an outsider can always get lucky.
//!
//! ## Architecture
//!
//! - **Generation**: entrants are shuffled into a power-of-two bracket,
//!   padded with byes that are spread randomly over the first round
//! - **Drawing**: a [`WinnerPicker`] picks a winner; [`WeightedDraw`] is
//!   the slot-weighted lottery, seedable for reproducible runs
//! - **Resolution**: the winner takes the loser's slots and moves into
//!   the next round until one champion is left
//!
//! ## Core Modules
//!
//! - [`bracket`]: Bracket models, generation and resolution
//! - [`draw`]: Weighted winner selection and roulette strip layout
//! - [`roster`]: Parsing and validating `name,slots` participant lists
//!
//! ## Example
//!
//! ```
//! use roulette_bracket::{Roster, WeightedDraw, generate};
//!
//! let roster = Roster::parse("Alice,1\nBob,1\nCarol,1\n").unwrap();
//! let mut bracket = generate(roster.entrants());
//! let mut draw = WeightedDraw::new();
//!
//! while let Some(&at) = bracket.playable_matches().first() {
//!     let (next, _) = bracket.play(at, &mut draw).unwrap();
//!     bracket = next;
//! }
//!
//! let champion = bracket.champion().unwrap();
//! assert_eq!(champion.slots, 3);
//! ```

/// Bracket models, generation and match resolution.
pub mod bracket;
pub use bracket::{
    Bracket, BracketError, BracketResult, Entrant, Match, MatchId, MatchRef, Participant,
    ParticipantId, Resolution, Round, Slots, generate, generate_with_rng, try_generate,
};

/// Weighted draws and roulette strips.
pub mod draw;
pub use draw::{RouletteStrip, WeightedDraw, WinnerPicker, pick};

/// Participant roster import.
pub mod roster;
pub use roster::{Roster, RosterError, RosterResult};
