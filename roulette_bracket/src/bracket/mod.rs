//! Single-elimination bracket engine.
//!
//! This module provides:
//! - Bracket generation with random seeding and bye placement
//! - Match resolution with slot transfer from loser to winner
//! - Advancement of winners into the next round
//!
//! Resolution is copy-on-write: [`Bracket::resolve`] returns a new bracket
//! and leaves the one it was called on untouched.
//!
//! ## Example
//!
//! ```
//! use roulette_bracket::bracket::{Entrant, generate};
//!
//! let entrants = vec![
//!     Entrant::new("Alice", 3),
//!     Entrant::new("Bob", 1),
//!     Entrant::new("Carol", 2),
//! ];
//!
//! let bracket = generate(&entrants);
//! assert_eq!(bracket.rounds().len(), 2);
//! assert_eq!(bracket.bye_count(), 1);
//!
//! let at = bracket.playable_matches()[0];
//! let (first, _) = bracket.contenders(at).unwrap();
//! let next = bracket.resolve(at, first).unwrap();
//! assert!(next.rounds()[0].is_complete());
//! ```

pub mod errors;
pub mod generator;
pub mod models;
pub mod resolver;

pub use errors::{BracketError, BracketResult};
pub use generator::{
    MIN_PARTICIPANTS, bracket_size, generate, generate_with_rng, round_count, shuffled,
    try_generate, try_generate_with_rng,
};
pub use models::{
    Bracket, Entrant, Match, MatchId, MatchRef, Participant, ParticipantId, Round, Slots,
};
pub use resolver::Resolution;
