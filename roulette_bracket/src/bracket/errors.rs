//! Error types for bracket generation and match resolution.

use super::models::{MatchId, MatchRef, ParticipantId};
use thiserror::Error;

/// Bracket errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// Not enough entrants to play a single match
    #[error("Insufficient participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    #[error("Match not found: {0}")]
    MatchNotFound(MatchRef),

    #[error("Match {0} is a bye and cannot be drawn")]
    ByeMatch(MatchId),

    #[error("Match {0} has already been decided")]
    AlreadyDecided(MatchId),

    #[error("Match {0} is still waiting for a participant")]
    MissingParticipant(MatchId),

    #[error("Participant {participant} is not playing in match {match_id}")]
    NotAParticipant {
        match_id: MatchId,
        participant: ParticipantId,
    },

    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    /// Advancement left the bracket. Generation and resolution disagree on
    /// the pairing scheme.
    #[error("Advancing from {from} points outside the bracket ({destination})")]
    DestinationOutOfBounds { from: MatchRef, destination: MatchRef },

    #[error("Slot {slot} of match {match_id} is already taken")]
    SlotOccupied { match_id: MatchId, slot: usize },

    #[error("Slot count overflow when {winner} absorbs {loser}")]
    SlotOverflow {
        winner: ParticipantId,
        loser: ParticipantId,
    },
}

impl BracketError {
    /// Misuse at the call site: the match cannot be resolved as requested.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            BracketError::MatchNotFound(_)
                | BracketError::ByeMatch(_)
                | BracketError::AlreadyDecided(_)
                | BracketError::MissingParticipant(_)
                | BracketError::NotAParticipant { .. }
                | BracketError::ParticipantNotFound(_)
        )
    }

    /// The bracket itself is corrupt. Not recoverable.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            BracketError::DestinationOutOfBounds { .. }
                | BracketError::SlotOccupied { .. }
                | BracketError::SlotOverflow { .. }
        )
    }
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
