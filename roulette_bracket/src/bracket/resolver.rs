//! Match resolution: slot transfer and advancement of winners.

use super::errors::{BracketError, BracketResult};
use super::models::{Bracket, MatchId, MatchRef, ParticipantId, Slots};
use crate::draw::WinnerPicker;
use serde::{Deserialize, Serialize};

/// What a single resolution changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub match_id: MatchId,
    pub winner: ParticipantId,
    pub loser: ParticipantId,
    /// Slots moved from the loser to the winner
    pub transferred: Slots,
    /// Winner's slot count after the transfer
    pub winner_slots: Slots,
    /// Match the winner now waits in, if the tournament goes on
    pub advanced_to: Option<MatchRef>,
    /// Set when this resolution decided the final
    pub champion: Option<ParticipantId>,
}

impl Bracket {
    /// Resolve a match and return the updated bracket.
    ///
    /// `self` is left untouched, so holders of the previous bracket never
    /// see the match resolve.
    pub fn resolve(&self, at: MatchRef, winner: ParticipantId) -> BracketResult<Bracket> {
        let mut next = self.clone();
        next.resolve_in_place(at, winner)?;
        Ok(next)
    }

    /// Draw the winner of a match with `picker`, then resolve it.
    pub fn play<P: WinnerPicker + ?Sized>(
        &self,
        at: MatchRef,
        picker: &mut P,
    ) -> BracketResult<(Bracket, Resolution)> {
        let (first, second) = self.contenders(at)?;
        let winner = {
            let first = self.participant(first).ok_or(BracketError::ParticipantNotFound(first))?;
            let second = self
                .participant(second)
                .ok_or(BracketError::ParticipantNotFound(second))?;
            picker.pick(first, second)
        };

        let mut next = self.clone();
        let resolution = next.resolve_in_place(at, winner)?;
        Ok((next, resolution))
    }

    /// Resolve a match on a bracket the caller owns exclusively.
    ///
    /// Every check runs before anything is written, so an error leaves the
    /// bracket exactly as it was.
    ///
    /// # Errors
    ///
    /// Precondition errors when the match is missing, a bye, already
    /// decided, not yet filled, or `winner` is not one of its participants.
    /// Structural errors when advancement leaves the bracket, the next slot
    /// is already taken, or the slot count would overflow.
    pub fn resolve_in_place(
        &mut self,
        at: MatchRef,
        winner: ParticipantId,
    ) -> BracketResult<Resolution> {
        let (first, second) = self.contenders(at)?;
        let match_id = self.match_id(at)?;

        let loser = if winner == first {
            second
        } else if winner == second {
            first
        } else {
            return Err(BracketError::NotAParticipant {
                match_id,
                participant: winner,
            });
        };

        let winner_slots = self
            .participant(winner)
            .ok_or(BracketError::ParticipantNotFound(winner))?
            .slots;
        let transferred = self
            .participant(loser)
            .ok_or(BracketError::ParticipantNotFound(loser))?
            .slots;
        let new_slots = winner_slots
            .checked_add(transferred)
            .ok_or(BracketError::SlotOverflow { winner, loser })?;

        let path = self.advancement_path(at)?;

        // Validated; from here on nothing fails.
        self.participants[winner.0].slots = new_slots;
        self.rounds[at.round_index].matches[at.match_index].winner = Some(winner);

        let mut champion = path.is_empty().then_some(winner);
        for &(dest, slot) in &path {
            let is_final = dest.round_index + 1 == self.rounds.len();
            let m = &mut self.rounds[dest.round_index].matches[dest.match_index];
            m.participants[slot] = Some(winner);
            if m.is_bye {
                m.winner = Some(winner);
                if is_final {
                    champion = Some(winner);
                }
            }
        }
        let advanced_to = path.last().map(|&(dest, _)| dest).filter(|_| champion.is_none());

        log::info!(
            "{}: {} beat {} and now holds {} slot(s)",
            match_id,
            self.participants[winner.0].name,
            self.participants[loser.0].name,
            new_slots
        );
        if champion.is_some() {
            log::info!(
                "Tournament winner: {} with {} slot(s)",
                self.participants[winner.0].name,
                new_slots
            );
        }

        Ok(Resolution {
            match_id,
            winner,
            loser,
            transferred,
            winner_slots: new_slots,
            advanced_to,
            champion,
        })
    }

    /// The two participants of a match that may be drawn.
    pub fn contenders(&self, at: MatchRef) -> BracketResult<(ParticipantId, ParticipantId)> {
        let m = self.match_at(at).ok_or(BracketError::MatchNotFound(at))?;

        if m.is_bye {
            return Err(BracketError::ByeMatch(m.id.clone()));
        }
        if m.winner.is_some() {
            return Err(BracketError::AlreadyDecided(m.id.clone()));
        }
        match m.participants {
            [Some(first), Some(second)] => Ok((first, second)),
            _ => Err(BracketError::MissingParticipant(m.id.clone())),
        }
    }

    fn match_id(&self, at: MatchRef) -> BracketResult<MatchId> {
        self.match_at(at)
            .map(|m| m.id.clone())
            .ok_or(BracketError::MatchNotFound(at))
    }

    /// Slots the winner of `from` takes on its way forward. Passes through
    /// bye placeholders, which the winner wins outright.
    fn advancement_path(&self, from: MatchRef) -> BracketResult<Vec<(MatchRef, usize)>> {
        let mut path = Vec::new();
        let mut current = from;

        while current.round_index + 1 < self.rounds.len() {
            let (dest, slot) = current.destination();
            let m = self
                .match_at(dest)
                .ok_or(BracketError::DestinationOutOfBounds {
                    from: current,
                    destination: dest,
                })?;

            if m.participants[slot].is_some() {
                return Err(BracketError::SlotOccupied {
                    match_id: m.id.clone(),
                    slot,
                });
            }

            path.push((dest, slot));
            if !(m.is_bye && m.winner.is_none()) {
                break;
            }
            current = dest;
        }

        Ok(path)
    }
}
