//! Bracket data models: participants, matches, rounds and the bracket itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative weight of a participant in a weighted draw.
pub type Slots = u64;

/// Stable participant identity inside a bracket.
///
/// Assigned from the entrant's position in the list handed to the
/// generator, so it never depends on the (mutable) slot count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub usize);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An imported entry, before it is seated in a bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    /// Display name (unique within a roster)
    pub name: String,
    /// Starting slot count
    pub slots: Slots,
}

impl Entrant {
    pub fn new(name: impl Into<String>, slots: Slots) -> Self {
        Self {
            name: name.into(),
            slots,
        }
    }
}

/// A participant seated in a bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identity used by every match referring to this participant
    pub id: ParticipantId,
    /// Display name
    pub name: String,
    /// Current slot count. Grows when the participant absorbs a defeated
    /// opponent and stays frozen once the participant is eliminated.
    pub slots: Slots,
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.slots)
    }
}

/// Human-readable match identifier such as `R2M1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(round: u32, match_number: u32) -> Self {
        Self(format!("R{round}M{match_number}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Zero-based position of a match inside a bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchRef {
    pub round_index: usize,
    pub match_index: usize,
}

impl MatchRef {
    pub fn new(round_index: usize, match_index: usize) -> Self {
        Self {
            round_index,
            match_index,
        }
    }

    /// The match the winner of this match moves into, and the participant
    /// slot it takes there. Even matches feed slot 0, odd matches slot 1.
    ///
    /// This mirrors the consecutive pairing used when rounds are generated.
    pub fn destination(&self) -> (MatchRef, usize) {
        (
            MatchRef::new(self.round_index + 1, self.match_index / 2),
            self.match_index % 2,
        )
    }
}

impl fmt::Display for MatchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {}, match {}",
            self.round_index + 1,
            self.match_index + 1
        )
    }
}

/// A single pairing in a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Round number (1-indexed)
    pub round: u32,
    /// Position within the round (1-indexed)
    pub match_number: u32,
    /// The two participant slots. `None` is an empty bye slot in round 1,
    /// or a slot still waiting for a feeder match in later rounds.
    pub participants: [Option<ParticipantId>; 2],
    pub winner: Option<ParticipantId>,
    /// Set at creation when exactly one slot is populated
    pub is_bye: bool,
}

impl Match {
    /// Create a match from its two slots. Exactly one populated slot makes
    /// it a bye, decided on the spot.
    pub fn new(round: u32, match_number: u32, participants: [Option<ParticipantId>; 2]) -> Self {
        let (is_bye, winner) = match participants {
            [Some(only), None] | [None, Some(only)] => (true, Some(only)),
            _ => (false, None),
        };

        Self {
            id: MatchId::new(round, match_number),
            round,
            match_number,
            participants,
            winner,
            is_bye,
        }
    }

    /// A later-round match whose slots are filled as feeders are decided.
    pub(crate) fn pending(
        round: u32,
        match_number: u32,
        participants: [Option<ParticipantId>; 2],
    ) -> Self {
        Self {
            id: MatchId::new(round, match_number),
            round,
            match_number,
            participants,
            winner: None,
            is_bye: false,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Both participants are known and no winner has been drawn yet.
    pub fn is_playable(&self) -> bool {
        !self.is_bye && self.winner.is_none() && self.participants.iter().all(Option::is_some)
    }

    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.participants.contains(&Some(participant))
    }

    /// The other participant of a two-sided match.
    pub fn opponent_of(&self, participant: ParticipantId) -> Option<ParticipantId> {
        match self.participants {
            [Some(a), Some(b)] if a == participant => Some(b),
            [Some(a), Some(b)] if b == participant => Some(a),
            _ => None,
        }
    }

    /// The defeated participant, once a non-bye match is decided.
    pub fn loser(&self) -> Option<ParticipantId> {
        if self.is_bye {
            return None;
        }
        self.winner.and_then(|winner| self.opponent_of(winner))
    }
}

/// One elimination layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Round number (1-indexed)
    pub round_number: u32,
    pub matches: Vec<Match>,
}

impl Round {
    pub fn bye_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_bye).count()
    }

    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_decided)
    }
}

/// Complete tournament state: the participants and the rounds referring
/// to them by id.
///
/// A bracket is only changed through resolution. Cloning it gives an
/// independent snapshot that later resolutions never touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub(crate) participants: Vec<Participant>,
    pub(crate) rounds: Vec<Round>,
}

impl Bracket {
    pub(crate) fn new(participants: Vec<Participant>, rounds: Vec<Round>) -> Self {
        Self {
            participants,
            rounds,
        }
    }

    /// True for the degenerate bracket produced from fewer than two
    /// participants.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id.0).filter(|p| p.id == id)
    }

    pub fn participant_by_name(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn match_at(&self, at: MatchRef) -> Option<&Match> {
        self.rounds
            .get(at.round_index)
            .and_then(|round| round.matches.get(at.match_index))
    }

    /// Locate a match by its human-readable id.
    pub fn find_match(&self, id: &MatchId) -> Option<MatchRef> {
        self.iter_matches()
            .find(|(_, m)| &m.id == id)
            .map(|(at, _)| at)
    }

    /// Every match with its position, round by round.
    pub fn iter_matches(&self) -> impl Iterator<Item = (MatchRef, &Match)> {
        self.rounds.iter().enumerate().flat_map(|(round_index, round)| {
            round
                .matches
                .iter()
                .enumerate()
                .map(move |(match_index, m)| (MatchRef::new(round_index, match_index), m))
        })
    }

    /// Matches that can be drawn right now, in bracket order.
    pub fn playable_matches(&self) -> Vec<MatchRef> {
        self.iter_matches()
            .filter(|(_, m)| m.is_playable())
            .map(|(at, _)| at)
            .collect()
    }

    /// The winner of the final match, once decided.
    pub fn champion(&self) -> Option<&Participant> {
        self.rounds
            .last()
            .and_then(|round| round.matches.first())
            .and_then(|m| m.winner)
            .and_then(|id| self.participant(id))
    }

    pub fn is_finished(&self) -> bool {
        self.champion().is_some()
    }

    /// Number of first-round slots (a power of two), or zero when empty.
    pub fn bracket_size(&self) -> usize {
        self.rounds.first().map_or(0, |round| round.matches.len() * 2)
    }

    pub fn bye_count(&self) -> usize {
        self.rounds.first().map_or(0, Round::bye_count)
    }

    /// Sum of every participant's current slots.
    ///
    /// Eliminated participants keep their frozen count, so this grows as
    /// the tournament progresses.
    pub fn total_slots(&self) -> u128 {
        self.participants.iter().map(|p| u128::from(p.slots)).sum()
    }
}
