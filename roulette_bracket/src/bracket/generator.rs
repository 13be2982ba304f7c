//! Bracket generation: random seeding, bye placement and round layout.

use super::errors::{BracketError, BracketResult};
use super::models::{Bracket, Entrant, Match, Participant, ParticipantId, Round};
use rand::{
    Rng,
    seq::{IndexedRandom, SliceRandom},
};

/// Fewest entrants that make a tournament
pub const MIN_PARTICIPANTS: usize = 2;

/// Generate a bracket using the thread-local RNG.
///
/// Fewer than [`MIN_PARTICIPANTS`] entrants yield an empty bracket.
pub fn generate(entrants: &[Entrant]) -> Bracket {
    generate_with_rng(entrants, &mut rand::rng())
}

/// Like [`generate`], but reports too few entrants as an error.
pub fn try_generate(entrants: &[Entrant]) -> BracketResult<Bracket> {
    try_generate_with_rng(entrants, &mut rand::rng())
}

pub fn try_generate_with_rng<R: Rng + ?Sized>(
    entrants: &[Entrant],
    rng: &mut R,
) -> BracketResult<Bracket> {
    if entrants.len() < MIN_PARTICIPANTS {
        return Err(BracketError::InsufficientParticipants {
            needed: MIN_PARTICIPANTS,
            current: entrants.len(),
        });
    }
    Ok(generate_with_rng(entrants, rng))
}

/// Generate a bracket drawing all randomness from `rng`.
///
/// Participant ids follow the order of `entrants`; seating does not.
///
/// # Arguments
///
/// * `entrants` - Validated entrants (non-empty unique names, positive slots)
/// * `rng` - Source of randomness for both shuffles
///
/// # Returns
///
/// * `Bracket` - Rounds from the first round to the final
pub fn generate_with_rng<R: Rng + ?Sized>(entrants: &[Entrant], rng: &mut R) -> Bracket {
    if entrants.len() < MIN_PARTICIPANTS {
        log::warn!(
            "Cannot build a bracket from {} participant(s), need at least {}",
            entrants.len(),
            MIN_PARTICIPANTS
        );
        return Bracket::default();
    }

    let participants: Vec<Participant> = entrants
        .iter()
        .enumerate()
        .map(|(idx, entrant)| Participant {
            id: ParticipantId(idx),
            name: entrant.name.clone(),
            slots: entrant.slots,
        })
        .collect();

    let ids: Vec<ParticipantId> = participants.iter().map(|p| p.id).collect();
    let seeded = shuffled(&ids, rng);

    let size = bracket_size(seeded.len());
    let num_byes = size - seeded.len();

    let slots: Vec<Option<ParticipantId>> = std::iter::repeat_n(None, num_byes)
        .chain(seeded.into_iter().map(Some))
        .collect();
    let mut slots = shuffled(&slots, rng);
    separate_empty_pairs(&mut slots, rng);

    let first_round = Round {
        round_number: 1,
        matches: slots
            .chunks_exact(2)
            .enumerate()
            .map(|(idx, pair)| Match::new(1, idx as u32 + 1, [pair[0], pair[1]]))
            .collect(),
    };

    let num_rounds = round_count(participants.len());
    let mut rounds = Vec::with_capacity(num_rounds);
    rounds.push(first_round);

    // A vacant match can never produce a winner.
    let mut vacant: Vec<bool> = rounds[0]
        .matches
        .iter()
        .map(|m| m.participants == [None, None])
        .collect();

    for round_number in 2..=num_rounds as u32 {
        let previous = &rounds[rounds.len() - 1];
        let (round, next_vacant) = next_round(round_number, previous, &vacant);
        rounds.push(round);
        vacant = next_vacant;
    }

    log::debug!(
        "Generated bracket: {} participants, size {}, {} bye(s), {} round(s)",
        participants.len(),
        size,
        num_byes,
        rounds.len()
    );

    Bracket::new(participants, rounds)
}

/// Pair the previous round's matches positionally: match `i` is fed by
/// matches `2i` and `2i + 1`.
fn next_round(round_number: u32, previous: &Round, vacant: &[bool]) -> (Round, Vec<bool>) {
    let mut matches = Vec::with_capacity(previous.matches.len() / 2);
    let mut next_vacant = Vec::with_capacity(previous.matches.len() / 2);

    for (idx, feeders) in previous.matches.chunks_exact(2).enumerate() {
        let match_number = idx as u32 + 1;
        let slots = [feeders[0].winner, feeders[1].winner];

        let m = match (vacant[2 * idx], vacant[2 * idx + 1]) {
            (false, false) => Match::pending(round_number, match_number, slots),
            (true, true) => {
                next_vacant.push(true);
                matches.push(Match::pending(round_number, match_number, [None, None]));
                continue;
            }
            (left_vacant, _) => {
                log::warn!(
                    "Round {} match {} has a vacant feeder, treating it as a bye",
                    round_number,
                    match_number
                );
                let live = if left_vacant { 1 } else { 0 };
                let mut m = Match::pending(round_number, match_number, slots);
                m.is_bye = true;
                m.winner = slots[live];
                m
            }
        };

        next_vacant.push(false);
        matches.push(m);
    }

    (
        Round {
            round_number,
            matches,
        },
        next_vacant,
    )
}

/// Uniformly permuted copy of `items`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Smallest power of two holding `num_participants`.
pub fn bracket_size(num_participants: usize) -> usize {
    num_participants.max(1).next_power_of_two()
}

/// `ceil(log2(n))`, or zero when no tournament can be played.
pub fn round_count(num_participants: usize) -> usize {
    if num_participants < MIN_PARTICIPANTS {
        0
    } else {
        bracket_size(num_participants).trailing_zeros() as usize
    }
}

/// Break up any pair of adjacent empty slots.
///
/// After the whole slot array is shuffled two byes can land in the same
/// match, which would leave a match with nobody in it. Each such pair
/// trades one empty slot with a participant from a distinct, randomly
/// chosen full pair, turning both into byes. Full pairs outnumber empty
/// pairs while participants outnumber byes, so one pass suffices.
fn separate_empty_pairs<R: Rng + ?Sized>(slots: &mut [Option<ParticipantId>], rng: &mut R) {
    let mut empty_pairs = Vec::new();
    let mut full_pairs = Vec::new();
    for (pair, seats) in slots.chunks_exact(2).enumerate() {
        match (seats[0].is_some(), seats[1].is_some()) {
            (false, false) => empty_pairs.push(pair),
            (true, true) => full_pairs.push(pair),
            _ => {}
        }
    }

    if empty_pairs.is_empty() {
        return;
    }

    if full_pairs.len() < empty_pairs.len() {
        log::warn!(
            "Only {} full pair(s) to fill {} empty match(es)",
            full_pairs.len(),
            empty_pairs.len()
        );
    }

    let donors: Vec<usize> = full_pairs
        .choose_multiple(rng, empty_pairs.len())
        .copied()
        .collect();

    for (empty_pair, donor) in empty_pairs.into_iter().zip(donors) {
        let side = rng.random_range(0..2);
        slots.swap(2 * empty_pair, 2 * donor + side);
        log::debug!(
            "Moved a participant from match {} into empty match {}",
            donor + 1,
            empty_pair + 1
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn entrants(n: usize) -> Vec<Entrant> {
        (0..n)
            .map(|i| Entrant::new(format!("player{i}"), (i as u64 % 5) + 1))
            .collect()
    }

    #[test]
    fn test_bracket_size_and_round_count() {
        assert_eq!(bracket_size(2), 2);
        assert_eq!(bracket_size(3), 4);
        assert_eq!(bracket_size(8), 8);
        assert_eq!(bracket_size(9), 16);

        assert_eq!(round_count(0), 0);
        assert_eq!(round_count(1), 0);
        assert_eq!(round_count(2), 1);
        assert_eq!(round_count(5), 3);
        assert_eq!(round_count(16), 4);
        assert_eq!(round_count(17), 5);
    }

    #[test]
    fn test_fewer_than_two_participants_yield_empty_bracket() {
        assert!(generate(&[]).is_empty());
        assert!(generate(&entrants(1)).is_empty());
    }

    #[test]
    fn test_try_generate_reports_insufficient_participants() {
        let err = try_generate(&entrants(1)).unwrap_err();
        assert_eq!(
            err,
            BracketError::InsufficientParticipants {
                needed: 2,
                current: 1
            }
        );
        assert!(try_generate(&entrants(2)).is_ok());
    }

    #[test]
    fn test_two_participants_single_real_match() {
        let bracket = generate(&entrants(2));
        assert_eq!(bracket.rounds().len(), 1);
        let only = &bracket.rounds()[0].matches[0];
        assert!(!only.is_bye);
        assert!(only.is_playable());
        assert_eq!(only.id.as_str(), "R1M1");
    }

    #[test]
    fn test_power_of_two_has_no_byes() {
        let bracket = generate(&entrants(16));
        assert_eq!(bracket.bye_count(), 0);
        assert_eq!(bracket.rounds().len(), 4);
        assert_eq!(bracket.playable_matches().len(), 8);
    }

    #[test]
    fn test_participant_ids_follow_input_order() {
        let input = entrants(6);
        let bracket = generate(&input);
        for (idx, entrant) in input.iter().enumerate() {
            let participant = bracket.participant(ParticipantId(idx)).unwrap();
            assert_eq!(participant.name, entrant.name);
            assert_eq!(participant.slots, entrant.slots);
        }
    }

    #[test]
    fn test_no_match_is_left_empty() {
        // 5 of 8 slots filled leaves 3 byes; run many seeds so the
        // double-bye pairing is hit.
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let bracket = generate_with_rng(&entrants(5), &mut rng);
            let first = &bracket.rounds()[0];
            assert_eq!(first.bye_count(), 3, "seed {seed}");
            assert!(
                first
                    .matches
                    .iter()
                    .all(|m| m.participants.iter().any(Option::is_some)),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn test_bye_winners_prefill_next_round() {
        let mut rng = StdRng::seed_from_u64(7);
        let bracket = generate_with_rng(&entrants(3), &mut rng);
        let first = &bracket.rounds()[0];
        let second = &bracket.rounds()[1];

        for (idx, m) in first.matches.iter().enumerate() {
            let placed = second.matches[idx / 2].participants[idx % 2];
            assert_eq!(placed, m.winner);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_with_rng(&entrants(11), &mut StdRng::seed_from_u64(99));
        let b = generate_with_rng(&entrants(11), &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffled_is_a_permutation_and_leaves_input_alone() {
        let mut rng = StdRng::seed_from_u64(1);
        let items: Vec<u32> = (0..50).collect();
        let out = shuffled(&items, &mut rng);

        assert_eq!(items, (0..50).collect::<Vec<_>>());
        let seen: HashSet<u32> = out.iter().copied().collect();
        assert_eq!(seen.len(), 50);
        assert_ne!(out, items);
    }

    #[test]
    fn test_separate_empty_pairs_repairs_layout() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = |i| Some(ParticipantId(i));
        let mut slots = vec![None, None, p(0), p(1), p(2), p(3), None, p(4)];
        separate_empty_pairs(&mut slots, &mut rng);

        for pair in slots.chunks_exact(2) {
            assert!(pair.iter().any(Option::is_some));
        }
        assert_eq!(slots.iter().filter(|s| s.is_none()).count(), 3);
    }

    #[test]
    fn test_separate_empty_pairs_uses_each_donor_once() {
        // Three empty pairs and exactly three full pairs: every full pair
        // must give up one participant.
        let p = |i| Some(ParticipantId(i));
        let mut slots = vec![
            None, None, p(0), p(1), None, None, p(2), p(3), None, None, p(4), p(5),
        ];
        let mut rng = StdRng::seed_from_u64(11);
        separate_empty_pairs(&mut slots, &mut rng);

        for pair in slots.chunks_exact(2) {
            assert_eq!(pair.iter().filter(|s| s.is_some()).count(), 1);
        }
        let seated: HashSet<ParticipantId> = slots.iter().flatten().copied().collect();
        assert_eq!(seated.len(), 6);
    }

    #[test]
    fn test_large_field_just_above_power_of_two() {
        // 16_385 entrants in a 32_768 bracket leave 16_383 byes, so the
        // first round is almost all byes and many empty pairs need repair.
        let field = entrants(16_385);
        let mut rng = StdRng::seed_from_u64(21);
        let bracket = generate_with_rng(&field, &mut rng);

        let first = &bracket.rounds()[0];
        assert_eq!(first.matches.len(), 16_384);
        assert_eq!(first.bye_count(), 16_383);
        assert!(
            first
                .matches
                .iter()
                .all(|m| m.participants.iter().any(Option::is_some))
        );
        assert_eq!(bracket.rounds().len(), 15);
    }

    #[test]
    fn test_vacant_feeder_becomes_bye() {
        let p = |i| Some(ParticipantId(i));
        let previous = Round {
            round_number: 1,
            matches: vec![
                Match::new(1, 1, [p(0), None]),
                Match::new(1, 2, [None, None]),
                Match::new(1, 3, [p(1), p(2)]),
                Match::new(1, 4, [None, p(3)]),
            ],
        };
        let vacant = [false, true, false, false];

        let (round, next_vacant) = next_round(2, &previous, &vacant);
        assert_eq!(next_vacant, vec![false, false]);
        assert!(round.matches[0].is_bye);
        assert_eq!(round.matches[0].winner, p(0));
        assert!(!round.matches[1].is_bye);
        assert_eq!(round.matches[1].participants, [None, p(3)]);
    }
}
