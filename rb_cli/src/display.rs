//! Plain-text rendering of brackets and draws.

use roulette_bracket::{Bracket, Match, ParticipantId, Resolution, RouletteStrip};

/// Label for a participant slot in a match
fn slot_label(bracket: &Bracket, slot: Option<ParticipantId>, m: &Match) -> String {
    match slot.and_then(|id| bracket.participant(id)) {
        Some(p) => p.to_string(),
        None if m.is_bye => "BYE".to_string(),
        None => "TBD".to_string(),
    }
}

fn status_label(bracket: &Bracket, m: &Match) -> String {
    match m.winner.and_then(|id| bracket.participant(id)) {
        Some(winner) if m.is_bye => format!("bye -> {}", winner.name),
        Some(winner) => format!("winner: {}", winner.name),
        None if m.is_playable() => "ready".to_string(),
        None => "waiting".to_string(),
    }
}

/// Render every round of the bracket, one match per line.
pub fn render_bracket(title: &str, bracket: &Bracket) -> String {
    let mut lines = vec![format!("=== {title} ===")];

    for round in bracket.rounds() {
        lines.push(format!("Round {}", round.round_number));
        lines.extend(round.matches.iter().map(|m| {
            format!(
                "  {:<6} {:>20}  vs  {:<20} [{}]",
                m.id.as_str(),
                slot_label(bracket, m.participants[0], m),
                slot_label(bracket, m.participants[1], m),
                status_label(bracket, m)
            )
        }));
    }

    lines.join("\n") + "\n"
}

/// Describe a finished draw and where the roulette stopped.
pub fn render_draw(bracket: &Bracket, resolution: &Resolution, strip: &RouletteStrip) -> String {
    let name = |id: ParticipantId| {
        bracket
            .participant(id)
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    };

    format!(
        "{}: roulette stops at {}/{} -> {} beats {} and now holds {} slot(s)",
        resolution.match_id,
        strip.landing_index() + 1,
        strip.len(),
        name(resolution.winner),
        name(resolution.loser),
        resolution.winner_slots
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use roulette_bracket::{Entrant, MatchRef, generate_with_rng};

    fn three_player_bracket() -> Bracket {
        let entrants = vec![
            Entrant::new("Alice", 3),
            Entrant::new("Bob", 1),
            Entrant::new("Carol", 2),
        ];
        generate_with_rng(&entrants, &mut StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_render_bracket_lists_all_matches() {
        let bracket = three_player_bracket();
        let text = render_bracket("Spring Cup", &bracket);

        assert!(text.starts_with("=== Spring Cup ==="));
        assert!(text.contains("Round 1"));
        assert!(text.contains("Round 2"));
        assert!(text.contains("R1M1"));
        assert!(text.contains("R1M2"));
        assert!(text.contains("R2M1"));
        assert!(text.contains("BYE"));
        assert!(text.contains("ready"));
        assert!(text.contains("waiting"));
    }

    #[test]
    fn test_render_bracket_one_line_per_round_and_match() {
        let bracket = three_player_bracket();
        let text = render_bracket("Spring Cup", &bracket);

        let matches: usize = bracket.rounds().iter().map(|r| r.matches.len()).sum();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1 + bracket.rounds().len() + matches);
        assert_eq!(text.lines().nth(1), Some("Round 1"));
    }

    #[test]
    fn test_render_draw_names_both_sides() {
        let bracket = three_player_bracket();
        let at: MatchRef = bracket.playable_matches()[0];
        let (a, b) = bracket.contenders(at).unwrap();
        let first = bracket.participant(a).unwrap().clone();
        let second = bracket.participant(b).unwrap().clone();

        let mut rng = StdRng::seed_from_u64(1);
        let strip = RouletteStrip::spin(&first, &second, first.id, &mut rng);
        let mut next = bracket.clone();
        let resolution = next.resolve_in_place(at, first.id).unwrap();

        let line = render_draw(&next, &resolution, &strip);
        assert!(line.contains(&first.name));
        assert!(line.contains(&second.name));
        assert!(line.contains(&format!("holds {}", first.slots + second.slots)));
    }
}
