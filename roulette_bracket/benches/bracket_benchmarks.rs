use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use roulette_bracket::{
    Entrant, Participant, ParticipantId, RouletteStrip, WeightedDraw, WinnerPicker,
    generate_with_rng,
};
use std::hint::black_box;

/// Helper to create N entrants with varied slot counts
fn entrants(n: usize) -> Vec<Entrant> {
    (0..n)
        .map(|i| Entrant::new(format!("player{i}"), (i as u64 % 7) + 1))
        .collect()
}

/// Benchmark bracket generation across field sizes
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for n in [8, 37, 256, 1000, 4097] {
        let field = entrants(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &field, |b, field| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| generate_with_rng(black_box(field), &mut rng));
        });
    }

    group.finish();
}

/// Benchmark playing a full tournament to the champion
fn bench_full_tournament(c: &mut Criterion) {
    let field = entrants(64);

    c.bench_function("full_tournament_64", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let mut bracket = generate_with_rng(&field, &mut rng);
            let mut draw = WeightedDraw::with_rng(StdRng::seed_from_u64(11));
            while let Some(&at) = bracket.playable_matches().first() {
                let mut next = bracket.clone();
                let (first, second) = bracket.contenders(at).unwrap();
                let winner = {
                    let first = bracket.participant(first).unwrap();
                    let second = bracket.participant(second).unwrap();
                    draw.pick(first, second)
                };
                next.resolve_in_place(at, winner).unwrap();
                bracket = next;
            }
            black_box(bracket)
        });
    });
}

/// Benchmark a single weighted draw
fn bench_weighted_pick(c: &mut Criterion) {
    let first = Participant {
        id: ParticipantId(0),
        name: "first".to_string(),
        slots: 3,
    };
    let second = Participant {
        id: ParticipantId(1),
        name: "second".to_string(),
        slots: 11,
    };
    let mut draw = WeightedDraw::with_rng(StdRng::seed_from_u64(1));

    c.bench_function("weighted_pick", |b| {
        b.iter(|| draw.pick(black_box(&first), black_box(&second)));
    });
}

/// Benchmark laying out a roulette strip
fn bench_roulette_strip(c: &mut Criterion) {
    let first = Participant {
        id: ParticipantId(0),
        name: "first".to_string(),
        slots: 40,
    };
    let second = Participant {
        id: ParticipantId(1),
        name: "second".to_string(),
        slots: 25,
    };
    let mut rng = StdRng::seed_from_u64(3);

    c.bench_function("roulette_strip", |b| {
        b.iter(|| RouletteStrip::spin(&first, &second, second.id, &mut rng));
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_full_tournament,
    bench_weighted_pick,
    bench_roulette_strip
);
criterion_main!(benches);
