//! Terminal runner for roulette bracket tournaments.
//!
//! Loads a `name,slots` roster, seats it into a bracket and plays every
//! match with a slot-weighted draw until a champion is left.

mod config;
mod display;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Error};
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use rand::{Rng, SeedableRng, rngs::StdRng};
use roulette_bracket::{
    Bracket, Roster, RouletteStrip, WeightedDraw, WinnerPicker,
    bracket::try_generate_with_rng,
};

use config::{CliConfig, CliOverrides};

const HELP: &str = "\
Run a roulette bracket tournament

USAGE:
  rb_cli [OPTIONS]

OPTIONS:
  --roster     FILE        Roster with one `name,slots` row per line  [default: env RB_ROSTER]
  --name       NAME        Tournament name  [default: env RB_TOURNAMENT_NAME or Roulette Battle Tournament]
  --seed       N           Seed for reproducible brackets and draws  [default: env RB_SEED or random]

FLAGS:
  --auto                   Play all matches without waiting for Enter
  --json                   Print the final bracket as JSON
  -h, --help               Print help information

ENVIRONMENT:
  RB_ROSTER                Roster file path
  RB_TOURNAMENT_NAME       Tournament name
  RB_SEED                  RNG seed
  RB_AUTO_PLAY             Play without prompting (true/false)
  RUST_LOG                 Log level (e.g. info, debug)
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = CliOverrides {
        roster_path: pargs.opt_value_from_str("--roster")?,
        tournament_name: pargs.opt_value_from_str("--name")?,
        seed: pargs.opt_value_from_str("--seed")?,
        auto_play: pargs.contains("--auto"),
        json: pargs.contains("--json"),
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let config = CliConfig::from_env(overrides)?;
    config.validate()?;

    run(config)
}

fn run(config: CliConfig) -> Result<(), Error> {
    let roster = Roster::from_path(&config.roster_path)
        .with_context(|| format!("Failed to load roster {}", config.roster_path.display()))?;
    info!(
        "Loaded {} participant(s) holding {} slot(s) from {}",
        roster.len(),
        roster.total_slots(),
        config.roster_path.display()
    );

    let mut rng = match config.seed {
        Some(seed) => {
            info!("Using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let entrants = roster.into_entrants();
    let mut bracket = try_generate_with_rng(&entrants, &mut rng)
        .context("Cannot start the tournament")?;
    let mut draw = WeightedDraw::with_rng(StdRng::seed_from_u64(rng.random()));

    println!("{}", display::render_bracket(&config.tournament_name, &bracket));

    let stdin = io::stdin();
    let mut input = stdin.lock();

    while let Some(&at) = bracket.playable_matches().first() {
        let (first, second) = bracket.contenders(at)?;
        let first = bracket
            .participant(first)
            .cloned()
            .context("Match refers to an unknown participant")?;
        let second = bracket
            .participant(second)
            .cloned()
            .context("Match refers to an unknown participant")?;

        if !config.auto_play {
            print!(
                "{}: {} vs {} - press Enter to spin ",
                bracket.match_at(at).map_or("?", |m| m.id.as_str()),
                first,
                second
            );
            io::stdout().flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                info!("Input closed, stopping before {at}");
                break;
            }
        }

        let winner = draw.pick(&first, &second);
        let strip = RouletteStrip::spin(&first, &second, winner, &mut rng);

        let mut next = bracket.clone();
        let resolution = next.resolve_in_place(at, winner)?;
        println!("{}", display::render_draw(&next, &resolution, &strip));
        bracket = next;
    }

    report(&config, &bracket)
}

fn report(config: &CliConfig, bracket: &Bracket) -> Result<(), Error> {
    println!();
    println!("{}", display::render_bracket(&config.tournament_name, bracket));

    match bracket.champion() {
        Some(champion) => {
            println!("Tournament Over!");
            println!("Winner: {}", champion.name);
            println!("Final Slots: {}", champion.slots);
        }
        None => println!("Tournament stopped before a winner was drawn."),
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(bracket)?);
    }

    Ok(())
}
