//! Rally Score demo
//!
//! Plays a seeded match through a session and logs it.
//!
//! Usage: rally-score [tennis|padel] [seed] [--rules path.json]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rally_score::rally::RallySim;
use rally_score::{MatchRules, ScoreEvent, ScoreSession, Side, SportType};

/// Upper bound on points played, in case the rules never end a match
const MAX_DEMO_POINTS: u32 = 100_000;

#[derive(Parser, Debug)]
#[command(name = "rally-score")]
#[command(about = "Play a seeded demo match and print the score", long_about = None)]
struct Cli {
    /// Sport preset (tennis or padel)
    #[arg(value_parser = parse_sport, default_value = "tennis")]
    sport: SportType,

    /// RNG seed for the rallies
    #[arg(default_value_t = 2024)]
    seed: u64,

    /// Rules JSON file (overrides the sport preset)
    #[arg(long)]
    rules: Option<PathBuf>,
}

fn parse_sport(s: &str) -> Result<SportType, String> {
    SportType::from_str(s).ok_or_else(|| format!("unknown sport: {} (expected tennis or padel)", s))
}

fn load_rules(cli: &Cli) -> Result<MatchRules> {
    match &cli.rules {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading rules from {}", path.display()))?;
            Ok(MatchRules::from_json(&json)?)
        }
        None => Ok(MatchRules::from_sport(cli.sport)),
    }
}

fn run(cli: Cli) -> Result<()> {
    let rules = load_rules(&cli)?;
    rules.validate()?;

    log::info!("Playing {} demo match with seed {}", rules.sport.as_str(), cli.seed);
    let mut session = ScoreSession::new(rules, "Left", "Right");
    let mut rallies = RallySim::even(cli.seed);

    let mut played = 0;
    while !session.view().finished && played < MAX_DEMO_POINTS {
        match session.point_to(rallies.next_winner()) {
            ScoreEvent::SetWon(side) | ScoreEvent::MatchWon(side) => {
                let view = session.view();
                let name = match side {
                    Side::Left => &view.left_name,
                    Side::Right => &view.right_name,
                };
                println!("Set to {}: {}", name, view.set_summary);
            }
            ScoreEvent::TieBreakStarted => println!("Tie-break!"),
            _ => {}
        }
        played += 1;
    }

    if !session.view().finished {
        log::warn!("No result after {} points, ending match", played);
        session.end_match();
    }

    let view = session.view();
    println!("Final: {} ({} points)", view.compact, played);
    if let Some(record) = session.history().latest() {
        println!("{}", serde_json::to_string_pretty(record)?);
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        log::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on the web; the scoreboard drives `ScoreSession` directly
}
