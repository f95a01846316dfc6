//! Neon Defense headless runner
//!
//! Drives the simulation in autopilot at the fixed tick rate, without a
//! renderer, and reports how the run went. Useful for balance checks.
//!
//! Usage: `neon-defense [--seed N] [--ticks N] [--tuning path.json]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use neon_defense::Tuning;
use neon_defense::consts::TICK_RATE;
use neon_defense::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Five minutes of play at the nominal rate
const DEFAULT_TICKS: u64 = TICK_RATE as u64 * 60 * 5;

#[derive(Parser, Debug)]
#[command(
    name = "neon-defense",
    version,
    about = "Run the Neon Defense simulation headless on autopilot"
)]
struct Cli {
    /// RNG seed (defaults to the system clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many playing ticks
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,

    /// JSON tuning file; missing fields keep their defaults
    #[arg(long, value_parser)]
    tuning: Option<PathBuf>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path).unwrap_or_else(|e| {
            log::warn!("Using default tuning, {} not usable: {e}", path.display());
            Tuning::default()
        }),
        None => Tuning::default(),
    };
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let max_ticks = cli.ticks;
    let publish_every = tuning.hud_publish_interval.max(1);

    log::info!("Neon Defense (headless) starting, seed {seed}, up to {max_ticks} ticks");
    let mut state = GameState::with_tuning(seed, tuning);

    tick(
        &mut state,
        &TickInput {
            begin: true,
            ..Default::default()
        },
    );

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut kills = 0u32;
    let mut gates = 0u32;
    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        tick(&mut state, &input);

        for event in &state.events {
            match event {
                GameEvent::SegmentDestroyed { .. } => kills += 1,
                GameEvent::GateRowDestroyed { .. } => gates += 1,
                _ => {}
            }
        }
        if state.time_ticks % publish_every == 0 {
            log::debug!("{:?}", state.hud);
        }
    }

    state.publish_hud();
    log::info!(
        "Finished after {} ticks in {:?}: {} segments, {} gate rows",
        state.time_ticks,
        state.phase,
        kills,
        gates
    );
    match serde_json::to_string_pretty(&state.hud) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize HUD: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["neon-defense"]).unwrap();
        assert_eq!(cli.seed, None);
        assert_eq!(cli.ticks, DEFAULT_TICKS);
        assert!(cli.tuning.is_none());
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::try_parse_from([
            "neon-defense",
            "--seed",
            "5",
            "--ticks",
            "600",
            "--tuning",
            "balance.json",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(5));
        assert_eq!(cli.ticks, 600);
        assert_eq!(cli.tuning, Some(PathBuf::from("balance.json")));
    }

    #[test]
    fn test_cli_flag_missing_its_value_is_an_error() {
        assert!(Cli::try_parse_from(["neon-defense", "--ticks", "--seed", "5"]).is_err());
        assert!(Cli::try_parse_from(["neon-defense", "--seed", "abc"]).is_err());
        assert!(Cli::try_parse_from(["neon-defense", "5"]).is_err());
    }
}
