// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Big Two self-play runner.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::Parser;
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use bigtwo_bot::{
    Bot, Config, Difficulty, MAX_LOOKAHEAD_DEPTH, Round, Strategy, round::play_round,
};

#[derive(Debug, Parser)]
struct Cli {
    /// Number of rounds to play.
    #[clap(long, short, default_value_t = 100)]
    games: usize,
    /// Seed for the deck shuffles.
    #[clap(long, short)]
    seed: Option<u64>,
    /// Bot difficulty for each seat, cycled if fewer than four.
    #[clap(
        long,
        short,
        value_delimiter = ',',
        default_value = "hard,easy,easy,minimal"
    )]
    difficulty: Vec<Difficulty>,
    /// Number of plies searched by hard bots.
    #[clap(
        long,
        default_value_t = 2,
        value_parser = clap::value_parser!(u8).range(1..=MAX_LOOKAHEAD_DEPTH as i64)
    )]
    depth: u8,
    /// An opponent with this many cards or fewer is dangerous.
    #[clap(long, default_value_t = 3)]
    danger: usize,
    /// Log bot decisions and round events.
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    if cli.difficulty.is_empty() || cli.difficulty.len() > Round::SEATS {
        bail!("Expected 1 to {} difficulties", Round::SEATS);
    }

    let configs: Vec<Config> = (0..Round::SEATS)
        .map(|seat| Config {
            lookahead_depth: cli.depth,
            danger_threshold: cli.danger,
            ..Config::with_difficulty(cli.difficulty[seat % cli.difficulty.len()])
        })
        .collect();

    let mut strategies: [Box<dyn Strategy>; Round::SEATS] =
        std::array::from_fn(|seat| Box::new(Bot::new(configs[seat])) as Box<dyn Strategy>);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut wins = [0usize; Round::SEATS];
    for game in 0..cli.games {
        let mut round = Round::new(&mut rng);
        let winner = play_round(&mut round, &mut strategies)?;
        wins[winner] += 1;
        debug!("Game {} won by seat {winner}", game + 1);
    }

    for (seat, (config, count)) in configs.iter().zip(wins).enumerate() {
        let pct = if cli.games > 0 {
            count as f64 * 100.0 / cli.games as f64
        } else {
            0.0
        };

        info!(
            "Seat {seat} ({}): {count} wins {pct:.1}%",
            config.difficulty
        );
    }

    Ok(())
}
