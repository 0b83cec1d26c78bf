// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Big Two Bot.
//!
//! The [choose_move] function picks the cards a computer player plays given
//! its hand and a [TableContext], or `None` to pass:
//!
//! ```
//! # use bigtwo_bot::*;
//! # use bigtwo_bot::eval::{Card, parse_cards};
//! let hand = parse_cards("3C 5D 8H JS KC").unwrap();
//! let ctx = TableContext {
//!     is_first_turn: true,
//!     opponent_hand_sizes: vec![13, 13, 13],
//!     next_player_hand_size: Some(13),
//!     ..Default::default()
//! };
//!
//! let cards = choose_move(&hand, &ctx, &Config::default());
//! assert_eq!(cards, Some(vec![Card::THREE_OF_CLUBS]));
//! ```
//!
//! The bot strength is selected with [Config::difficulty], [Difficulty::Minimal]
//! plays the smallest legal single, [Difficulty::Easy] uses rank based rules,
//! and [Difficulty::Hard] scores each candidate with a shallow lookahead.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

mod context;
pub use context::TableContext;

mod lookahead;

pub mod round;
pub use round::{Round, RoundError};

mod strategy;
pub use strategy::{Bot, Strategy, choose_move};

pub mod validate;
pub use validate::{PlayError, validate_play};

// Reexport the evaluator.
pub use bigtwo_eval as eval;

/// The bot playing strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Follows the rules playing the smallest legal single.
    Minimal,
    /// Picks moves using rank based rules.
    Easy,
    /// Scores moves with a lookahead search.
    #[default]
    Hard,
}

/// Error returned when parsing an unknown difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}', expected minimal, easy, or hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Difficulty::Minimal),
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Minimal => "minimal",
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        };

        write!(f, "{name}")
    }
}

/// The deepest lookahead search, larger depths are clamped to this value.
pub const MAX_LOOKAHEAD_DEPTH: u8 = 4;

/// Bot configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The bot playing strength.
    pub difficulty: Difficulty,
    /// Number of plies searched by the hard bot, including the candidate move.
    ///
    /// The search cost grows exponentially with the depth, values are clamped
    /// to `1..=MAX_LOOKAHEAD_DEPTH`.
    pub lookahead_depth: u8,
    /// An opponent with this many cards or fewer is dangerous.
    pub danger_threshold: usize,
    /// The bot is in late game with this many cards or fewer.
    pub late_game_threshold: usize,
}

impl Config {
    /// Configuration for the rule following bot.
    pub fn minimal() -> Self {
        Self::with_difficulty(Difficulty::Minimal)
    }

    /// Configuration for the rank based bot.
    pub fn easy() -> Self {
        Self::with_difficulty(Difficulty::Easy)
    }

    /// Configuration for the lookahead bot.
    pub fn hard() -> Self {
        Self::with_difficulty(Difficulty::Hard)
    }

    /// Default configuration for the given difficulty.
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            lookahead_depth: 2,
            danger_threshold: 3,
            late_game_threshold: 5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::hard()
    }
}
