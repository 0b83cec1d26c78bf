// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The table state seen by a bot.
use bigtwo_eval::Hand;

/// A snapshot of the table used to choose a move.
#[derive(Debug, Clone, Default)]
pub struct TableContext {
    /// The hand to beat, `None` if the bot is leading the trick.
    pub last_played: Option<Hand>,
    /// The bot is opening the round and must play the three of clubs.
    pub is_first_turn: bool,
    /// Number of cards held by each opponent.
    pub opponent_hand_sizes: Vec<usize>,
    /// Number of cards held by the player that plays next.
    pub next_player_hand_size: Option<usize>,
}

impl TableContext {
    /// Checks if any opponent has `threshold` cards or fewer.
    pub fn is_dangerous(&self, threshold: usize) -> bool {
        self.opponent_hand_sizes.iter().any(|n| *n <= threshold)
    }

    /// Checks if the next player is about to go out.
    pub fn next_player_has_one_card(&self) -> bool {
        self.next_player_hand_size == Some(1)
    }
}
