// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Local round driver.
//!
//! A [Round] deals four hands and tracks turns and tricks, the player that
//! holds the three of clubs opens. After three consecutive passes the table is
//! cleared and the last player to play leads the next trick.
use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use bigtwo_eval::{Card, Deck, Hand};

use crate::{PlayError, Strategy, TableContext, validate_play};

/// Errors returned by round actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// A player has already gone out.
    #[error("the round is over")]
    GameOver,
    /// The player leading the trick must play.
    #[error("the trick leader cannot pass")]
    CannotPassOnLead,
    /// The play was rejected.
    #[error(transparent)]
    Play(#[from] PlayError),
}

/// The state of a four players round.
#[derive(Debug, Clone)]
pub struct Round {
    hands: [Vec<Card>; Deck::SEATS],
    turn: usize,
    last_played: Option<(usize, Hand)>,
    passes: usize,
    first_turn: bool,
    winner: Option<usize>,
}

impl Round {
    /// Number of seats at the table.
    pub const SEATS: usize = Deck::SEATS;

    /// Deals a new round from a deck shuffled with `rng`.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_hands(Deck::new_and_shuffled(rng).deal_hands())
    }

    /// Creates a round with the given hands.
    pub fn with_hands(mut hands: [Vec<Card>; Deck::SEATS]) -> Self {
        for hand in &mut hands {
            hand.sort();
        }

        let turn = hands
            .iter()
            .position(|h| h.contains(&Card::THREE_OF_CLUBS))
            .unwrap_or_default();

        debug!("Seat {turn} opens the round");

        Self {
            hands,
            turn,
            last_played: None,
            passes: 0,
            first_turn: true,
            winner: None,
        }
    }

    /// The seat that has to act.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// The cards held by a seat.
    pub fn hand(&self, seat: usize) -> &[Card] {
        &self.hands[seat]
    }

    /// The hand to beat, `None` if the player to act leads.
    pub fn last_played(&self) -> Option<&Hand> {
        self.last_played.as_ref().map(|(_, hand)| hand)
    }

    /// The seat that played the hand to beat.
    pub fn last_player(&self) -> Option<usize> {
        self.last_played.as_ref().map(|(seat, _)| *seat)
    }

    /// Checks if no card has been played yet.
    pub fn is_first_turn(&self) -> bool {
        self.first_turn
    }

    /// The seat that went out first.
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    /// Checks if a player has gone out.
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// The table as seen by `seat`, opponents are listed in playing order.
    pub fn context_for(&self, seat: usize) -> TableContext {
        let opponent_hand_sizes = (1..Self::SEATS)
            .map(|offset| self.hands[(seat + offset) % Self::SEATS].len())
            .collect();

        TableContext {
            last_played: self.last_played().cloned(),
            is_first_turn: self.first_turn,
            opponent_hand_sizes,
            next_player_hand_size: Some(self.hands[Self::next_seat(seat)].len()),
        }
    }

    /// Plays cards for the seat that has to act.
    pub fn play(&mut self, cards: &[Card]) -> Result<Hand, RoundError> {
        if self.is_over() {
            return Err(RoundError::GameOver);
        }

        let seat = self.turn;
        let hand = validate_play(
            &self.hands[seat],
            cards,
            self.last_played(),
            self.first_turn,
        )?;

        self.hands[seat].retain(|c| !hand.contains(*c));
        debug!("Seat {seat} plays {hand}, {} left", self.hands[seat].len());

        self.first_turn = false;
        self.passes = 0;
        self.last_played = Some((seat, hand.clone()));

        if self.hands[seat].is_empty() {
            info!("Seat {seat} wins the round");
            self.winner = Some(seat);
        } else {
            self.turn = Self::next_seat(seat);
        }

        Ok(hand)
    }

    /// Passes for the seat that has to act.
    pub fn pass(&mut self) -> Result<(), RoundError> {
        if self.is_over() {
            return Err(RoundError::GameOver);
        }

        if self.last_played.is_none() {
            return Err(RoundError::CannotPassOnLead);
        }

        debug!("Seat {} passes", self.turn);

        self.passes += 1;
        self.turn = Self::next_seat(self.turn);

        if self.passes == Self::SEATS - 1 {
            debug!("Seat {} leads a new trick", self.turn);
            self.passes = 0;
            self.last_played = None;
        }

        Ok(())
    }

    fn next_seat(seat: usize) -> usize {
        (seat + 1) % Self::SEATS
    }
}

/// Plays a round to the end asking each seat strategy for its moves.
///
/// Returns the winner seat, fails if a strategy makes an illegal move.
pub fn play_round(
    round: &mut Round,
    strategies: &mut [Box<dyn Strategy>; Round::SEATS],
) -> Result<usize, RoundError> {
    loop {
        if let Some(winner) = round.winner() {
            return Ok(winner);
        }

        let seat = round.turn();
        let ctx = round.context_for(seat);
        match strategies[seat].choose(round.hand(seat), &ctx) {
            Some(cards) => {
                round.play(&cards)?;
            }
            None => round.pass()?,
        }
    }
}
