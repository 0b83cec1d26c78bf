// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Play validation.
use thiserror::Error;

use bigtwo_eval::{Card, Hand};

/// Reasons a play is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    /// No cards were played.
    #[error("no cards played")]
    Empty,
    /// A played card is not in the player hand.
    #[error("card {0} is not in the hand")]
    NotInHand(Card),
    /// A card was played more than once.
    #[error("card {0} played more than once")]
    DuplicateCard(Card),
    /// The cards are not a valid hand.
    #[error("not a valid hand")]
    InvalidHand,
    /// The opening play doesn't include the three of clubs.
    #[error("the first play must include the three of clubs")]
    MissingOpeningCard,
    /// The play doesn't beat the cards on the table.
    #[error("{played} doesn't beat {last}")]
    DoesNotBeat {
        /// The hand played.
        played: Hand,
        /// The hand on the table.
        last: Hand,
    },
}

/// Checks if a player holding `hand` can play the `proposed` cards.
///
/// Returns the identified hand on success. The three of clubs is required
/// only on the first turn when the player holds it.
pub fn validate_play(
    hand: &[Card],
    proposed: &[Card],
    last_played: Option<&Hand>,
    is_first_turn: bool,
) -> Result<Hand, PlayError> {
    if proposed.is_empty() {
        return Err(PlayError::Empty);
    }

    for (idx, card) in proposed.iter().enumerate() {
        if proposed[..idx].contains(card) {
            return Err(PlayError::DuplicateCard(*card));
        }
    }

    if let Some(card) = proposed.iter().find(|c| !hand.contains(c)) {
        return Err(PlayError::NotInHand(*card));
    }

    let played = Hand::identify(proposed).ok_or(PlayError::InvalidHand)?;

    if is_first_turn
        && hand.contains(&Card::THREE_OF_CLUBS)
        && !played.contains(Card::THREE_OF_CLUBS)
    {
        return Err(PlayError::MissingOpeningCard);
    }

    match last_played {
        Some(last) if !played.beats(last) => Err(PlayError::DoesNotBeat {
            played,
            last: last.clone(),
        }),
        _ => Ok(played),
    }
}
