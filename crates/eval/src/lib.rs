// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Big Two hand classifier and combinations evaluator.
//!
//! Use [Hand::identify] to classify a group of cards and [Hand::beats] to
//! check if a hand can be played on top of the last played hand:
//!
//! ```
//! # use bigtwo_eval::*;
//! let straight = Hand::identify(&parse_cards("3C 4D 5H 6S 7C").unwrap()).unwrap();
//! let quad = Hand::identify(&parse_cards("4C 4D 4H 4S 3D").unwrap()).unwrap();
//! assert_eq!(straight.kind(), HandKind::Straight);
//! assert!(quad.beats(&straight));
//! assert!(!straight.beats(&quad));
//!
//! // Not a recognized hand.
//! assert!(Hand::identify(&parse_cards("3C 4D").unwrap()).is_none());
//! ```
//!
//! Use [HandEvaluation::evaluate] to enumerate the combinations in a hand:
//!
//! ```
//! # use bigtwo_eval::*;
//! let cards = parse_cards("3C 3D 4H 5S 6C 7C 9D").unwrap();
//! let eval = HandEvaluation::evaluate(&cards);
//! assert_eq!(eval.fives().len(), 1);
//! assert_eq!(eval.pairs().len(), 1);
//! assert_eq!(eval.singles(), &[Card::new(Rank::Nine, Suit::Diamonds)]);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod combination;
pub use combination::{Category, Combination, HIGH_CARD_WEIGHT, HandEvaluation};

pub mod hand;
pub use hand::{Hand, HandKind, InvalidHandError};

// Reexport cards types.
pub use bigtwo_cards::{Card, Deck, ParseCardError, Rank, Suit, parse_cards, sort_cards};
