// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Big Two cards types.
//!
//! This crate define types to create cards using the Big Two ordering where the
//! deuce is the highest rank and spades the highest suit:
//!
//! ```
//! # use bigtwo_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let dc = Card::new(Rank::Deuce, Suit::Clubs);
//! assert!(dc > ah);
//! assert_eq!(dc.weight(), 120);
//! ```
//!
//! Cards can be parsed from their text representation:
//!
//! ```
//! # use bigtwo_cards::{Card, Rank, Suit, parse_cards};
//! let cards = parse_cards("3C TD 2S").unwrap();
//! assert_eq!(cards[0], Card::THREE_OF_CLUBS);
//! assert_eq!(cards[1], Card::new(Rank::Ten, Suit::Diamonds));
//! ```
//!
//! and a [Deck] type for shuffling and dealing the four 13-cards hands:
//!
//! ```
//! # use bigtwo_cards::Deck;
//! let hands = Deck::shuffled().deal_hands();
//! assert!(hands.iter().all(|h| h.len() == 13));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit, parse_cards, sort_cards};
